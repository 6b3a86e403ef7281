use num_traits::{Float, FloatConst};

/// The element type used when a caller does not pick one.
pub type DefaultDtype = f64;

/// Trait for kernel element types.
///
/// Send and Sync are required so kernels can be generated on a rayon pool.
pub trait KernelDtype: Float + FloatConst + Default + std::fmt::Debug + Send + Sync + 'static {
    /// Convert a f64 value to the kernel data type.
    fn from_f64(x: f64) -> Self;

    /// Convert a grid index or count to the kernel data type.
    fn from_usize(x: usize) -> Self {
        Self::from_f64(x as f64)
    }
}

impl KernelDtype for f32 {
    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl KernelDtype for f64 {
    fn from_f64(x: f64) -> Self {
        x
    }
}
