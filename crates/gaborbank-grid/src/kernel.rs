use std::ops;

use num_traits::NumCast;

use crate::{dtype::DefaultDtype, error::GridError};

/// Kernel size in cells
///
/// A struct to represent the requested size of a kernel.
///
/// # Examples
///
/// ```
/// use gaborbank_grid::KernelSize;
///
/// let size = KernelSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelSize {
    /// Width of the kernel in cells (number of columns)
    pub width: usize,
    /// Height of the kernel in cells (number of rows)
    pub height: usize,
}

impl KernelSize {
    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of cells in a kernel of this size.
    pub fn numel(&self) -> usize {
        self.width * self.height
    }

    /// The `[row, col]` of the center cell, using integer truncation.
    ///
    /// For even sizes this is the cell just after the geometric center.
    pub fn center(&self) -> [usize; 2] {
        [self.height / 2, self.width / 2]
    }
}

impl std::fmt::Display for KernelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "KernelSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for KernelSize {
    fn from(size: [usize; 2]) -> Self {
        KernelSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<KernelSize> for [usize; 2] {
    fn from(size: KernelSize) -> Self {
        [size.height, size.width]
    }
}

/// A dense, row-major 2D grid of filter coefficients.
///
/// The grid has shape `[height, width]`. It is built once and never mutated
/// afterwards: there is no public mutable access to the data.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel<T = DefaultDtype> {
    data: Vec<T>,
    shape: [usize; 2],
}

impl<T> Kernel<T> {
    /// Create a new kernel from row-major data.
    ///
    /// # Arguments
    ///
    /// * `shape` - The `[rows, cols]` shape of the kernel.
    /// * `data` - The coefficients in row-major order.
    ///
    /// # Errors
    ///
    /// If the data length does not match the shape, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use gaborbank_grid::Kernel;
    ///
    /// let k = Kernel::from_shape_vec([2, 2], vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(k.shape(), [2, 2]);
    /// ```
    pub fn from_shape_vec(shape: [usize; 2], data: Vec<T>) -> Result<Self, GridError> {
        let numel = shape[0] * shape[1];
        if numel != data.len() {
            return Err(GridError::InvalidShape {
                expected: numel,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Create a new kernel with the given size and a function to generate the data.
    ///
    /// The function `f` is called once per cell with its `[row, col]` index, in
    /// row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use gaborbank_grid::Kernel;
    ///
    /// let k = Kernel::<f64>::from_shape_fn([2, 2].into(), |[r, c]| (r * 2 + c) as f64);
    /// assert_eq!(k.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
    /// ```
    pub fn from_shape_fn<F>(size: KernelSize, f: F) -> Self
    where
        F: Fn([usize; 2]) -> T,
    {
        let (rows, cols) = (size.height, size.width);
        let data = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| [r, c]))
            .map(f)
            .collect();
        Self {
            data,
            shape: [rows, cols],
        }
    }

    /// Create a new kernel filled with a single value.
    pub fn from_size_val(size: KernelSize, val: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: vec![val; size.numel()],
            shape: [size.height, size.width],
        }
    }

    /// The `[rows, cols]` shape of the kernel.
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// The size of the kernel.
    pub fn size(&self) -> KernelSize {
        KernelSize {
            width: self.shape[1],
            height: self.shape[0],
        }
    }

    /// Number of rows (the kernel height).
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Number of columns (the kernel width).
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape[1]
    }

    /// Number of coefficients in the kernel.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Get the coefficient at `[row, col]`, or `None` if out of bounds.
    pub fn get(&self, index: [usize; 2]) -> Option<&T> {
        let [r, c] = index;
        if r >= self.shape[0] || c >= self.shape[1] {
            return None;
        }
        self.data.get(r * self.shape[1] + c)
    }

    /// The coefficients as a row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the kernel and return its row-major coefficients.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over the coefficients in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate over the rows of the kernel.
    pub fn rows_iter(&self) -> std::slice::ChunksExact<'_, T> {
        // a zero-width kernel has no coefficients; chunk by one to avoid a zero chunk size
        self.data.chunks_exact(self.shape[1].max(1))
    }

    /// Apply a function to every coefficient and return the resulting kernel.
    ///
    /// # Example
    ///
    /// ```
    /// use gaborbank_grid::Kernel;
    ///
    /// let k = Kernel::from_shape_vec([1, 3], vec![1.0f64, 2.0, 3.0]).unwrap();
    /// let k2 = k.map(|x| *x * 2.0);
    /// assert_eq!(k2.as_slice(), &[2.0, 4.0, 6.0]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Kernel<U>
    where
        F: Fn(&T) -> U,
    {
        Kernel {
            data: self.data.iter().map(f).collect(),
            shape: self.shape,
        }
    }

    /// Combine two kernels of identical shape cell by cell.
    ///
    /// # Errors
    ///
    /// If the shapes differ, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use gaborbank_grid::Kernel;
    ///
    /// let a = Kernel::from_shape_vec([1, 2], vec![2.0f32, 3.0]).unwrap();
    /// let b = Kernel::from_shape_vec([1, 2], vec![4.0f32, 5.0]).unwrap();
    /// let c = a.element_wise_op(&b, |x, y| *x * *y).unwrap();
    /// assert_eq!(c.as_slice(), &[8.0, 15.0]);
    /// ```
    pub fn element_wise_op<U, V, F>(&self, other: &Kernel<U>, op: F) -> Result<Kernel<V>, GridError>
    where
        F: Fn(&T, &U) -> V,
    {
        if self.shape != other.shape {
            return Err(GridError::DimensionMismatch {
                expected: self.shape,
                actual: other.shape,
            });
        }

        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| op(a, b))
            .collect();

        Ok(Kernel {
            data,
            shape: self.shape,
        })
    }

    /// Convert the kernel to another numeric element type.
    ///
    /// # Errors
    ///
    /// If a coefficient cannot be represented in the target type, an error is returned.
    pub fn cast<U>(&self) -> Result<Kernel<U>, GridError>
    where
        T: NumCast + Copy,
        U: NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(GridError::CastError))
            .collect::<Result<Vec<U>, _>>()?;

        Ok(Kernel {
            data,
            shape: self.shape,
        })
    }
}

impl<T> ops::Index<[usize; 2]> for Kernel<T> {
    type Output = T;

    fn index(&self, index: [usize; 2]) -> &Self::Output {
        let [r, c] = index;
        assert!(
            r < self.shape[0] && c < self.shape[1],
            "index {index:?} out of bounds for kernel of shape {:?}",
            self.shape
        );
        &self.data[r * self.shape[1] + c]
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Kernel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.rows_iter() {
            let line = row
                .iter()
                .map(|v| format!("{v:>10.6}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
