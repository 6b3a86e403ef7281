use crate::{
    dtype::KernelDtype,
    kernel::{Kernel, KernelSize},
};

/// Sample `len` unit-spaced coordinates over `[-len/2, len/2)`, divided by `norm`.
fn centered_axis<T: KernelDtype>(len: usize, norm: usize) -> Vec<T> {
    let half = len as f64 / 2.0;
    let norm = norm as f64;
    (0..len)
        .map(|i| T::from_f64((i as f64 - half) / norm))
        .collect()
}

/// Create a meshgrid of x and y coordinates centered at the origin
///
/// The horizontal coordinates span `[-cols/2, cols/2)` with unit steps and are
/// divided by `norm_x`; the vertical ones span `[-rows/2, rows/2)` and are
/// divided by `norm_y`. Half sizes are real-valued, so odd sizes do not contain
/// an exact zero coordinate.
///
/// # Arguments
///
/// * `size` - The size of the grid.
/// * `norm_x` - The divisor applied to the horizontal coordinates. Must be non-zero.
/// * `norm_y` - The divisor applied to the vertical coordinates. Must be non-zero.
///
/// # Returns
///
/// A tuple of 2D kernels of shape `[rows, cols]` holding the x and y coordinates.
///
/// # Example
///
/// ```
/// use gaborbank_grid::{centered_meshgrid, KernelSize};
///
/// let size = KernelSize { width: 4, height: 2 };
/// let (x, y) = centered_meshgrid::<f32>(size, 4, 2);
///
/// assert_eq!(x.as_slice(), &[-0.5, -0.25, 0.0, 0.25, -0.5, -0.25, 0.0, 0.25]);
/// assert_eq!(y.as_slice(), &[-0.5, -0.5, -0.5, -0.5, 0.0, 0.0, 0.0, 0.0]);
/// ```
pub fn centered_meshgrid<T: KernelDtype>(
    size: KernelSize,
    norm_x: usize,
    norm_y: usize,
) -> (Kernel<T>, Kernel<T>) {
    let xs = centered_axis::<T>(size.width, norm_x);
    let ys = centered_axis::<T>(size.height, norm_y);

    let map_x = Kernel::from_shape_fn(size, |[_, c]| xs[c]);
    let map_y = Kernel::from_shape_fn(size, |[r, _]| ys[r]);

    (map_x, map_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_axis_odd() {
        let xs = centered_axis::<f64>(5, 1);
        assert_eq!(xs, vec![-2.5, -1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn test_centered_axis_even() {
        let xs = centered_axis::<f64>(4, 4);
        assert_eq!(xs, vec![-0.5, -0.25, 0.0, 0.25]);
    }

    #[test]
    fn test_meshgrid_shape() {
        let size = KernelSize {
            width: 7,
            height: 3,
        };
        let (x, y) = centered_meshgrid::<f32>(size, 3, 3);
        assert_eq!(x.shape(), [3, 7]);
        assert_eq!(y.shape(), [3, 7]);

        // x varies along the columns only, y along the rows only
        for row in x.rows_iter() {
            assert_eq!(row, x.rows_iter().next().unwrap());
        }
        for (r, row) in y.rows_iter().enumerate() {
            assert!(row.iter().all(|v| *v == y[[r, 0]]));
        }
    }
}
