/// An error type for grid construction and element-wise operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GridError {
    /// The data length does not match the requested shape.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Number of elements implied by the shape.
        expected: usize,
        /// Number of elements provided.
        actual: usize,
    },

    /// Two grids taking part in an element-wise operation have different shapes.
    #[error("Dimension mismatch: expected shape {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Shape of the left-hand grid.
        expected: [usize; 2],
        /// Shape of the right-hand grid.
        actual: [usize; 2],
    },

    /// A value could not be represented in the target element type.
    #[error("Type cast failed: source data cannot be converted to target type")]
    CastError,
}
