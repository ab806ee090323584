use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Dense n-dimensional array with a flat row-major buffer.
///
/// Image tensors use HWC layout `[height, width, channels]`; model inputs
/// use NCHW `[1, channels, height, width]`.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Data can be megabytes of pixels; only print the shape.
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    let mut product: usize = 1;
    for &dim in shape {
        product = product.checked_mul(dim).ok_or(TensorError::ShapeOverflow)?;
    }
    Ok(product)
}

impl<T> Tensor<T> {
    /// Creates a tensor, validating that `data` holds exactly as many
    /// elements as `shape` describes.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let count = element_count(&shape)?;
        Ok(Self {
            shape,
            data: vec![T::default(); count],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_shape() {
        let t = Tensor::new(vec![2, 3], vec![0u8; 6]).unwrap();
        assert_eq!(t.ndim(), 2);
        assert_eq!(t.len(), 6);
        assert!(!t.is_empty());
    }

    #[test]
    fn test_new_rejects_mismatched_data() {
        let err = Tensor::new(vec![2, 3], vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeMismatch {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn test_new_rejects_overflowing_shape() {
        let err = Tensor::<u8>::new(vec![usize::MAX, 2], vec![]).unwrap_err();
        assert_eq!(err, TensorError::ShapeOverflow);
    }

    #[test]
    fn test_zeros() {
        let t = Tensor::<f32>::zeros(vec![1, 3, 4, 4]).unwrap();
        assert_eq!(t.len(), 48);
        assert!(t.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_shape_dimension() {
        let t = Tensor::<u8>::new(vec![0, 4, 3], vec![]).unwrap();
        assert!(t.is_empty());
    }
}
