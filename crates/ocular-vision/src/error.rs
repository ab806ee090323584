use std::fmt;

#[derive(Debug)]
pub enum VisionError {
    /// Caller misconfiguration, e.g. selecting the Unknown mode. Fails fast.
    Config(String),
    /// Model asset missing or unloadable. Recoverable: reconfigure and retry.
    ModelLoad(String),
    Shape { expected: String, got: String },
    Backend(String),
    Image(ocular_image::ImageError),
    Source(ocular_camera::SourceError),
    Tensor(ocular_base::TensorError),
}

impl fmt::Display for VisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionError::Config(msg) => write!(f, "configuration error: {msg}"),
            VisionError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            VisionError::Shape { expected, got } => {
                write!(f, "shape error: expected {expected}, got {got}")
            }
            VisionError::Backend(msg) => write!(f, "backend error: {msg}"),
            VisionError::Image(err) => write!(f, "image error: {err}"),
            VisionError::Source(err) => write!(f, "source error: {err}"),
            VisionError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for VisionError {}

impl From<ocular_image::ImageError> for VisionError {
    fn from(err: ocular_image::ImageError) -> Self {
        VisionError::Image(err)
    }
}

impl From<ocular_camera::SourceError> for VisionError {
    fn from(err: ocular_camera::SourceError) -> Self {
        VisionError::Source(err)
    }
}

impl From<ocular_base::TensorError> for VisionError {
    fn from(err: ocular_base::TensorError) -> Self {
        VisionError::Tensor(err)
    }
}
