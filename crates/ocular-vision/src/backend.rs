use crate::{ModelSource, Session, VisionError};

/// Loads pretrained models into runnable sessions.
///
/// The seam between the pipeline and the inference runtime: production uses
/// `OnnxBackend`, tests use `MockBackend`.
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, VisionError>;
}
