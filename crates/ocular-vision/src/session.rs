use crate::VisionError;
use ocular_base::Tensor;
use std::collections::HashMap;

/// A loaded model ready to run.
///
/// `run` is synchronous and CPU-bound. Sessions are not internally locked;
/// callers keep at most one inference in flight per session.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, VisionError>;

    fn input_names(&self) -> &[String];

    fn output_names(&self) -> &[String];
}
