use crate::{Backend, ModelSource, Session, VisionError};
use ocular_base::Tensor;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Backend returning canned outputs, for tests and dry runs.
///
/// `load_model` still honors file-based sources: a missing model file is a
/// `ModelLoad` error, so asset-resolution and retry paths behave exactly as
/// they do with a real runtime.
pub struct MockBackend {
    outputs: Vec<(String, Tensor<f32>)>,
    loads: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Creates a mock whose sessions return clones of `outputs` on every
    /// run, with output names in the given order.
    pub fn new(outputs: Vec<(String, Tensor<f32>)>) -> Self {
        Self {
            outputs,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `load_model` calls, usable after the backend has
    /// been boxed away.
    pub fn load_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.loads)
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, VisionError> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        if let ModelSource::File(path) = &model {
            if !path.is_file() {
                return Err(VisionError::ModelLoad(format!(
                    "model asset not found: {}",
                    path.display()
                )));
            }
        }

        Ok(Box::new(MockSession {
            outputs: self.outputs.clone(),
            input_names: vec!["input".to_string()],
            output_names: self.outputs.iter().map(|(name, _)| name.clone()).collect(),
        }))
    }
}

pub struct MockSession {
    outputs: Vec<(String, Tensor<f32>)>,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for MockSession {
    fn run(
        &mut self,
        _inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, VisionError> {
        Ok(self
            .outputs
            .iter()
            .map(|(name, tensor)| (name.clone(), tensor.clone()))
            .collect())
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
