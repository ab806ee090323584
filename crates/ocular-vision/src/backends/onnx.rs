use crate::{Backend, ModelSource, Session, VisionError};
use log::debug;
use ndarray::ArrayD;
use ocular_base::Tensor;
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use std::collections::HashMap;

/// ONNX Runtime backend, CPU execution provider.
///
/// The vision models here are small on-device networks; CPU inference is
/// the deployment target.
pub struct OnnxBackend;

impl OnnxBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OnnxBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, VisionError> {
        let mut builder = OrtSession::builder().map_err(|e| {
            VisionError::Backend(format!("failed to create session builder: {e}"))
        })?;

        let description = model.describe();
        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                VisionError::ModelLoad(format!("failed to load model from file: {e}"))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(&bytes).map_err(|e| {
                VisionError::ModelLoad(format!("failed to load model from memory: {e}"))
            })?,
        };

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();

        debug!(
            "loaded {} (inputs: {:?}, outputs: {:?})",
            description, input_names, output_names
        );

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, VisionError> {
        // The vision models take a single image tensor.
        let [(name, tensor)] = inputs else {
            return Err(VisionError::Backend(format!(
                "expected exactly one input, got {}",
                inputs.len()
            )));
        };
        if !self.input_names.iter().any(|n| n == name) {
            return Err(VisionError::Backend(format!(
                "input '{}' not in model inputs {:?}",
                name, self.input_names
            )));
        }

        let array = tensor_to_ndarray(tensor.clone())?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| VisionError::Backend(format!("failed to create tensor ref: {e}")))?;

        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| VisionError::Backend(format!("inference failed: {e}")))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let value = &outputs[output_name.as_str()];
            let array = value.try_extract_array::<f32>().map_err(|e| {
                VisionError::Backend(format!("output '{output_name}' is not f32: {e}"))
            })?;
            result.insert(output_name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}

fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, VisionError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data)
        .map_err(|e| VisionError::Backend(format!("failed to create ndarray from tensor: {e}")))
}

fn ndarray_to_tensor(
    array: ndarray::ArrayView<'_, f32, ndarray::IxDyn>,
) -> Result<Tensor<f32>, VisionError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
