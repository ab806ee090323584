mod mock;
mod onnx;

pub use mock::{MockBackend, MockSession};
pub use onnx::{OnnxBackend, OnnxSession};
