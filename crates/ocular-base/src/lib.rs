//! Foundation types for the ocular vision pipeline.
//!
//! Provides the `Tensor<T>` pixel/score container, the `Rect` bounding box,
//! and logging setup shared by the other ocular crates.

pub mod logging;
pub mod rect;
pub mod tensor;

pub use logging::{init_stdout_logger, StdoutLogger};
pub use rect::Rect;
pub use tensor::{Tensor, TensorError};

// Re-export log so downstream crates can use ocular_base::log::*
pub use log;
