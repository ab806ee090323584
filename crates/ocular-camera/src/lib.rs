//! Capture-source abstraction for the ocular pipeline.
//!
//! Defines the `FrameSource` trait for continuous live frames and the
//! `StillSource` trait for picked or one-shot-captured images, plus a
//! directory-replay backend used by tests and demos. Real camera devices,
//! permissions, and preview surfaces stay on the host side.

pub mod config;
pub mod error;
pub mod replay;
pub mod traits;

pub use config::SourceConfig;
pub use error::SourceError;
pub use replay::ReplaySource;
pub use traits::{FrameSource, StillSource};
