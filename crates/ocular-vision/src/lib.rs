//! On-device vision inference pipeline.
//!
//! Takes frames from a capture source or static image files, preprocesses
//! them (rotation correction, resize, normalization), runs them through a
//! pretrained classification or detection model, and routes results to
//! listener callbacks. Inference is delegated to ONNX Runtime behind the
//! `Backend`/`Session` seam; a mock backend covers tests.

pub mod analyzer;
pub mod assets;
pub mod backend;
pub mod backends;
pub mod classifier;
pub mod detector;
pub mod error;
pub mod mode;
pub mod modelsource;
pub mod pipeline;
pub mod preprocess;
pub mod router;
pub mod session;

pub use analyzer::{Analysis, Analyzer, AnalyzerConfig};
pub use assets::{ModelAssets, ResolvedModel};
pub use backend::Backend;
pub use backends::{MockBackend, OnnxBackend};
pub use classifier::{Category, ImageClassifier};
pub use detector::{Detection, ObjectDetector};
pub use error::VisionError;
pub use mode::Mode;
pub use modelsource::ModelSource;
pub use pipeline::{analyze_still, frame_channel, mode_channel, pump, LivePipeline};
pub use preprocess::preprocess;
pub use router::{ClassifierListener, DetectorListener, Router};
pub use session::Session;
