use crate::preprocess::preprocess;
use crate::{
    Category, Detection, ImageClassifier, Mode, ModelAssets, ObjectDetector, VisionError,
};
use crate::backend::Backend;
use log::info;
use ocular_image::Frame;
use std::path::PathBuf;
use std::time::Instant;

/// Fixed inference settings, applied when a model is constructed.
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    score_threshold: f32,
    max_results: usize,
    input_size: usize,
    assets_dir: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.1,
            max_results: 3,
            input_size: 224,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_score_threshold(mut self, score_threshold: f32) -> Self {
        self.score_threshold = score_threshold;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    pub fn with_assets_dir(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = assets_dir.into();
        self
    }

    pub fn score_threshold(&self) -> f32 {
        self.score_threshold
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn assets_dir(&self) -> &std::path::Path {
        &self.assets_dir
    }
}

/// Result of one inference call, with elapsed wall-clock milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Classification {
        categories: Vec<Category>,
        elapsed_ms: u64,
    },
    Detection {
        detections: Vec<Detection>,
        elapsed_ms: u64,
        image_height: usize,
        image_width: usize,
    },
}

// Exactly one model is live at a time; the other mode's model is never
// constructed until a switch.
enum ActiveModel {
    Idle,
    Classifier(ImageClassifier),
    Detector(ObjectDetector),
}

/// Runs frames through the model selected by the configured mode.
///
/// `analyze` is synchronous and CPU-bound, and instances are not internally
/// locked: callers keep at most one inference in flight per analyzer (the
/// live pipeline serializes by construction).
pub struct Analyzer {
    config: AnalyzerConfig,
    assets: ModelAssets,
    backend: Box<dyn Backend>,
    active: ActiveModel,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig, backend: Box<dyn Backend>) -> Self {
        let assets = ModelAssets::new(config.assets_dir());
        Self {
            config,
            assets,
            backend,
            active: ActiveModel::Idle,
        }
    }

    /// Mode of the currently live model, if any.
    pub fn mode(&self) -> Option<Mode> {
        match self.active {
            ActiveModel::Idle => None,
            ActiveModel::Classifier(_) => Some(Mode::Classification),
            ActiveModel::Detector(_) => Some(Mode::Detection),
        }
    }

    /// Selects and lazily constructs the model for `mode`.
    ///
    /// A no-op when that mode's model is already live; switching modes drops
    /// the old model and builds the new one.
    ///
    /// # Errors
    ///
    /// `VisionError::Config` for `Mode::Unknown` (fails fast, nothing is
    /// constructed); `VisionError::ModelLoad` if the asset cannot be loaded.
    /// Load failures leave the analyzer unconfigured but usable: a later
    /// retry succeeds once the asset is present.
    pub fn configure(&mut self, mode: Mode) -> Result<(), VisionError> {
        if mode == Mode::Unknown {
            return Err(VisionError::Config(
                "unknown inference mode; choose classification or detection".to_string(),
            ));
        }
        if self.mode() == Some(mode) {
            return Ok(());
        }

        self.active = ActiveModel::Idle;
        let resolved = self.assets.resolve(mode)?;
        let session = self.backend.load_model(resolved.source)?;

        self.active = match mode {
            Mode::Classification => ActiveModel::Classifier(ImageClassifier::new(
                session,
                resolved.labels,
                self.config.score_threshold(),
                self.config.max_results(),
            )),
            Mode::Detection => ActiveModel::Detector(ObjectDetector::new(
                session,
                resolved.labels,
                self.config.score_threshold(),
                self.config.max_results(),
            )),
            Mode::Unknown => unreachable!("rejected above"),
        };

        info!("configured {} on the {} backend", mode, self.backend.name());
        Ok(())
    }

    /// Preprocesses a frame and runs it through the live model.
    ///
    /// # Errors
    ///
    /// `VisionError::Config` if no model is configured; otherwise
    /// preprocessing or backend errors.
    pub fn analyze(&mut self, frame: Frame) -> Result<Analysis, VisionError> {
        // Rejected before any per-frame preprocessing work.
        if matches!(self.active, ActiveModel::Idle) {
            return Err(VisionError::Config(
                "analyzer is not configured".to_string(),
            ));
        }

        let input_size = self.config.input_size();
        let input = preprocess(frame, input_size)?;

        match &mut self.active {
            ActiveModel::Idle => Err(VisionError::Config(
                "analyzer is not configured".to_string(),
            )),
            ActiveModel::Classifier(classifier) => {
                let started = Instant::now();
                let categories = classifier.classify(&input)?;
                Ok(Analysis::Classification {
                    categories,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                })
            }
            ActiveModel::Detector(detector) => {
                let started = Instant::now();
                let detections = detector.detect(&input)?;
                Ok(Analysis::Detection {
                    detections,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    image_height: input_size,
                    image_width: input_size,
                })
            }
        }
    }
}
