use crate::{Analysis, Category, Detection, Mode};
use log::{error, warn};
use std::cmp::Ordering;

/// Receives classification outcomes.
///
/// Exactly one of `on_error`/`on_results` fires per inference attempt.
/// `on_results(None, ..)` is the explicit "no result" signal, distinct from
/// an error.
pub trait ClassifierListener: Send {
    fn on_error(&self, message: &str);
    fn on_results(&self, categories: Option<&[Category]>, elapsed_ms: u64);
}

/// Receives detection outcomes, with the dimensions of the tensor the boxes
/// are relative to so callers can scale them onto their display surface.
pub trait DetectorListener: Send {
    fn on_error(&self, message: &str);
    fn on_results(
        &self,
        detections: Option<&[Detection]>,
        elapsed_ms: u64,
        image_height: usize,
        image_width: usize,
    );
}

/// Forwards analyses and errors to the registered listeners.
///
/// This is the single result-delivery seam: whoever drives the pipeline
/// decides which thread or task the callbacks run on, away from the
/// frame-capture path.
#[derive(Default)]
pub struct Router {
    classifier: Option<Box<dyn ClassifierListener>>,
    detector: Option<Box<dyn DetectorListener>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier_listener(mut self, listener: Box<dyn ClassifierListener>) -> Self {
        self.classifier = Some(listener);
        self
    }

    pub fn with_detector_listener(mut self, listener: Box<dyn DetectorListener>) -> Self {
        self.detector = Some(listener);
        self
    }

    /// Delivers one analysis to the matching listener.
    ///
    /// Classification categories are stably sorted descending by score
    /// before delivery (ties keep their original order); detections are
    /// forwarded unchanged. Empty result lists deliver `None`.
    pub fn route(&self, analysis: Analysis) {
        match analysis {
            Analysis::Classification {
                mut categories,
                elapsed_ms,
            } => {
                let Some(listener) = &self.classifier else {
                    warn!("classification result dropped: no listener registered");
                    return;
                };
                if categories.is_empty() {
                    listener.on_results(None, elapsed_ms);
                } else {
                    categories.sort_by(|a, b| {
                        b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
                    });
                    listener.on_results(Some(&categories), elapsed_ms);
                }
            }
            Analysis::Detection {
                detections,
                elapsed_ms,
                image_height,
                image_width,
            } => {
                let Some(listener) = &self.detector else {
                    warn!("detection result dropped: no listener registered");
                    return;
                };
                if detections.is_empty() {
                    listener.on_results(None, elapsed_ms, image_height, image_width);
                } else {
                    listener.on_results(Some(&detections), elapsed_ms, image_height, image_width);
                }
            }
        }
    }

    /// Delivers an error message to the listener(s) for `mode`.
    ///
    /// Configuration errors carry `Mode::Unknown` and go to every registered
    /// listener. Nothing is silently swallowed: with no listener to notify,
    /// the message is logged at error level.
    pub fn route_error(&self, mode: Mode, message: &str) {
        let mut delivered = false;

        if mode != Mode::Detection {
            if let Some(listener) = &self.classifier {
                listener.on_error(message);
                delivered = true;
            }
        }
        if mode != Mode::Classification {
            if let Some(listener) = &self.detector {
                listener.on_error(message);
                delivered = true;
            }
        }

        if !delivered {
            error!("unrouted {} error: {}", mode, message);
        }
    }
}
