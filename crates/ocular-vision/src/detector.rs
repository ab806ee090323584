use crate::classifier::first_name;
use crate::{Session, VisionError};
use ocular_base::{Rect, Tensor};

/// A located object: bounding box, label, and confidence score.
///
/// Boxes are in input-tensor pixel coordinates; the result callback carries
/// the tensor dimensions so callers can rescale onto their display surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub rect: Rect,
    pub label: String,
    pub score: f32,
}

/// Object detector over a loaded session.
///
/// Expects the detection-model output signature: boxes `[1, N, 4]` as
/// (ymin, xmin, ymax, xmax), class indices `[1, N]`, scores `[1, N]`, and a
/// valid-detection count `[1]`, in that output order.
pub struct ObjectDetector {
    session: Box<dyn Session>,
    labels: Vec<String>,
    score_threshold: f32,
    max_results: usize,
}

impl ObjectDetector {
    pub(crate) fn new(
        session: Box<dyn Session>,
        labels: Vec<String>,
        score_threshold: f32,
        max_results: usize,
    ) -> Self {
        Self {
            session,
            labels,
            score_threshold,
            max_results,
        }
    }

    /// Runs the model on a preprocessed input and returns detections at or
    /// above the score threshold, capped at the configured maximum.
    pub fn detect(&mut self, input: &Tensor<f32>) -> Result<Vec<Detection>, VisionError> {
        let input_name = first_name(self.session.input_names(), "input")?;
        let outputs = self.session.run(&[(input_name.as_str(), input.clone())])?;

        let names = self.session.output_names();
        if names.len() < 4 {
            return Err(VisionError::Backend(format!(
                "detection model must have 4 outputs (boxes, classes, scores, count), got {}",
                names.len()
            )));
        }
        let fetch = |name: &String| {
            outputs
                .get(name)
                .ok_or_else(|| VisionError::Backend(format!("missing output '{name}'")))
        };
        let boxes = fetch(&names[0])?;
        let classes = fetch(&names[1])?;
        let scores = fetch(&names[2])?;
        let count = fetch(&names[3])?;

        if boxes.shape.len() != 3 || boxes.shape[2] != 4 {
            return Err(VisionError::Shape {
                expected: "[1, N, 4] boxes".to_string(),
                got: format!("{:?}", boxes.shape),
            });
        }
        let capacity = boxes.shape[1];
        if classes.len() < capacity || scores.len() < capacity {
            return Err(VisionError::Shape {
                expected: format!("{capacity} classes and scores"),
                got: format!("{} classes, {} scores", classes.len(), scores.len()),
            });
        }

        let valid = count
            .data
            .first()
            .map_or(capacity, |&n| (n as usize).min(capacity));

        // Detection models emit score-descending order; the threshold and
        // cap preserve it.
        let mut detections = Vec::new();
        for i in 0..valid {
            let score = scores.data[i];
            if score < self.score_threshold {
                continue;
            }

            let class_index = classes.data[i] as usize;
            let label = self
                .labels
                .get(class_index)
                .cloned()
                .unwrap_or_else(|| format!("class {class_index}"));

            let (ymin, xmin, ymax, xmax) = (
                boxes.data[i * 4],
                boxes.data[i * 4 + 1],
                boxes.data[i * 4 + 2],
                boxes.data[i * 4 + 3],
            );

            detections.push(Detection {
                rect: Rect::from_corners(xmin, ymin, xmax, ymax),
                label,
                score,
            });

            if detections.len() == self.max_results {
                break;
            }
        }

        Ok(detections)
    }
}
