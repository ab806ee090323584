use crate::{Session, VisionError};
use ocular_base::Tensor;
use std::cmp::Ordering;

/// A label with its confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub label: String,
    pub score: f32,
}

/// Whole-image classifier over a loaded session.
///
/// Threshold and result cap are fixed at construction, matching how the
/// pretrained-model options are applied.
pub struct ImageClassifier {
    session: Box<dyn Session>,
    labels: Vec<String>,
    score_threshold: f32,
    max_results: usize,
}

impl ImageClassifier {
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

    /// Runs the model on a preprocessed input and returns the top categories
    /// at or above the score threshold, best first.
    pub fn classify(&mut self, input: &Tensor<f32>) -> Result<Vec<Category>, VisionError> {
        let input_name = first_name(self.session.input_names(), "input")?;
        let outputs = self.session.run(&[(input_name.as_str(), input.clone())])?;

        let output_name = first_name(self.session.output_names(), "output")?;
        let scores = outputs.get(&output_name).ok_or_else(|| {
            VisionError::Backend(format!("model produced no '{output_name}' output"))
        })?;

        if scores.len() != self.labels.len() {
            return Err(VisionError::Shape {
                expected: format!("{} scores (one per label)", self.labels.len()),
                got: format!("{}", scores.len()),
            });
        }

        let mut categories: Vec<Category> = self
            .labels
            .iter()
            .zip(scores.data.iter())
            .filter(|(_, score)| **score >= self.score_threshold)
            .map(|(label, score)| Category {
                label: label.clone(),
                score: *score,
            })
            .collect();

        // Stable sort keeps label order for tied scores.
        categories.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        categories.truncate(self.max_results);

        Ok(categories)
    }
}

pub(crate) fn first_name(names: &[String], kind: &str) -> Result<String, VisionError> {
    names
        .first()
        .cloned()
        .ok_or_else(|| VisionError::Backend(format!("model has no {kind}s")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MockBackend;
    use crate::{Backend, ModelSource};

    fn classifier(scores: Vec<f32>, labels: &[&str], threshold: f32, max: usize) -> ImageClassifier {
        let n = scores.len();
        let backend = MockBackend::new(vec![(
            "scores".to_string(),
            Tensor::new(vec![1, n], scores).unwrap(),
        )]);
        let session = backend.load_model(ModelSource::Memory(vec![])).unwrap();
        ImageClassifier::new(
            session,
            labels.iter().map(|s| s.to_string()).collect(),
            threshold,
            max,
        )
    }

    fn input() -> Tensor<f32> {
        Tensor::zeros(vec![1, 3, 224, 224]).unwrap()
    }

    #[test]
    fn test_classify_sorts_descending() {
        let mut c = classifier(vec![0.2, 0.9, 0.5], &["a", "b", "c"], 0.1, 3);
        let result = c.classify(&input()).unwrap();
        let labels: Vec<&str> = result.iter().map(|cat| cat.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_classify_applies_threshold_and_cap() {
        let mut c = classifier(vec![0.05, 0.9, 0.5, 0.8], &["a", "b", "c", "d"], 0.1, 2);
        let result = c.classify(&input()).unwrap();
        let labels: Vec<&str> = result.iter().map(|cat| cat.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d"]);
    }

    #[test]
    fn test_classify_ties_keep_label_order() {
        let mut c = classifier(vec![0.5, 0.5, 0.5], &["a", "b", "c"], 0.1, 3);
        let result = c.classify(&input()).unwrap();
        let labels: Vec<&str> = result.iter().map(|cat| cat.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_classify_empty_when_all_below_threshold() {
        let mut c = classifier(vec![0.01, 0.02], &["a", "b"], 0.1, 3);
        assert!(c.classify(&input()).unwrap().is_empty());
    }

    #[test]
    fn test_classify_rejects_label_count_mismatch() {
        let mut c = classifier(vec![0.1, 0.2, 0.3], &["a", "b"], 0.1, 3);
        assert!(matches!(
            c.classify(&input()),
            Err(VisionError::Shape { .. })
        ));
    }
}
