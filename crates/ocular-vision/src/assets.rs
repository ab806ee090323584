use crate::{Mode, ModelSource, VisionError};
use log::debug;
use std::path::{Path, PathBuf};

/// A model asset resolved to loadable bytes plus its label list.
#[derive(Debug)]
pub struct ResolvedModel {
    pub source: ModelSource,
    pub labels: Vec<String>,
}

/// Resolves inference modes to bundled pretrained-model assets.
///
/// Each mode maps to a model file in the assets directory with a sidecar
/// label list named `<stem>_labels.txt`, one label per line.
#[derive(Debug, Clone)]
pub struct ModelAssets {
    dir: PathBuf,
}

impl ModelAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the model asset for `mode`.
    ///
    /// # Errors
    ///
    /// `VisionError::Config` for `Mode::Unknown`; `VisionError::ModelLoad`
    /// with a human-readable message if the model or label file is missing.
    /// Load errors are recoverable: once the asset is in place, resolving
    /// again succeeds.
    pub fn resolve(&self, mode: Mode) -> Result<ResolvedModel, VisionError> {
        let asset = mode
            .model_asset()
            .ok_or_else(|| VisionError::Config("unknown inference mode".to_string()))?;

        let model_path = self.dir.join(asset);
        if !model_path.is_file() {
            return Err(VisionError::ModelLoad(format!(
                "model asset '{}' not found in {}",
                asset,
                self.dir.display()
            )));
        }

        let labels = self.load_labels(asset)?;
        debug!(
            "resolved {} -> {} ({} labels)",
            mode,
            model_path.display(),
            labels.len()
        );

        Ok(ResolvedModel {
            source: ModelSource::File(model_path),
            labels,
        })
    }

    fn load_labels(&self, asset: &str) -> Result<Vec<String>, VisionError> {
        let stem = asset.rsplit_once('.').map_or(asset, |(stem, _)| stem);
        let labels_path = self.dir.join(format!("{stem}_labels.txt"));

        let text = std::fs::read_to_string(&labels_path).map_err(|e| {
            VisionError::ModelLoad(format!(
                "label list '{}' unreadable: {}",
                labels_path.display(),
                e
            ))
        })?;

        let labels: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if labels.is_empty() {
            return Err(VisionError::ModelLoad(format!(
                "label list '{}' is empty",
                labels_path.display()
            )));
        }

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_asset(dir: &Path, mode: Mode, labels: &str) {
        let asset = mode.model_asset().unwrap();
        std::fs::write(dir.join(asset), b"model bytes").unwrap();
        let stem = asset.strip_suffix(".onnx").unwrap();
        std::fs::write(dir.join(format!("{stem}_labels.txt")), labels).unwrap();
    }

    #[test]
    fn test_resolve_unknown_is_config_error() {
        let assets = ModelAssets::new("/nowhere");
        let err = assets.resolve(Mode::Unknown).unwrap_err();
        assert!(matches!(err, VisionError::Config(_)));
    }

    #[test]
    fn test_resolve_missing_model_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let assets = ModelAssets::new(dir.path());
        let err = assets.resolve(Mode::Classification).unwrap_err();
        match err {
            VisionError::ModelLoad(msg) => assert!(msg.contains("mobilenet_v1.onnx")),
            other => panic!("expected ModelLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_reads_labels() {
        let dir = tempfile::tempdir().unwrap();
        write_asset(dir.path(), Mode::Detection, "person\n car \n\nbicycle\n");

        let assets = ModelAssets::new(dir.path());
        let resolved = assets.resolve(Mode::Detection).unwrap();
        assert_eq!(resolved.labels, vec!["person", "car", "bicycle"]);
        assert!(matches!(resolved.source, ModelSource::File(_)));
    }

    #[test]
    fn test_resolve_missing_labels_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(Mode::Classification.model_asset().unwrap()),
            b"model bytes",
        )
        .unwrap();

        let assets = ModelAssets::new(dir.path());
        let err = assets.resolve(Mode::Classification).unwrap_err();
        assert!(matches!(err, VisionError::ModelLoad(_)));
    }
}
