use std::fmt;

/// Which model runs on incoming images.
///
/// `Unknown` is the unset state; configuring it is a caller error and fails
/// fast rather than silently falling back to either model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Classification,
    Detection,
    Unknown,
}

impl Mode {
    /// Parses a mode name, case-insensitively. Anything unrecognized maps
    /// to `Unknown`, which downstream configuration rejects.
    pub fn parse(name: &str) -> Mode {
        match name.to_ascii_lowercase().as_str() {
            "classification" | "image_classification" => Mode::Classification,
            "detection" | "object_detection" => Mode::Detection,
            _ => Mode::Unknown,
        }
    }

    pub fn pretty_name(&self) -> &'static str {
        match self {
            Mode::Classification => "Image Classification",
            Mode::Detection => "Object Detection",
            Mode::Unknown => "Unknown",
        }
    }

    /// File name of the pretrained model asset backing this mode, or `None`
    /// for `Unknown`.
    pub fn model_asset(&self) -> Option<&'static str> {
        match self {
            Mode::Classification => Some("mobilenet_v1.onnx"),
            Mode::Detection => Some("efficientdet_lite0.onnx"),
            Mode::Unknown => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pretty_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(Mode::parse("classification"), Mode::Classification);
        assert_eq!(Mode::parse("IMAGE_CLASSIFICATION"), Mode::Classification);
        assert_eq!(Mode::parse("Object_Detection"), Mode::Detection);
        assert_eq!(Mode::parse("detection"), Mode::Detection);
    }

    #[test]
    fn test_parse_unknown_names() {
        assert_eq!(Mode::parse(""), Mode::Unknown);
        assert_eq!(Mode::parse("segmentation"), Mode::Unknown);
    }

    #[test]
    fn test_unknown_has_no_asset() {
        assert!(Mode::Unknown.model_asset().is_none());
        assert!(Mode::Classification.model_asset().is_some());
        assert!(Mode::Detection.model_asset().is_some());
    }
}
