use std::fmt;

#[derive(Debug)]
pub enum SourceError {
    Io(String),
    Decode(String),
    Channel(String),
    Exhausted,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(msg) => write!(f, "io error: {msg}"),
            SourceError::Decode(msg) => write!(f, "decode error: {msg}"),
            SourceError::Channel(msg) => write!(f, "channel error: {msg}"),
            SourceError::Exhausted => write!(f, "source has no images"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

impl From<ocular_image::ImageError> for SourceError {
    fn from(err: ocular_image::ImageError) -> Self {
        match err {
            ocular_image::ImageError::Io(msg) => SourceError::Io(msg),
            other => SourceError::Decode(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_io_error_stays_io() {
        let err = SourceError::from(ocular_image::ImageError::Io("file vanished".to_string()));
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_image_decode_error_maps_to_decode() {
        let err = SourceError::from(ocular_image::ImageError::Decode("bad header".to_string()));
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
