use crate::SourceError;
use ocular_image::Frame;
use std::path::PathBuf;

/// Async source of live frames.
///
/// Implementations deliver frames at the device's capture rate, each tagged
/// with the rotation needed to bring it upright.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Receive the next frame from the source.
    async fn recv(&mut self) -> Result<Frame, SourceError>;
}

/// Source of single static images.
///
/// Mirrors the two host-side acquisition paths: picking an existing image
/// and triggering a one-shot capture. Both resolve to the location of an
/// image file; decoding is the caller's business.
pub trait StillSource {
    /// Pick an existing image and return its location.
    fn pick(&mut self) -> Result<PathBuf, SourceError>;

    /// Trigger a one-shot capture and return the resulting image location.
    fn capture(&mut self) -> Result<PathBuf, SourceError>;
}
