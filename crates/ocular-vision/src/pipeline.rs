use crate::{Analyzer, Mode, Router, VisionError};
use log::{debug, warn};
use ocular_camera::FrameSource;
use ocular_image::Frame;
use std::path::Path;
use tokio::sync::watch;

/// Creates the frame channel feeding a live pipeline.
///
/// A `watch` channel holds only the most recent value: a frame arriving
/// while an inference is in flight overwrites the pending one, which is the
/// keep-latest backpressure policy. Nothing ever queues.
pub fn frame_channel() -> (watch::Sender<Option<Frame>>, watch::Receiver<Option<Frame>>) {
    watch::channel(None)
}

/// Creates the mode channel for a live pipeline.
///
/// The pipeline re-reads the current mode before each frame, so a switch
/// takes effect lazily at the next frame; an in-flight inference is never
/// interrupted.
pub fn mode_channel(initial: Mode) -> (watch::Sender<Mode>, watch::Receiver<Mode>) {
    watch::channel(initial)
}

/// Forwards frames from a source into a pipeline's frame channel.
///
/// Runs until the source fails terminally or the pipeline is gone. Source
/// errors on individual frames are logged and skipped; the stream keeps
/// going, since a live feed recovers on the next frame.
pub async fn pump<S: FrameSource>(mut source: S, frames: watch::Sender<Option<Frame>>) {
    loop {
        match source.recv().await {
            Ok(frame) => {
                if frames.send(Some(frame)).is_err() {
                    debug!("pipeline closed, stopping frame pump");
                    break;
                }
            }
            Err(e) => {
                warn!("frame source error: {e}");
                if frames.is_closed() {
                    break;
                }
                if matches!(e, ocular_camera::SourceError::Channel(_)) {
                    // The source's capture thread is gone; no more frames.
                    break;
                }
            }
        }
    }
}

/// Live-frame inference loop.
///
/// One inference is in flight at a time: the loop takes the latest frame,
/// lazily reconfigures the analyzer if the requested mode changed, runs the
/// synchronous inference, and routes the outcome. Frames that arrived in
/// the meantime were collapsed to the newest one by the watch channel.
pub struct LivePipeline {
    analyzer: Analyzer,
    router: Router,
    frames: watch::Receiver<Option<Frame>>,
    mode: watch::Receiver<Mode>,
}

impl LivePipeline {
    pub fn new(
        analyzer: Analyzer,
        router: Router,
        frames: watch::Receiver<Option<Frame>>,
        mode: watch::Receiver<Mode>,
    ) -> Self {
        Self {
            analyzer,
            router,
            frames,
            mode,
        }
    }

    /// Runs until the frame sender is dropped.
    pub async fn run(mut self) {
        while self.frames.changed().await.is_ok() {
            let Some(frame) = self.frames.borrow_and_update().clone() else {
                continue;
            };

            let mode = *self.mode.borrow();
            if let Err(e) = self.analyzer.configure(mode) {
                self.router.route_error(mode, &e.to_string());
                continue;
            }

            match self.analyzer.analyze(frame) {
                Ok(analysis) => self.router.route(analysis),
                Err(e) => self.router.route_error(mode, &e.to_string()),
            }
        }
        debug!("frame channel closed, live pipeline done");
    }
}

/// One-shot analysis of a static image at `path`.
///
/// Configures the analyzer for `mode`, decodes the image (rotation 0 —
/// picked and captured files are already upright), runs it through the
/// model, and delivers the outcome. Exactly one listener callback fires.
/// Callers run this off their interactive thread; it blocks for the full
/// inference.
pub fn analyze_still(analyzer: &mut Analyzer, router: &Router, mode: Mode, path: &Path) {
    let outcome = (|| -> Result<_, VisionError> {
        analyzer.configure(mode)?;
        let frame = ocular_image::load_image(path)?;
        analyzer.analyze(frame)
    })();

    match outcome {
        Ok(analysis) => router.route(analysis),
        Err(e) => router.route_error(mode, &e.to_string()),
    }
}
