use crate::{FrameSource, SourceConfig, SourceError, StillSource};
use log::{debug, warn};
use ocular_image::{Frame, PixelFormat};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc;

type FrameResult = Result<Frame, SourceError>;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"];

/// Frame source that replays image files from a directory.
///
/// Stands in for a real camera in tests and demos: a capture thread cycles
/// through the directory at the configured fps, decoding each file and
/// tagging it with the configured rotation. Real camera backends (and their
/// lifecycle/permission handling) are host responsibilities.
pub struct ReplaySource {
    config: SourceConfig,
    files: Vec<PathBuf>,
    next_still: usize,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ReplaySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplaySource")
            .field("config", &self.config)
            .field("files", &self.files.len())
            .field("started", &self.receiver.is_some())
            .finish()
    }
}

impl ReplaySource {
    /// Create a replay source over the image files in `dir`.
    ///
    /// Files are discovered once, sorted by name for deterministic order.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` if the directory cannot be read and
    /// `SourceError::Exhausted` if it contains no image files.
    pub fn new(dir: impl AsRef<Path>, config: SourceConfig) -> Result<Self, SourceError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                    })
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(SourceError::Exhausted);
        }

        debug!(
            "replay source over {} files at {} fps",
            files.len(),
            config.fps()
        );

        Ok(Self {
            config,
            files,
            next_still: 0,
            receiver: None,
            thread_handle: None,
        })
    }

    /// Start the capture thread if not already running.
    ///
    /// Called automatically on the first `recv()`.
    fn ensure_started(&mut self) {
        if self.receiver.is_some() {
            return;
        }

        let (tx, rx) = mpsc::channel(self.config.buffer_count().max(1) as usize);
        let files = self.files.clone();
        let config = self.config.clone();

        let handle = thread::spawn(move || {
            capture_loop(&files, &config, tx);
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);
    }
}

impl FrameSource for ReplaySource {
    async fn recv(&mut self) -> Result<Frame, SourceError> {
        self.ensure_started();

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| SourceError::Channel("receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| SourceError::Channel("capture thread stopped".to_string()))?
    }
}

impl StillSource for ReplaySource {
    fn pick(&mut self) -> Result<PathBuf, SourceError> {
        let path = self.files[self.next_still % self.files.len()].clone();
        self.next_still += 1;
        Ok(path)
    }

    fn capture(&mut self) -> Result<PathBuf, SourceError> {
        // A one-shot capture resolves to the next image location, same as a
        // pick does for this backend.
        self.pick()
    }
}

impl Drop for ReplaySource {
    fn drop(&mut self) {
        // Dropping the receiver makes the capture thread's next send fail,
        // which stops the loop.
        drop(self.receiver.take());

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn capture_loop(files: &[PathBuf], config: &SourceConfig, tx: mpsc::Sender<FrameResult>) {
    let interval = Duration::from_secs_f64(1.0 / config.fps().max(1) as f64);

    for path in files.iter().cycle() {
        let result = read_frame(path, config.rotation_degrees());
        if let Err(e) = &result {
            warn!("replay frame {} failed: {}", path.display(), e);
        }

        if tx.blocking_send(result).is_err() {
            // Receiver dropped; source was closed.
            break;
        }

        thread::sleep(interval);
    }
}

fn read_frame(path: &Path, rotation_degrees: u32) -> FrameResult {
    let frame = ocular_image::load_image(path)?;
    // Re-tag with the configured rotation so consumers exercise the same
    // orientation handling a live camera feed would need.
    let pixels = frame.into_rgb()?;
    Ok(Frame::new(pixels, PixelFormat::Rgb8, rotation_degrees)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tokio::time::{timeout, Duration};

    fn write_test_images(dir: &Path, count: usize) {
        for i in 0..count {
            let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
                ImageBuffer::from_pixel(8, 6, Rgb([i as u8, 0, 0]));
            img.save(dir.join(format!("frame_{i:02}.png"))).unwrap();
        }
    }

    #[test]
    fn test_empty_dir_is_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReplaySource::new(dir.path(), SourceConfig::default());
        assert!(matches!(result, Err(SourceError::Exhausted)));
    }

    #[test]
    fn test_still_source_cycles() {
        let dir = tempfile::tempdir().unwrap();
        write_test_images(dir.path(), 2);

        let mut source = ReplaySource::new(dir.path(), SourceConfig::default()).unwrap();
        let first = source.pick().unwrap();
        let second = source.capture().unwrap();
        let third = source.pick().unwrap();
        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[tokio::test]
    async fn test_recv_delivers_tagged_frames() {
        let dir = tempfile::tempdir().unwrap();
        write_test_images(dir.path(), 3);

        let config = SourceConfig::default()
            .with_fps(100)
            .with_rotation_degrees(90);
        let mut source = ReplaySource::new(dir.path(), config).unwrap();

        let frame = timeout(Duration::from_secs(5), source.recv())
            .await
            .expect("recv timed out")
            .expect("recv failed");

        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 6);
        assert_eq!(frame.rotation_degrees(), 90);
    }

    #[tokio::test]
    async fn test_recv_cycles_past_file_count() {
        let dir = tempfile::tempdir().unwrap();
        write_test_images(dir.path(), 2);

        let config = SourceConfig::default().with_fps(200);
        let mut source = ReplaySource::new(dir.path(), config).unwrap();

        for _ in 0..5 {
            timeout(Duration::from_secs(5), source.recv())
                .await
                .expect("recv timed out")
                .expect("recv failed");
        }
    }
}
