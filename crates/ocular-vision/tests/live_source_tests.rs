//! End-to-end: directory replay source feeding the live pipeline.

use ocular_base::Tensor;
use ocular_camera::{ReplaySource, SourceConfig};
use ocular_vision::{
    frame_channel, mode_channel, pump, Analyzer, AnalyzerConfig, Category, ClassifierListener,
    LivePipeline, MockBackend, Mode, Router,
};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, timeout, Duration};

#[derive(Default)]
struct CountingListener {
    results: Mutex<usize>,
    errors: Mutex<Vec<String>>,
}

struct CountingListenerHandle(Arc<CountingListener>);

impl ClassifierListener for CountingListenerHandle {
    fn on_error(&self, message: &str) {
        self.0.errors.lock().unwrap().push(message.to_string());
    }

    fn on_results(&self, _categories: Option<&[Category]>, _elapsed_ms: u64) {
        *self.0.results.lock().unwrap() += 1;
    }
}

fn write_assets(dir: &Path) {
    let asset = Mode::Classification.model_asset().unwrap();
    std::fs::write(dir.join(asset), b"model bytes").unwrap();
    std::fs::write(dir.join("mobilenet_v1_labels.txt"), "cat\ndog\n").unwrap();
}

fn write_frames(dir: &Path, count: usize) {
    for i in 0..count {
        let img: image::ImageBuffer<image::Rgb<u8>, Vec<u8>> =
            image::ImageBuffer::from_pixel(16, 12, image::Rgb([i as u8, 50, 100]));
        img.save(dir.join(format!("frame_{i}.png"))).unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_replay_source_drives_pipeline() {
    let assets_dir = tempfile::tempdir().unwrap();
    write_assets(assets_dir.path());
    let frames_dir = tempfile::tempdir().unwrap();
    write_frames(frames_dir.path(), 3);

    let listener = Arc::new(CountingListener::default());
    let router = Router::new().with_classifier_listener(Box::new(CountingListenerHandle(Arc::clone(&listener))));
    let config = AnalyzerConfig::default().with_assets_dir(assets_dir.path());
    let backend = MockBackend::new(vec![(
        "scores".to_string(),
        Tensor::new(vec![1, 2], vec![0.7, 0.4]).unwrap(),
    )]);
    let analyzer = Analyzer::new(config, Box::new(backend));

    let source = ReplaySource::new(
        frames_dir.path(),
        SourceConfig::default().with_fps(100).with_rotation_degrees(90),
    )
    .unwrap();

    let (frame_tx, frame_rx) = frame_channel();
    let (_mode_tx, mode_rx) = mode_channel(Mode::Classification);

    let pump_handle = tokio::spawn(pump(source, frame_tx));
    let pipeline_handle = tokio::spawn(LivePipeline::new(analyzer, router, frame_rx, mode_rx).run());

    timeout(Duration::from_secs(10), async {
        while *listener.results.lock().unwrap() < 3 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("pipeline produced no results");

    pipeline_handle.abort();
    pump_handle.abort();

    assert!(listener.errors.lock().unwrap().is_empty());
}
