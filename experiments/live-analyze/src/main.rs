use log::LevelFilter;
use ocular_camera::{ReplaySource, SourceConfig};
use ocular_vision::{
    frame_channel, mode_channel, pump, Analyzer, AnalyzerConfig, Category, ClassifierListener,
    Detection, DetectorListener, LivePipeline, Mode, OnnxBackend, Router,
};
use std::env;

struct PrintListener;

impl ClassifierListener for PrintListener {
    fn on_error(&self, message: &str) {
        println!("error: {message}");
    }

    fn on_results(&self, categories: Option<&[Category]>, elapsed_ms: u64) {
        match categories {
            Some(categories) => {
                let lines: Vec<String> = categories
                    .iter()
                    .map(|c| format!("{} {:.0}%", c.label, c.score * 100.0))
                    .collect();
                println!("[{elapsed_ms} ms] {}", lines.join(", "));
            }
            None => println!("[{elapsed_ms} ms] no result"),
        }
    }
}

impl DetectorListener for PrintListener {
    fn on_error(&self, message: &str) {
        println!("error: {message}");
    }

    fn on_results(
        &self,
        detections: Option<&[Detection]>,
        elapsed_ms: u64,
        image_height: usize,
        image_width: usize,
    ) {
        match detections {
            Some(detections) => {
                println!(
                    "[{elapsed_ms} ms] {} objects on {image_width}x{image_height}:",
                    detections.len()
                );
                for d in detections {
                    println!(
                        "  {} {:.0}% at ({:.0},{:.0}) {:.0}x{:.0}",
                        d.label,
                        d.score * 100.0,
                        d.rect.x,
                        d.rect.y,
                        d.rect.width,
                        d.rect.height
                    );
                }
            }
            None => println!("[{elapsed_ms} ms] no objects"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ocular_base::init_stdout_logger(LevelFilter::Info)?;

    let assets_dir = env::var("OCULAR_ASSETS").unwrap_or_else(|_| "assets".to_string());
    let frames_dir = env::var("OCULAR_FRAMES").unwrap_or_else(|_| "frames".to_string());
    let mode = Mode::parse(&env::var("OCULAR_MODE").unwrap_or_else(|_| "classification".to_string()));

    println!("Live Analyze Experiment");
    println!("Assets: {assets_dir}");
    println!("Frames: {frames_dir}");
    println!("Mode: {mode}");
    println!("Controls: Ctrl-C to exit");
    println!();

    let source = ReplaySource::new(&frames_dir, SourceConfig::default().with_fps(10))?;

    let config = AnalyzerConfig::default().with_assets_dir(&assets_dir);
    let analyzer = Analyzer::new(config, Box::new(OnnxBackend::new()));
    let router = Router::new()
        .with_classifier_listener(Box::new(PrintListener))
        .with_detector_listener(Box::new(PrintListener));

    let (frame_tx, frame_rx) = frame_channel();
    let (_mode_tx, mode_rx) = mode_channel(mode);

    tokio::spawn(pump(source, frame_tx));
    let pipeline = tokio::spawn(LivePipeline::new(analyzer, router, frame_rx, mode_rx).run());

    tokio::signal::ctrl_c().await?;
    println!("Exiting...");
    pipeline.abort();

    Ok(())
}
