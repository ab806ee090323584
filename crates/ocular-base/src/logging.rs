use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// A logger that writes one line per record to stdout.
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let timestamp = format_timestamp();
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);

        println!(
            "{} [{}] {}:{} - {}",
            timestamp,
            record.level(),
            file,
            line,
            record.args()
        );
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Installs `StdoutLogger` as the global logger at the given level.
///
/// Call once at startup; a second call returns `SetLoggerError`.
pub fn init_stdout_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StdoutLogger))?;
    log::set_max_level(level);
    Ok(())
}

/// Seconds.millis since the unix epoch; enough to correlate pipeline events.
fn format_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let ts = format_timestamp();
        let (secs, millis) = ts.split_once('.').expect("dot separator");
        assert!(secs.parse::<u64>().is_ok());
        assert_eq!(millis.len(), 3);
    }
}
