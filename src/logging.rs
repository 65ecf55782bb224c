//! Logging capability injected into the shortener core, plus the
//! process-wide `tracing` subscriber setup used by the binaries.
//!
//! The core never logs through global state. It receives an
//! `Arc<dyn Logger>` in [`crate::application::services::ShortenerConfig`];
//! the server wires in [`TracingLogger`], library users get [`NullLogger`]
//! unless they choose otherwise.

use std::fmt;
use tracing_subscriber::EnvFilter;

/// Four-level formatted logging sink.
///
/// Call sites pass `format_args!` so no string is built for a sink that
/// discards it.
pub trait Logger: Send + Sync {
    fn error(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn debug(&self, args: fmt::Arguments<'_>);
}

/// A logger that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn error(&self, _args: fmt::Arguments<'_>) {}
    fn warn(&self, _args: fmt::Arguments<'_>) {}
    fn info(&self, _args: fmt::Arguments<'_>) {}
    fn debug(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards every call to the `tracing` macro of the same level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(target: "shortlink", "{}", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(target: "shortlink", "{}", args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "shortlink", "{}", args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: "shortlink", "{}", args);
    }
}

/// Installs the global `tracing` subscriber.
///
/// `level` is an `EnvFilter` directive string (same syntax as `RUST_LOG`);
/// `format` is `text` or `json`.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a global subscriber is
/// already installed.
pub fn init_tracing(level: &str, format: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if format == "json" {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!(e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl Logger for RecordingLogger {
        fn error(&self, args: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("ERROR {}", args));
        }
        fn warn(&self, args: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("WARN {}", args));
        }
        fn info(&self, args: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("INFO {}", args));
        }
        fn debug(&self, args: fmt::Arguments<'_>) {
            self.lines.lock().unwrap().push(format!("DEBUG {}", args));
        }
    }

    #[test]
    fn test_null_logger_accepts_all_levels() {
        let logger: Arc<dyn Logger> = Arc::new(NullLogger);
        logger.error(format_args!("e {}", 1));
        logger.warn(format_args!("w {}", 2));
        logger.info(format_args!("i {}", 3));
        logger.debug(format_args!("d {}", 4));
    }

    #[test]
    fn test_logger_trait_object_formats_arguments() {
        let recorder = Arc::new(RecordingLogger::default());
        let logger: Arc<dyn Logger> = recorder.clone();

        logger.info(format_args!("New entry: {} - {}", "abc", "http://x.y"));
        logger.warn(format_args!("slow"));

        let lines = recorder.lines.lock().unwrap();
        assert_eq!(lines.as_slice(), ["INFO New entry: abc - http://x.y", "WARN slow"]);
    }

    #[test]
    fn test_init_tracing_rejects_bad_filter() {
        assert!(init_tracing("shortlink=notalevel", "text").is_err());
    }
}
