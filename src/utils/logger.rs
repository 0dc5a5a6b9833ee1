use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output for the data-prep CLI.
    Compact,
    /// One JSON object per line, timestamps left to CloudWatch.
    Json,
}

/// `RUST_LOG` wins; otherwise the crate logs at info (debug when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "mammo_pipeline=debug,info"
    } else {
        "mammo_pipeline=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

pub fn init_cli_logger(verbose: bool) {
    install(LogFormat::Compact, env_filter(verbose));
}

pub fn init_lambda_logger() {
    install(LogFormat::Json, env_filter(false));
}

/// Installs the global subscriber. Called once from each binary's `main`;
/// a second call only reports the conflict.
pub fn install(format: LogFormat, filter: EnvFilter) {
    let base = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Compact => registry.with(base.compact()).try_init(),
        LogFormat::Json => registry.with(base.without_time().json()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("⚠️ Logger already initialised: {}", e);
    }
}

/// Runs `f` with a scoped subscriber and returns everything it logged.
#[cfg(test)]
pub(crate) fn capture_logs<F: FnOnce()>(f: F) -> String {
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> fmt::MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    let buffer = Buffer::default();
    let subscriber = fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_logs_is_scoped() {
        let logs = capture_logs(|| tracing::warn!("inside scope"));
        tracing::warn!("outside scope");

        assert!(logs.contains("WARN"));
        assert!(logs.contains("inside scope"));
        assert!(!logs.contains("outside scope"));
    }
}
