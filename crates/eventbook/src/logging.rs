//! Logging setup and the per-component logging handle.
//!
//! The subscriber is installed once in `main`. Components never reach for a
//! global logger; they receive a [`Logger`] at construction and emit their
//! events under its span.

use clap::ValueEnum;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Installs the global tracing subscriber.
///
/// Must be called once, before the root [`Logger`] is created.
pub fn init_subscriber(format: LogFormat) {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventbook=debug,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Logging handle passed to each component.
///
/// Created once at process start with [`Logger::root`], then narrowed per
/// component with [`Logger::component`]. Cloning is cheap and the handle is
/// never reconfigured afterwards.
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    /// Creates the root handle for the service.
    pub fn root(service: &'static str) -> Self {
        Self {
            span: tracing::info_span!("service", name = service),
        }
    }

    /// Creates a handle for a named component below this one.
    pub fn component(&self, name: &'static str) -> Self {
        Self {
            span: tracing::info_span!(parent: &self.span, "component", name = name),
        }
    }

    /// Span under which the component's events are recorded.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::root(env!("CARGO_PKG_NAME"))
    }
}


#[cfg(test)]
pub(crate) mod test_support {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a thread-local subscriber and returns what it logged.
    ///
    /// Loggers must be created inside `f` so their spans belong to the
    /// capturing subscriber.
    pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }
}
