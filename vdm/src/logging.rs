//! Log output on stderr through `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Default verbosity when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "warn",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
        }
    }
}

/// Build the filter: `RUST_LOG` wins, otherwise the flag-selected level.
fn filter(level: LogLevel) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(level.directive())),
        Err(_) => EnvFilter::new(level.directive()),
    }
}

pub fn init(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
