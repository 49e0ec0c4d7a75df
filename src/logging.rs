//! Diagnostic logging
//!
//! Logs go to stderr so that report output on stdout stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the log filter
pub const LOG_ENV: &str = "FINCAST_LOG";

const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive such as `info` or `fincast=debug`
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LEVEL.to_string(),
        }
    }
}

impl LoggingConfig {
    /// `FINCAST_LOG`, then `RUST_LOG`, then `warn`
    pub fn from_env() -> Self {
        let log_level = std::env::var(LOG_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        Self { log_level }
    }

    /// Raise the level for `-v` flags; an explicit environment filter wins
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        if std::env::var_os(LOG_ENV).is_some() || std::env::var_os("RUST_LOG").is_some() {
            return self;
        }
        self.log_level = match verbose {
            0 => self.log_level,
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        };
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    let installed = tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();

    if installed.is_ok() {
        tracing::debug!(level = %config.log_level, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(LoggingConfig::default().log_level, "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
