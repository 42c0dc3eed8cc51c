// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text
    Pretty,
    /// One JSON object per event
    Json,
}

/// Tracing subscriber setup.
///
/// Logs go to stderr so they never mix with the command and prompts on
/// stdout. `RUST_LOG` takes precedence over the configured level.
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Build the filter from `RUST_LOG`, falling back to `level`
    pub fn env_filter(level: &str) -> Result<EnvFilter, DomainError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(level).map_err(|e| {
            DomainError::ConfigInvalid(format!("Invalid log level '{}': {}", level, e))
        })
    }

    /// Install the global subscriber; later calls are ignored
    pub fn init(level: &str, format: LogFormat) -> Result<(), DomainError> {
        let filter = Self::env_filter(level)?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        // try_init fails only when a subscriber is already installed
        let _ = match format {
            LogFormat::Pretty => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_levels() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        for level in ["trace", "debug", "info", "warn", "error", "ffchat=debug"] {
            assert!(TracingLogAdapter::env_filter(level).is_ok(), "{}", level);
        }
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(matches!(
            TracingLogAdapter::env_filter("ffchat=loud"),
            Err(DomainError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        assert!(TracingLogAdapter::init("warn", LogFormat::Pretty).is_ok());
        assert!(TracingLogAdapter::init("warn", LogFormat::Json).is_ok());
    }
}
