//! Subscriber setup for the `billboard` binary

use crate::config::BillboardConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Filter chosen for the subscriber
#[derive(Debug)]
pub struct LogFilter {
    /// Filter to install
    pub filter: EnvFilter,
    /// `RUST_LOG` value that failed to parse and was replaced by the level
    pub rejected_env: Option<String>,
}

/// Prefer `env_directive` (the `RUST_LOG` value); fall back to `level`
///
/// # Errors
/// Returns the parse error when `level` itself is not a valid directive.
pub fn build_filter(env_directive: Option<&str>, level: &str) -> Result<LogFilter, ParseError> {
    if let Some(directive) = env_directive {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return Ok(LogFilter {
                filter,
                rejected_env: None,
            });
        }
    }

    Ok(LogFilter {
        filter: EnvFilter::try_new(level)?,
        rejected_env: env_directive.map(str::to_string),
    })
}

/// Install the global subscriber; logs go to stderr
///
/// # Errors
/// Invalid level directive, or a subscriber is already installed.
pub fn setup_logging(
    config: &BillboardConfig,
    level_override: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let level = level_override.unwrap_or(&config.logging.level);
    let env_directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let LogFilter {
        filter,
        rejected_env,
    } = build_filter(env_directive.as_deref(), level)
        .map_err(|err| anyhow::anyhow!("Invalid log level {level:?}: {err}"))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json || config.logging.json {
        subscriber.json().try_init()
    } else {
        subscriber.compact().try_init()
    };
    installed.map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    if let Some(directive) = rejected_env {
        tracing::warn!(
            rust_log = %directive,
            fallback = %level,
            "Ignoring invalid RUST_LOG directive"
        );
    }

    Ok(())
}
