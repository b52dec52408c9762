//! Billboard CLI
//!
//! Configuration and command implementations behind the `billboard` binary.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod commands;
mod config;
mod logging;

pub use commands::{navigate, BannerReport};
pub use config::{BillboardConfig, ConfigError, ExperimentConfig, LinkConfig, LoggingConfig};
pub use logging::{build_filter, setup_logging, LogFilter};
