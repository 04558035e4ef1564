//! Logging setup for flowsmith
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. Binaries and tests call [`init_logging`] to get one.
//!
//! ```rust
//! use flowsmith::core::logging::init_logging;
//!
//! // Level and format fall back to the environment, then to info/compact
//! let _ = init_logging(None, None);
//! ```
//!
//! # Environment Variables
//!
//! - `FLOWSMITH_LOG_LEVEL`: trace|debug|info|warn|error|off
//! - `FLOWSMITH_LOG_FORMAT`: compact|pretty|json
//! - `RUST_LOG`: standard `EnvFilter` directives, e.g.
//!   `RUST_LOG="info,flowsmith::plugins::state=trace"`
//!
//! On wasm32 the events go to the browser console through `tracing-wasm`.

use std::fmt;
use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self as layer_fmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable consulted for the log level
pub const LEVEL_ENV: &str = "FLOWSMITH_LOG_LEVEL";
/// Environment variable consulted for the log format
pub const FORMAT_ENV: &str = "FLOWSMITH_LOG_FORMAT";

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, colored, with source locations
    Pretty,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    /// All accepted format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Unknown log format: {} (expected one of: {})",
                other,
                Self::variants().join(", ")
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Pick the level directive: explicit argument, then `FLOWSMITH_LOG_LEVEL`,
/// then `RUST_LOG`, then `info`
pub fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string())
}

/// Pick the output format: explicit argument, then `FLOWSMITH_LOG_FORMAT`,
/// then compact
pub fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(str::to_string)
        .or_else(|| std::env::var(FORMAT_ENV).ok())
    {
        Some(name) => LogFormat::from_str(&name),
        None => Ok(LogFormat::default()),
    }
}

/// Install a global tracing subscriber
///
/// Fails if the format name is unknown or a global subscriber is already set.
/// An unparsable level falls back to `info` rather than failing.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfig::default(),
        );
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = resolve_level(level);
        let format = resolve_format(format)?;

        let filter = if level == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let registry = Registry::default().with(filter);
        match format {
            LogFormat::Compact => registry
                .with(
                    layer_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE)
                        .compact(),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    layer_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?,
            LogFormat::Json => registry
                .with(
                    layer_fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?,
        }

        Ok(())
    }
}
