//! Configuration loader for the `codemetal-socialpulse` dashboard service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, net::SocketAddr};

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt::format::FmtSpan;

/// Parse an optional environment variable into `$ty`, falling back to a default.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Level used when `DASHBOARD_LOG_LEVEL` is unset or unrecognised.
const DEFAULT_LOG_LEVEL: &str = "debug";

/// Default upload size limit: 10 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Largest accepted upload body, in bytes.
    pub max_upload_bytes: usize,

    /// Maximum number of datasets held in memory at once.
    pub max_sessions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_sessions: 64,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `DASHBOARD_BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
/// - `MAX_UPLOAD_BYTES` – upload size limit (default: 10 MiB)
/// - `MAX_SESSIONS` – datasets kept in memory (default: 64)
///
/// Returns an error if any variable is set but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let bind_addr = parse_env!("DASHBOARD_BIND_ADDR", SocketAddr, defaults.bind_addr);
    let max_upload_bytes = parse_env!("MAX_UPLOAD_BYTES", usize, defaults.max_upload_bytes);
    let max_sessions = parse_env!("MAX_SESSIONS", usize, defaults.max_sessions);

    if max_sessions == 0 {
        return Err(anyhow!("Invalid MAX_SESSIONS: must be at least 1"));
    }

    Ok(Config {
        bind_addr,
        max_upload_bytes,
        max_sessions,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DASHBOARD_BIND_ADDR : {}", self.bind_addr);
        tracing::info!("  MAX_UPLOAD_BYTES    : {}", self.max_upload_bytes);
        tracing::info!("  MAX_SESSIONS        : {}", self.max_sessions);
    }
}

/// Filter directive built from a `DASHBOARD_LOG_LEVEL` value.
///
/// HTTP internals stay at `info` whatever the dashboard level is.
pub fn log_directive(level: Option<&str>) -> String {
    // ---
    let level = match level.map(str::trim) {
        Some(l @ ("trace" | "debug" | "info" | "warn" | "error")) => l,
        _ => DEFAULT_LOG_LEVEL,
    };
    format!("{level},hyper=info")
}

/// Span lifecycle events selected by `DASHBOARD_SPAN_EVENTS`.
pub fn span_events(mode: Option<&str>) -> FmtSpan {
    // ---
    match mode {
        Some("full") => FmtSpan::FULL,
        Some("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    }
}

/// Explicit color choice from `FORCE_COLOR`; `None` leaves it to TTY detection.
pub fn color_override(value: Option<&str>) -> Option<bool> {
    // ---
    match value {
        Some("1" | "true" | "yes") => Some(true),
        Some("0" | "false" | "no") => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_log_directive_levels() {
        // ---
        assert_eq!(log_directive(Some("warn")), "warn,hyper=info");
        assert_eq!(log_directive(Some(" info ")), "info,hyper=info");
        assert_eq!(log_directive(Some("loud")), "debug,hyper=info");
        assert_eq!(log_directive(None), "debug,hyper=info");
    }

    #[test]
    fn test_span_events_modes() {
        // ---
        assert_eq!(span_events(Some("full")), FmtSpan::FULL);
        assert_eq!(span_events(Some("enter_exit")), FmtSpan::ENTER | FmtSpan::EXIT);
        assert_eq!(span_events(None), FmtSpan::CLOSE);
        assert_eq!(span_events(Some("other")), FmtSpan::CLOSE);
    }

    #[test]
    fn test_color_override() {
        // ---
        assert_eq!(color_override(Some("yes")), Some(true));
        assert_eq!(color_override(Some("0")), Some(false));
        assert_eq!(color_override(Some("auto")), None);
        assert_eq!(color_override(None), None);
    }

    #[test]
    fn test_default_config() {
        // ---
        let cfg = Config::default();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(cfg.max_sessions, 64);
    }
}
