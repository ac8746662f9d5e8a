//! Structured logging infrastructure
//!
//! Provides `env_logger`-based logging for applications and tests, plus the
//! log helpers the errkit crates use to record registry changes and reported
//! errors through the standard `log` crate.

use crate::code::Code;
use log::{debug, info, log, warn, Level};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging bootstrap and structured log helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - include registry registrations and conversions
    /// - `RUST_LOG=info` - reported benign errors and above
    /// - `RUST_LOG=errkit=warn` - module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            // Another logger may already be installed by the host application.
            if env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init()
                .is_ok()
            {
                info!("Structured logging initialized");
            }
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs the logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the registration of an application error code
    pub fn log_code_registered(code: Code, description: &str) {
        debug!("Error code registered: {code} ({description})");
    }

    /// Log the registration of error conversions
    pub fn log_conversions_registered(added: usize, total: usize) {
        debug!("Error conversions registered: {added} added ({total} total)");
    }

    /// Log the installation of a process-wide registry
    pub fn log_registry_installed(codes: usize, conversions: usize, probes: usize) {
        info!(
            "Error registry installed (codes: {codes}, conversions: {conversions}, detail probes: {probes})"
        );
    }

    /// Log a chain walk that stopped at the safety bound
    pub fn log_chain_truncated(limit: usize) {
        warn!("Error chain walk stopped after {limit} links");
    }

    /// Log a chain walk that met a link it had already visited
    pub fn log_chain_cycle(visited: usize) {
        warn!("Error chain cycles back after {visited} links");
    }

    /// Log a reported error at the severity chosen by its disposition
    ///
    /// `detail` carries the benign reason or the retriable marker when present.
    pub fn log_error_report(
        level: Level,
        code: Code,
        description: &str,
        rendered: &str,
        detail: Option<&str>,
    ) {
        match detail {
            Some(detail) => log!(
                level,
                "{rendered} (code: {code}, description: {description}, {detail})"
            ),
            None => log!(level, "{rendered} (code: {code}, description: {description})"),
        }
    }
}
