//! Server configuration module

use clap::Parser;

use std::net::SocketAddr;

use crate::config::{listen::ListenConfig, logging::LoggingConfig, store::StoreConfig};

pub(crate) mod listen;
pub(crate) mod logging;
pub(crate) mod store;

/// Rebate JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "rebate-json", about = "Rebate JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Listen address settings.
    #[command(flatten)]
    pub listen: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Discount storage and pricing settings.
    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.listen.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, JPY};
    use testresult::TestResult;

    use crate::config::logging::LogFormat;

    use super::*;

    #[test]
    fn defaults_apply_when_only_database_url_is_given() -> TestResult {
        let config =
            ServerConfig::try_parse_from(["rebate-json", "--database-url", "postgres://localhost/rebate"])?;

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8698");
        assert_eq!(config.store.currency, GBP);
        assert!(matches!(config.logging.log_format, LogFormat::Compact));

        Ok(())
    }

    #[test]
    fn currency_and_log_format_are_configurable() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "rebate-json",
            "--database-url",
            "postgres://localhost/rebate",
            "--currency",
            "jpy",
            "--log-format",
            "json",
            "--port",
            "9000",
        ])?;

        assert_eq!(config.store.currency, JPY);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "rebate-json",
            "--database-url",
            "postgres://localhost/rebate",
            "--currency",
            "ZZZ",
        ]);

        assert!(result.is_err());
    }
}
