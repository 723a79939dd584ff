//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./datajobs_server --port 8080 --max-body-bytes 65536 --log-json
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 RUST_LOG=debug ./datajobs_server
//! ```

use clap::Parser;
use std::time::Duration;
use thiserror::Error;

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max body bytes must be >= 1")]
    ZeroMaxBody,

    #[error("read timeout must be > 0")]
    ZeroReadTimeout,
}

/// Configuración del servidor de data jobs
#[derive(Debug, Clone, Parser)]
#[command(name = "datajobs_server")]
#[command(about = "Servidor HTTP/1.0 concurrente para registrar y procesar data jobs")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Tamaño máximo del body de un request (bytes)
    #[arg(long = "max-body-bytes", default_value = "1048576", env = "MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Timeout de lectura del socket en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Emitir logs en formato JSON
    #[arg(long = "log-json", env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use datajobs_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroMaxBody);
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ZeroReadTimeout);
        }
        Ok(())
    }

    /// Registra un resumen de la configuración en el log
    pub fn log_summary(&self) {
        tracing::info!(
            address = %self.address(),
            max_body_bytes = self.max_body_bytes,
            read_timeout_ms = self.read_timeout_ms,
            log_json = self.log_json,
            "configuration loaded"
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            max_body_bytes: 1024 * 1024,
            read_timeout_ms: 5_000,
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.read_timeout(), Duration::from_secs(5));
        assert!(!config.log_json);
    }

    #[test]
    fn test_cli_defaults_match_default() {
        let parsed = Config::parse_from(["datajobs_server"]);
        let default = Config::default();

        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.host, default.host);
        assert_eq!(parsed.max_body_bytes, default.max_body_bytes);
        assert_eq!(parsed.read_timeout_ms, default.read_timeout_ms);
    }

    #[test]
    fn test_cli_custom_values() {
        let config = Config::parse_from([
            "datajobs_server",
            "-p",
            "3000",
            "--host",
            "0.0.0.0",
            "--max-body-bytes",
            "2048",
            "--log-json",
        ]);

        assert_eq!(config.address(), "0.0.0.0:3000");
        assert_eq!(config.max_body_bytes, 2048);
        assert!(config.log_json);
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_body() {
        let mut config = Config::default();
        config.max_body_bytes = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxBody));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.read_timeout_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroReadTimeout));
    }
}
