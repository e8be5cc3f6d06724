//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Allowed CORS origins (empty = allow any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_shutdown_timeout() -> u64 {
    30
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            allowed_origins: Vec::new(),
            log_format: default_log_format(),
        }
    }
}

impl ServerConfig {
    /// Check the configuration for invalid values
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server host must not be empty".to_string());
        }
        if self.log_format != "text" && self.log_format != "json" {
            return Err(format!(
                "server log_format must be \"text\" or \"json\", got {:?}",
                self.log_format
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let json = r#"{"port":9090}"#;
        let config: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn validate_rejects_empty_host() {
        let config = ServerConfig {
            host: "  ".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_log_format() {
        let config = ServerConfig {
            log_format: "yaml".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_json_log_format() {
        let config = ServerConfig {
            log_format: "json".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
