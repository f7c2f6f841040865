//! Configuration types for the gateway.

use std::path::PathBuf;

/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port (the registered HL7/MLLP port).
pub const DEFAULT_PORT: u16 = 2575;

/// Default directory for persisted parse results.
pub const DEFAULT_SAVE_DIR: &str = "data";

/// Configuration for the gateway.
///
/// All state the gateway needs is passed in here up front; nothing is read
/// from mutable globals at runtime.
///
/// # Example
///
/// ```rust
/// use hl7_gateway::GatewayConfig;
///
/// let config = GatewayConfig::builder()
///     .with_port(2575)
///     .with_save_dir("data/lab")
///     .build();
///
/// assert_eq!(config.listen_addr(), "127.0.0.1:2575");
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host name or address the listener binds.
    pub host: String,
    /// Port the listener binds.
    pub port: u16,
    /// Base directory for persisted parse results.
    pub save_dir: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

impl GatewayConfig {
    /// Creates a new builder for GatewayConfig.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Builds a configuration from the environment.
    ///
    /// `HOST` and `PORT` override the defaults when set; an unparsable
    /// `PORT` falls back to the default.
    pub fn from_env() -> Self {
        let mut builder = Self::builder();
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.with_host(host);
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            builder = builder.with_port(port);
        }
        builder.build()
    }

    /// The `host:port` string the listener binds.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for GatewayConfig.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    save_dir: Option<PathBuf>,
}

impl GatewayConfigBuilder {
    /// Sets the listen host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the listen port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the base directory for persisted results.
    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(save_dir.into());
        self
    }

    /// Builds the GatewayConfig, filling unset fields with defaults.
    pub fn build(self) -> GatewayConfig {
        GatewayConfig {
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            save_dir: self.save_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GatewayConfig::default();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.save_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_config_builder() {
        let config = GatewayConfig::builder()
            .with_host("0.0.0.0")
            .with_port(4000)
            .with_save_dir("data/lab")
            .build();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.save_dir, PathBuf::from("data/lab"));
    }

    #[test]
    fn test_builder_partial() {
        let config = GatewayConfig::builder().with_port(4000).build();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_listen_addr() {
        let config = GatewayConfig::builder()
            .with_host("localhost")
            .with_port(4000)
            .build();
        assert_eq!(config.listen_addr(), "localhost:4000");
    }
}
