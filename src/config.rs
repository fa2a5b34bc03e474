//! Configuration Module
//!
//! Configuration is loaded from TOML files and parsed using serde.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::context::{LedgerInfo, StaticContext};

/// Main configuration structure
///
/// # Example TOML
/// ```toml
/// [plugin]
/// account = "g.example.alice"
/// prefix = "g.example."
///
/// [api]
/// host = "127.0.0.1"
/// port = 8650
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub plugin: PluginConfig,
    pub api: ApiConfig,
}

/// Identity of the local plugin
///
/// # Fields
/// - `account`: local account identifier, used for direction checks
/// - `prefix`: ILP prefix of the local ledger
/// - `currency_code` / `currency_scale`: optional ledger metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PluginConfig {
    pub account: String,
    pub prefix: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency_scale: Option<u32>,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Plugin context described by the `[plugin]` section
    pub fn plugin_context(&self) -> StaticContext {
        StaticContext::with_info(
            self.plugin.account.clone(),
            LedgerInfo {
                prefix: self.plugin.prefix.clone(),
                currency_code: self.plugin.currency_code.clone(),
                currency_scale: self.plugin.currency_scale,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PluginContext;

    #[test]
    fn test_parse_config() {
        let config = Config::parse(
            r#"
            [plugin]
            account = "g.example.alice"
            prefix = "g.example."
            currency_scale = 9

            [api]
            host = "0.0.0.0"
            port = 8650
            "#,
        )
        .expect("valid config");

        assert_eq!(config.api.port, 8650);
        let ctx = config.plugin_context();
        assert_eq!(ctx.account(), "g.example.alice");
        assert_eq!(ctx.info().prefix, "g.example.");
        assert_eq!(ctx.info().currency_scale, Some(9));
        assert_eq!(ctx.info().currency_code, None);
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(Config::parse("[api]\nhost = \"127.0.0.1\"\nport = 1\n").is_err());
    }

    #[test]
    fn test_load_default_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let config = Config::load(path).expect("default config loads");
        assert_eq!(config.plugin.prefix, "g.example.");
    }
}
