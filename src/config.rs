use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default endpoint of the external QR rendering service.
pub const DEFAULT_QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Merchant-side settings the checkout consumes as opaque data.
///
/// Provider identifiers are passed through to the payment payload unmodified.
/// An empty identifier counts as "not configured".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerchantConfig {
    #[serde(alias = "storeName")]
    pub store_name: String,

    /// Merchant id for the first direct provider (Alipay)
    #[serde(alias = "alipayMerchantId")]
    pub provider_a_id: Option<String>,

    /// Merchant id for the second direct provider (WeChat Pay)
    #[serde(alias = "wechatMerchantId")]
    pub provider_b_id: Option<String>,

    #[serde(alias = "currencySymbol")]
    pub currency_symbol: String,
}

impl MerchantConfig {
    pub fn new() -> Self {
        MerchantConfig {
            store_name: "Demo Store".to_string(),
            provider_a_id: None,
            provider_b_id: None,
            currency_symbol: "¥".to_string(),
        }
    }

    pub fn with_provider_a(mut self, id: impl Into<String>) -> Self {
        self.provider_a_id = Some(id.into());
        self
    }

    pub fn with_provider_b(mut self, id: impl Into<String>) -> Self {
        self.provider_b_id = Some(id.into());
        self
    }

    /// Configured provider A id, `None` when absent or empty
    pub fn provider_a(&self) -> Option<&str> {
        non_empty(self.provider_a_id.as_deref())
    }

    /// Configured provider B id, `None` when absent or empty
    pub fn provider_b(&self) -> Option<&str> {
        non_empty(self.provider_b_id.as_deref())
    }

    pub fn has_any_provider(&self) -> bool {
        self.provider_a().is_some() || self.provider_b().is_some()
    }

    /// Load merchant settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::InvalidConfig(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl Default for MerchantConfig {
    fn default() -> Self {
        MerchantConfig::new()
    }
}

fn non_empty(id: Option<&str>) -> Option<&str> {
    id.filter(|s| !s.trim().is_empty())
}

/// Configuration for the storefront-checkout CLI
#[derive(Debug, Clone)]
pub struct Config {
    pub merchant: MerchantConfig,

    /// Output format: "human" (default) or "json"
    pub output_format: String,

    /// Log level filter (default: "info")
    pub log_level: String,

    /// QR rendering endpoint used for payment payload render URLs
    pub qr_endpoint: String,
}

impl Config {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Config {
            merchant: MerchantConfig::new(),
            output_format: "human".to_string(),
            log_level: "info".to_string(),
            qr_endpoint: DEFAULT_QR_ENDPOINT.to_string(),
        }
    }

    pub fn get_merchant(&self) -> &MerchantConfig {
        &self.merchant
    }

    pub fn set_merchant(&mut self, merchant: MerchantConfig) {
        self.merchant = merchant;
    }

    pub fn get_output_format(&self) -> &str {
        &self.output_format
    }

    /// Set output format ("human" or "json")
    pub fn set_output_format(&mut self, format: String) {
        self.output_format = format;
    }

    pub fn get_log_level(&self) -> &str {
        &self.log_level
    }

    pub fn set_log_level(&mut self, level: String) {
        self.log_level = level;
    }

    pub fn get_qr_endpoint(&self) -> &str {
        &self.qr_endpoint
    }

    /// Load config from environment variables
    ///
    /// Environment variables:
    /// - `STOREFRONT_MERCHANT_CONFIG`: path to a JSON merchant config
    /// - `STOREFRONT_OUTPUT_FORMAT`: "human" or "json"
    /// - `STOREFRONT_LOG_LEVEL`: log level
    /// - `STOREFRONT_QR_ENDPOINT`: QR rendering endpoint
    pub fn from_env() -> Result<Self> {
        let mut config = Config::new();

        if let Ok(path) = env::var("STOREFRONT_MERCHANT_CONFIG") {
            config.merchant = MerchantConfig::load(Path::new(&path))?;
        }

        if let Ok(format) = env::var("STOREFRONT_OUTPUT_FORMAT") {
            config.output_format = format;
        }

        if let Ok(level) = env::var("STOREFRONT_LOG_LEVEL") {
            config.log_level = level;
        }

        if let Ok(endpoint) = env::var("STOREFRONT_QR_ENDPOINT") {
            config.qr_endpoint = endpoint;
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.output_format, "human");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.qr_endpoint, DEFAULT_QR_ENDPOINT);
        assert_eq!(config.merchant.currency_symbol, "¥");
        assert!(!config.merchant.has_any_provider());
    }

    #[test]
    fn test_config_setters() {
        let mut config = Config::new();
        config.set_output_format("json".to_string());
        assert_eq!(config.get_output_format(), "json");

        config.set_log_level("debug".to_string());
        assert_eq!(config.get_log_level(), "debug");

        config.set_merchant(MerchantConfig::new().with_provider_b("wx-1"));
        assert_eq!(config.get_merchant().provider_b(), Some("wx-1"));
    }

    #[test]
    fn test_empty_provider_id_is_absent() {
        let merchant = MerchantConfig::new().with_provider_a("  ");
        assert_eq!(merchant.provider_a(), None);
        assert!(!merchant.has_any_provider());
    }

    #[test]
    fn test_load_accepts_camel_case_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"storeName":"Noodle Bar","alipayMerchantId":"2088-01","currencySymbol":"$"}}"#
        )
        .unwrap();

        let merchant = MerchantConfig::load(file.path()).unwrap();
        assert_eq!(merchant.store_name, "Noodle Bar");
        assert_eq!(merchant.provider_a(), Some("2088-01"));
        assert_eq!(merchant.provider_b(), None);
        assert_eq!(merchant.currency_symbol, "$");
    }

    #[test]
    fn test_load_missing_fields_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"provider_b_id":"wx-9"}}"#).unwrap();

        let merchant = MerchantConfig::load(file.path()).unwrap();
        assert_eq!(merchant.store_name, "Demo Store");
        assert_eq!(merchant.currency_symbol, "¥");
        assert_eq!(merchant.provider_b(), Some("wx-9"));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        match MerchantConfig::load(file.path()) {
            Err(Error::InvalidConfig(msg)) => assert!(msg.contains("Failed to parse")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }
}
