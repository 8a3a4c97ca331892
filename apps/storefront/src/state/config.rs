//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--data-dir`)
//! 2. Environment variables (`STOREFRONT_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use storefront_core::{FormValidator, LaunchWindow, Money, DEFAULT_CART_KEY};
use storefront_storage::{default_data_dir, FileStoreResult};
use tracing::warn;

/// Environment variable names.
pub mod env {
    pub const DATA_DIR: &str = "STOREFRONT_DATA_DIR";
    pub const CART_KEY: &str = "STOREFRONT_CART_KEY";
    pub const DISPOSABLE_DOMAINS: &str = "STOREFRONT_DISPOSABLE_DOMAINS";
    pub const MARKET_DATE: &str = "STOREFRONT_MARKET_DATE";
    pub const CURRENCY_SYMBOL: &str = "STOREFRONT_CURRENCY_SYMBOL";
}

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Where the file store lives. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Storage key the cart is mirrored under.
    pub cart_key: String,

    /// Denylist entries on top of the built-in disposable domains.
    pub extra_disposable_domains: Vec<String>,

    /// Launch day; the site runs in presale mode until then.
    pub market_date: Option<NaiveDate>,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Data dir: platform default
    /// - Cart key: `storefront-cart`
    /// - No extra disposable domains, no market date
    /// - Currency: `$`
    fn default() -> Self {
        StorefrontConfig {
            data_dir: None,
            cart_key: DEFAULT_CART_KEY.to_string(),
            extra_disposable_domains: Vec::new(),
            market_date: None,
            currency_symbol: "$".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_DATA_DIR`: Override the data directory
    /// - `STOREFRONT_CART_KEY`: Override the cart storage key
    /// - `STOREFRONT_DISPOSABLE_DOMAINS`: Comma-separated extra domains
    /// - `STOREFRONT_MARKET_DATE`: Launch day (`YYYY-MM-DD`)
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Override the currency symbol
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StorefrontConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StorefrontConfig::default();
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(dir) = lookup(env::DATA_DIR) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup(env::CART_KEY) {
            config.cart_key = key.trim().to_string();
        }

        if let Some(domains) = lookup(env::DISPOSABLE_DOMAINS) {
            config.extra_disposable_domains = domains
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(raw) = lookup(env::MARKET_DATE) {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => config.market_date = Some(date),
                Err(err) => warn!(value = %raw, error = %err, "ignoring invalid market date"),
            }
        }

        if let Some(symbol) = lookup(env::CURRENCY_SYMBOL) {
            config.currency_symbol = symbol;
        }

        config
    }

    /// The data directory to open, resolving the platform default.
    pub fn resolve_data_dir(&self) -> FileStoreResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Form validator with the configured extra disposable domains.
    pub fn validator(&self) -> FormValidator {
        let mut validator = FormValidator::default();
        validator.extend_disposable_domains(&self.extra_disposable_domains);
        validator
    }

    pub fn launch_window(&self) -> LaunchWindow {
        LaunchWindow::new(self.market_date)
    }

    /// Formats money with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Money;
    /// use storefront_lib::state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.cents() < 0 { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> StorefrontConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.cart_key, DEFAULT_CART_KEY);
        assert_eq!(config.data_dir, None);
        assert_eq!(config.market_date, None);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_env_overrides() {
        let config = config_from(&[
            (env::DATA_DIR, "/tmp/shop"),
            (env::CART_KEY, "test-cart"),
            (env::DISPOSABLE_DOMAINS, " spam.example, ,junk.test "),
            (env::MARKET_DATE, "2026-03-01"),
            (env::CURRENCY_SYMBOL, "€"),
        ]);

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/shop")));
        assert_eq!(config.cart_key, "test-cart");
        assert_eq!(config.extra_disposable_domains, vec!["spam.example", "junk.test"]);
        assert_eq!(config.market_date, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(config.format_currency(Money::from_cents(500)), "€5.00");
    }

    #[test]
    fn test_invalid_market_date_is_ignored() {
        let config = config_from(&[(env::MARKET_DATE, "next spring")]);
        assert_eq!(config.market_date, None);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[(env::CART_KEY, "  "), (env::DATA_DIR, "")]);
        assert_eq!(config.cart_key, DEFAULT_CART_KEY);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_validator_includes_extra_domains() {
        let config = config_from(&[(env::DISPOSABLE_DOMAINS, "spam.example")]);
        let validator = config.validator();
        assert!(validator.is_disposable_email("x@spam.example"));
        assert!(validator.is_disposable_email("x@tempmail.com"));
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::from_cents(0)), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }
}
