//! # Site Commands
//!
//! `storefront site status`: presale flag and the effective configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::state::StorefrontConfig;

/// Snapshot of the site settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStatus {
    pub presale: bool,
    pub market_date: Option<NaiveDate>,
    pub data_dir: Option<PathBuf>,
    pub cart_key: String,
    pub currency_symbol: String,
    pub disposable_domains: Vec<String>,
}

/// Reports whether the site is in presale mode on `today`.
pub fn site_status(config: &StorefrontConfig, today: NaiveDate) -> SiteStatus {
    debug!(%today, "site_status command");

    SiteStatus {
        presale: config.launch_window().is_presale(today),
        market_date: config.market_date,
        data_dir: config.resolve_data_dir().ok(),
        cart_key: config.cart_key.clone(),
        currency_symbol: config.currency_symbol.clone(),
        disposable_domains: config
            .validator()
            .disposable_domains()
            .map(str::to_string)
            .collect(),
    }
}
