//! # Domain Types
//!
//! Collaborator contracts and site settings shared by the core and the app.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                         ┌─────────────────┐       │
//! │  │ CheckoutRequest │                         │  LaunchWindow   │       │
//! │  │  ─────────────  │                         │  ─────────────  │       │
//! │  │  quantity       │──► checkout endpoint    │  market_date    │       │
//! │  └─────────────────┘    (collaborator)       └─────────────────┘       │
//! │                                                                         │
//! │  The checkout session itself is created elsewhere; the core only       │
//! │  builds the request body.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Checkout Contract
// =============================================================================

/// Body POSTed to the checkout-session endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    /// Total units in the cart.
    pub quantity: i64,
}

// =============================================================================
// Launch Window
// =============================================================================

/// Presale mode: before the market date the site takes pre-orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LaunchWindow {
    /// First day of general availability. `None` means already launched.
    #[ts(as = "Option<String>")]
    pub market_date: Option<NaiveDate>,
}

impl LaunchWindow {
    pub fn new(market_date: Option<NaiveDate>) -> Self {
        LaunchWindow { market_date }
    }

    /// True while `today` is on or before the market date.
    pub fn is_presale(&self, today: NaiveDate) -> bool {
        self.market_date.is_some_and(|market| today <= market)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_presale_until_market_date_inclusive() {
        let window = LaunchWindow::new(Some(date(2026, 3, 1)));
        assert!(window.is_presale(date(2026, 2, 28)));
        assert!(window.is_presale(date(2026, 3, 1)));
        assert!(!window.is_presale(date(2026, 3, 2)));
    }

    #[test]
    fn test_no_market_date_is_never_presale() {
        assert!(!LaunchWindow::default().is_presale(date(2000, 1, 1)));
    }

    #[test]
    fn test_checkout_request_shape() {
        let request = serde_json::to_string(&CheckoutRequest { quantity: 3 }).unwrap();
        assert_eq!(request, r#"{"quantity":3}"#);
    }
}
