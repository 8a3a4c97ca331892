//! # Cart Commands
//!
//! Commands behind `storefront cart ...`.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Cleared  │       │
//! │  │  Cart    │     │          │     │ Session  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   cart add          cart checkout                      │
//! │                   cart set          (prints request body)              │
//! │                   cart remove                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   cart clear ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are generic over the store so tests can run them in memory.

use serde::Serialize;
use storefront_core::money::{self, Money};
use storefront_core::{Cart, CartLineItem, CheckoutRequest, KeyValueStore};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::StorefrontConfig;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    #[serde(with = "money::decimal")]
    pub total: Money,
    pub item_count: i64,
    pub formatted_total: String,
    /// Storage problems absorbed while handling the command.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl CartResponse {
    pub fn new<S: KeyValueStore>(cart: &Cart<S>, config: &StorefrontConfig) -> Self {
        let snapshot = cart.to_snapshot();
        CartResponse {
            formatted_total: config.format_currency(snapshot.total),
            items: snapshot.items,
            total: snapshot.total,
            item_count: snapshot.item_count,
            warnings: cart.diagnostics().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart<S: KeyValueStore>(cart: &Cart<S>, config: &StorefrontConfig) -> CartResponse {
    debug!("get_cart command");
    CartResponse::new(cart, config)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases, price stays as first added
/// - If product not in cart: added as new item
///
/// ## Arguments
/// * `id` - Product identifier
/// * `quantity` - Units to add (>= 1)
/// * `price` - Unit price as a decimal amount (e.g. `19.99`)
pub fn add_to_cart<S: KeyValueStore>(
    cart: &mut Cart<S>,
    config: &StorefrontConfig,
    id: &str,
    quantity: i64,
    price: f64,
) -> Result<CartResponse, ApiError> {
    debug!(id, quantity, price, "add_to_cart command");

    cart.add_item(id, quantity, price)?;
    Ok(CartResponse::new(cart, config))
}

/// Sets the quantity of an item; 0 removes it.
pub fn update_cart_item<S: KeyValueStore>(
    cart: &mut Cart<S>,
    config: &StorefrontConfig,
    id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(id, quantity, "update_cart_item command");

    cart.update_quantity(id, quantity)?;
    Ok(CartResponse::new(cart, config))
}

/// Removes an item from the cart. Unknown ids are ignored.
pub fn remove_from_cart<S: KeyValueStore>(
    cart: &mut Cart<S>,
    config: &StorefrontConfig,
    id: &str,
) -> CartResponse {
    debug!(id, "remove_from_cart command");

    cart.remove_item(id);
    CartResponse::new(cart, config)
}

/// Empties the cart and deletes its durable record.
///
/// ## When Used
/// - Shopper empties the drawer
/// - After the checkout session completes
pub fn clear_cart<S: KeyValueStore>(cart: &mut Cart<S>, config: &StorefrontConfig) -> CartResponse {
    debug!("clear_cart command");

    cart.clear();
    CartResponse::new(cart, config)
}

/// Builds the checkout-session request body.
///
/// The session itself is created by the payment collaborator; this command
/// only prints what would be sent.
pub fn checkout<S: KeyValueStore>(cart: &Cart<S>) -> Result<CheckoutRequest, ApiError> {
    let request = cart
        .checkout_request()
        .ok_or_else(|| ApiError::cart("Cart is empty"))?;
    info!(quantity = request.quantity, "prepared checkout request");
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use storefront_core::MemoryStore;

    fn setup() -> (Cart<MemoryStore>, StorefrontConfig) {
        (Cart::load(MemoryStore::new()), StorefrontConfig::default())
    }

    #[test]
    fn test_add_to_cart_response_shape() {
        let (mut cart, config) = setup();
        let response = add_to_cart(&mut cart, &config, "spray-100ml", 2, 19.99).unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "items": [{ "id": "spray-100ml", "quantity": 2, "price": 19.99 }],
                "total": 39.98,
                "itemCount": 2,
                "formattedTotal": "$39.98"
            })
        );
    }

    #[test]
    fn test_add_to_cart_rejects_bad_input() {
        let (mut cart, config) = setup();

        let err = add_to_cart(&mut cart, &config, "spray-100ml", 0, 19.99).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Quantity must be at least 1");

        let err = add_to_cart(&mut cart, &config, "spray-100ml", 1, f64::NAN).unwrap_err();
        assert_eq!(err.message, "Price must be positive");

        let err = add_to_cart(&mut cart, &config, "spray-100ml", 1, -0.01).unwrap_err();
        assert_eq!(err.message, "Price must be positive");
    }

    #[test]
    fn test_add_to_cart_keeps_sub_cent_price() {
        let (mut cart, config) = setup();
        let response = add_to_cart(&mut cart, &config, "sample", 2, 0.004).unwrap();

        assert_eq!(response.items[0].unit_price.amount(), 0.004);
        assert_eq!(response.formatted_total, "$0.01");
    }

    #[test]
    fn test_update_and_remove() {
        let (mut cart, config) = setup();
        add_to_cart(&mut cart, &config, "a", 1, 1.0).unwrap();
        add_to_cart(&mut cart, &config, "b", 1, 2.0).unwrap();

        let response = update_cart_item(&mut cart, &config, "a", 3).unwrap();
        assert_eq!(response.item_count, 4);

        let response = update_cart_item(&mut cart, &config, "a", 0).unwrap();
        assert_eq!(response.items.len(), 1);

        let response = remove_from_cart(&mut cart, &config, "missing");
        assert_eq!(response.items.len(), 1);

        let err = update_cart_item(&mut cart, &config, "b", -2).unwrap_err();
        assert_eq!(err.message, "Quantity cannot be negative");
    }

    #[test]
    fn test_clear_and_checkout() {
        let (mut cart, config) = setup();
        assert_eq!(checkout(&cart).unwrap_err().message, "Cart is empty");

        add_to_cart(&mut cart, &config, "a", 2, 1.0).unwrap();
        assert_eq!(checkout(&cart).unwrap(), CheckoutRequest { quantity: 2 });

        let response = clear_cart(&mut cart, &config);
        assert_eq!(response.item_count, 0);
        assert_eq!(response.formatted_total, "$0.00");
        assert!(!cart.store().contains_key(storefront_core::DEFAULT_CART_KEY));
    }

    #[test]
    fn test_storage_problems_surface_as_warnings() {
        let config = StorefrontConfig::default();
        let mut cart = Cart::load(MemoryStore::with_quota(8));

        let response = add_to_cart(&mut cart, &config, "a", 1, 1.0).unwrap();
        assert_eq!(response.item_count, 1);
        assert_eq!(response.warnings.len(), 1);
        assert!(response.warnings[0].starts_with("failed to save cart"));
    }
}
