//! # Cart
//!
//! The shopping cart: ordered line items, mirrored to a durable key/value
//! slot after every mutation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Page Action              Cart Call               Durable Record        │
//! │  ───────────              ─────────               ──────────────        │
//! │                                                                         │
//! │  Page load ─────────────► Cart::load() ─────────► get(key)             │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ───────────► set(key, {items})    │
//! │                                                                         │
//! │  +/- in drawer ─────────► update_quantity() ────► set(key, {items})    │
//! │                                                                         │
//! │  Remove ────────────────► remove_item() ────────► set (only if found)  │
//! │                                                                         │
//! │  After checkout ────────► clear() ──────────────► remove(key)          │
//! │                                                                         │
//! │  Drawer / badge ────────► total(), item_count() (derived, never stored) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per id, in insertion order
//! - Every quantity is >= 1 and every unit price is > 0
//! - The durable record never outlives `clear()`
//!
//! Storage problems never reach the caller. They are logged and recorded
//! as [`CartDiagnostic`]s; the in-memory items stay the source of truth.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::{self, Money, UnitPrice};
use crate::storage::KeyValueStore;
use crate::types::CheckoutRequest;
use crate::DEFAULT_CART_KEY;

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart.
///
/// Serialized as `{ "id": "...", "quantity": 2, "price": 19.99 }`, the shape
/// of both the durable record and the page scripts' cart items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    /// Product identifier (opaque).
    pub id: String,

    /// Quantity in cart (>= 1).
    pub quantity: i64,

    /// Price per unit as listed, frozen when the item was first added.
    #[serde(rename = "price")]
    #[ts(type = "number")]
    pub unit_price: UnitPrice,
}

impl CartLineItem {
    /// Creates a line item. Does not validate; the cart does.
    pub fn new(id: impl Into<String>, quantity: i64, unit_price: UnitPrice) -> Self {
        CartLineItem {
            id: id.into(),
            quantity,
            unit_price,
        }
    }

    /// Unit price × quantity, before rounding.
    #[inline]
    pub fn line_amount(&self) -> f64 {
        self.unit_price.times(self.quantity)
    }
}

// =============================================================================
// Snapshots & Durable Format
// =============================================================================

/// Detached copy of the cart for rendering or JSON output.
///
/// Mutating a snapshot never touches the cart it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub total: Money,
    pub item_count: i64,
}

/// On-disk shape: `{ "items": [...] }`. A missing or null list reads as empty.
#[derive(Debug, Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Option<Vec<CartLineItem>>,
}

#[derive(Serialize)]
struct StoredCartRef<'a> {
    items: &'a [CartLineItem],
}

// =============================================================================
// Diagnostics
// =============================================================================

/// How the cart came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum LoadStatus {
    /// Nothing was stored under the key.
    Fresh,
    /// A stored cart was read back.
    Restored { items: usize },
    /// The stored cart was unreadable; started empty.
    Recovered,
}

/// A storage problem the cart absorbed instead of raising.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase", tag = "kind", content = "reason")]
pub enum CartDiagnostic {
    #[error("failed to read stored cart: {0}")]
    ReadFailed(String),

    #[error("stored cart is corrupt: {0}")]
    CorruptState(String),

    #[error("failed to save cart: {0}")]
    WriteFailed(String),

    #[error("failed to delete stored cart: {0}")]
    RemoveFailed(String),
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Ownership
/// The cart exclusively owns its line items and the store handle. Pass
/// `&mut store` to keep the store after the cart is dropped.
///
/// ## Usage
/// ```rust
/// use storefront_core::{Cart, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// {
///     let mut cart = Cart::load(&mut store);
///     cart.add_item("spray-100ml", 2, 19.99).unwrap();
/// }
///
/// let cart = Cart::load(&mut store);
/// assert_eq!(cart.item_count(), 2);
/// assert_eq!(cart.total().cents(), 3998);
/// ```
#[derive(Debug)]
pub struct Cart<S: KeyValueStore> {
    items: Vec<CartLineItem>,
    store: S,
    key: String,
    load_status: LoadStatus,
    diagnostics: Vec<CartDiagnostic>,
}

impl<S: KeyValueStore> Cart<S> {
    /// Loads the cart stored under [`DEFAULT_CART_KEY`], or starts empty.
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, DEFAULT_CART_KEY)
    }

    /// Loads the cart stored under `key`, or starts empty.
    ///
    /// Unreadable or malformed data is never an error: the cart starts
    /// empty, logs a warning and records a diagnostic.
    pub fn load_with_key(store: S, key: impl Into<String>) -> Self {
        let mut cart = Cart {
            items: Vec::new(),
            store,
            key: key.into(),
            load_status: LoadStatus::Fresh,
            diagnostics: Vec::new(),
        };

        match cart.store.get(&cart.key) {
            Ok(None) => {
                debug!(key = %cart.key, "no stored cart");
            }
            Ok(Some(raw)) => match decode_items(&raw) {
                Ok(items) => {
                    debug!(key = %cart.key, items = items.len(), "restored cart");
                    cart.load_status = LoadStatus::Restored { items: items.len() };
                    cart.items = items;
                }
                Err(reason) => {
                    cart.load_status = LoadStatus::Recovered;
                    cart.record(CartDiagnostic::CorruptState(reason));
                }
            },
            Err(err) => {
                cart.load_status = LoadStatus::Recovered;
                cart.record(CartDiagnostic::ReadFailed(err.to_string()));
            }
        }

        cart
    }

    /// Adds a product or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Already in cart: quantity increases, the ORIGINAL price is kept
    /// - Not in cart: appended as a new line
    /// - Persisted after every successful call
    ///
    /// ## Errors
    /// - [`CartError::InvalidQuantity`] when `quantity < 1`
    /// - [`CartError::InvalidPrice`] when `unit_price <= 0` or not finite
    pub fn add_item(
        &mut self,
        id: impl Into<String>,
        quantity: i64,
        unit_price: f64,
    ) -> CartResult<()> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }
        let unit_price = UnitPrice::new(unit_price).ok_or(CartError::InvalidPrice)?;

        let id = id.into();
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| CartError::QuantityOverflow { id: id.clone() })?;
                debug!(id = %id, quantity = item.quantity, "increased cart quantity");
            }
            None => {
                debug!(id = %id, quantity, price = %unit_price, "added cart item");
                self.items.push(CartLineItem::new(id, quantity, unit_price));
            }
        }

        self.persist();
        Ok(())
    }

    /// Removes a product. Absent ids are a no-op.
    ///
    /// Returns true if a line was removed (and the cart persisted).
    pub fn remove_item(&mut self, id: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };

        self.items.remove(index);
        debug!(id, "removed cart item");
        self.persist();
        true
    }

    /// Sets the quantity of a product.
    ///
    /// ## Behavior
    /// - `0` removes the line (same as [`Cart::remove_item`])
    /// - Unknown id: no-op
    ///
    /// ## Errors
    /// - [`CartError::NegativeQuantity`] when `quantity < 0`
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> CartResult<()> {
        if quantity < 0 {
            return Err(CartError::NegativeQuantity);
        }
        if quantity == 0 {
            self.remove_item(id);
            return Ok(());
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
            debug!(id, quantity, "updated cart quantity");
            self.persist();
        }
        Ok(())
    }

    /// Sum of unit price × quantity over all lines, rounded to cents.
    /// Zero when empty.
    pub fn total(&self) -> Money {
        Money::rounded(self.items.iter().map(CartLineItem::line_amount).sum())
    }

    /// Sum of quantities over all lines. Zero when empty. Saturates.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Looks up a line by product id.
    pub fn get_item(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empties the cart and deletes the durable record.
    ///
    /// A cart loaded afterwards behaves exactly like one that was never saved.
    pub fn clear(&mut self) {
        self.items.clear();
        match self.store.remove(&self.key) {
            Ok(()) => debug!(key = %self.key, "cleared cart"),
            Err(err) => self.record(CartDiagnostic::RemoveFailed(err.to_string())),
        }
    }

    /// Detached copy of the items with derived totals.
    pub fn to_snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }

    /// Payload for the checkout-session endpoint, or `None` if empty.
    pub fn checkout_request(&self) -> Option<CheckoutRequest> {
        if self.is_empty() {
            return None;
        }
        Some(CheckoutRequest {
            quantity: self.item_count(),
        })
    }

    /// How the cart was initialised.
    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    /// Storage problems absorbed since the cart was loaded.
    pub fn diagnostics(&self) -> &[CartDiagnostic] {
        &self.diagnostics
    }

    /// The key the cart is mirrored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives the store back, dropping the in-memory cart.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&StoredCartRef { items: &self.items }) {
            Ok(payload) => payload,
            Err(err) => {
                self.record(CartDiagnostic::WriteFailed(err.to_string()));
                return;
            }
        };

        if let Err(err) = self.store.set(&self.key, &payload) {
            self.record(CartDiagnostic::WriteFailed(err.to_string()));
        }
    }

    fn record(&mut self, diagnostic: CartDiagnostic) {
        warn!(key = %self.key, %diagnostic, "cart storage problem");
        self.diagnostics.push(diagnostic);
    }
}

/// Parses a stored cart and checks the line invariants.
fn decode_items(raw: &str) -> Result<Vec<CartLineItem>, String> {
    let stored: StoredCart = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let items = stored.items.unwrap_or_default();

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if item.quantity < 1 {
            return Err(format!("line {} has quantity {}", item.id, item.quantity));
        }
        if !item.unit_price.is_valid() {
            return Err(format!("line {} has non-positive price", item.id));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(format!("line {} appears more than once", item.id));
        }
    }

    Ok(items)
}

// =============================================================================
// Unit Tests
// =============================================================================
