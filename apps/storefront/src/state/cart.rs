//! # Cart State
//!
//! Opens the durable store and loads the shopper's cart.
//!
//! ## Per-Invocation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront cart <command>                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  open_cart(config)                                                     │
//! │       ├── FileStore::open(data dir)     ← error here is fatal          │
//! │       └── Cart::load_with_key(key)      ← never fails, may recover     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  command mutates the cart  ──► every mutation rewrites the record      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  process exits; the next invocation reloads from disk                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{Cart, LoadStatus};
use storefront_storage::FileStore;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::StorefrontConfig;

/// The cart as the CLI uses it.
pub type StoreCart = Cart<FileStore>;

/// Opens the configured store and loads the cart stored in it.
pub fn open_cart(config: &StorefrontConfig) -> Result<StoreCart, ApiError> {
    let store = FileStore::open(config.resolve_data_dir()?)?;
    let cart = Cart::load_with_key(store, config.cart_key.as_str());

    match cart.load_status() {
        LoadStatus::Fresh => debug!(key = %config.cart_key, "starting with an empty cart"),
        LoadStatus::Restored { items } => debug!(items, "restored cart"),
        LoadStatus::Recovered => warn!(
            key = %config.cart_key,
            "stored cart was unreadable; starting empty"
        ),
    }

    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..StorefrontConfig::default()
        }
    }

    #[test]
    fn test_open_cart_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let mut cart = open_cart(&config).unwrap();
        assert_eq!(cart.load_status(), LoadStatus::Fresh);
        cart.add_item("spray-100ml", 1, 19.99).unwrap();
        drop(cart);

        let cart = open_cart(&config).unwrap();
        assert_eq!(cart.load_status(), LoadStatus::Restored { items: 1 });
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_open_cart_uses_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            cart_key: "preview-cart".to_string(),
            ..config_in(&dir)
        };

        let mut cart = open_cart(&config).unwrap();
        cart.add_item("spray-100ml", 1, 19.99).unwrap();

        assert!(dir.path().join("preview-cart.json").is_file());
    }
}
