//! # storefront-storage: Durable Storage for the Storefront
//!
//! File-backed implementation of the cart's [`KeyValueStore`] contract.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CLI command (cart add)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart<FileStore> (storefront-core)                                     │
//! │       │  get / set / remove                                             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-storage (THIS CRATE)                 │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  FileStore    │    │  data dir     │    │  errors      │  │   │
//! │  │   │  one file per │    │  ProjectDirs  │    │  io → Storage│  │   │
//! │  │   │  key, atomic  │    │  or override  │    │  Error       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/storefront/storefront-cart.json                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use storefront_core::Cart;
//! use storefront_storage::FileStore;
//!
//! let store = FileStore::open_default()?;
//! let cart = Cart::load(store);
//! println!("{} items", cart.item_count());
//! # Ok::<(), storefront_storage::FileStoreError>(())
//! ```
//!
//! [`KeyValueStore`]: storefront_core::KeyValueStore

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file_store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{FileStoreError, FileStoreResult};
pub use file_store::{default_data_dir, FileStore};
