//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the shopping cart
//! and the form validation rules as plain Rust with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Page scripts / CLI (apps/storefront)             │   │
//! │  │    Add to cart ──► Cart drawer ──► Checkout ──► Contact form    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │validation │  │  reviews  │  │   │
//! │  │   │   Money   │  │   Cart    │  │  forms    │  │  Review   │  │   │
//! │  │   └───────────┘  └─────┬─────┘  └───────────┘  └───────────┘  │   │
//! │  │                        │ KeyValueStore (trait)                  │   │
//! │  └────────────────────────┼────────────────────────────────────────┘   │
//! │                           │                                             │
//! │  ┌────────────────────────▼────────────────────────────────────────┐   │
//! │  │              storefront-storage (FileStore)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Listed unit prices and cent-exact totals
//! - [`cart`] - Shopping cart with durable mirroring
//! - [`storage`] - The key/value contract the cart persists through
//! - [`validation`] - Field validators and HTML sanitization
//! - [`forms`] - Contact/newsletter submissions and their validation result
//! - [`reviews`] - Customer review shaping
//! - [`types`] - Collaborator contracts and site settings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, MemoryStore};
//!
//! let mut cart = Cart::load(MemoryStore::new());
//! cart.add_item("item-1", 1, 0.1).unwrap();
//! cart.add_item("item-2", 1, 0.2).unwrap();
//!
//! assert_eq!(cart.total().to_string(), "$0.30");
//! assert_eq!(cart.item_count(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod forms;
pub mod money;
pub mod reviews;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartDiagnostic, CartLineItem, CartSnapshot, LoadStatus};
pub use error::{CartError, CartResult, FormError, StorageError, StorageResult};
pub use forms::{
    ContactForm, FormField, FormSubmission, NewsletterForm, ValidationResult,
};
pub use money::{Money, UnitPrice};
pub use reviews::{Review, ReviewFeed, ReviewSubmission};
pub use storage::{KeyValueStore, MemoryStore};
pub use types::*;
pub use validation::FormValidator;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart is mirrored under unless the caller picks another.
pub const DEFAULT_CART_KEY: &str = "storefront-cart";

/// Minimum length of a contact message, counted after trimming.
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Highest star rating a review can carry.
pub const MAX_RATING: u8 = 5;
