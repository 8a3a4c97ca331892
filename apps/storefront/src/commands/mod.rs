//! # Commands Module
//!
//! Everything the CLI can do, one module per command group.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart manipulation and checkout request
//! ├── forms.rs    ◄─── Contact / newsletter validation
//! ├── reviews.rs  ◄─── Review feed listing and approval
//! └── site.rs     ◄─── Presale flag and configuration summary
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ storefront cart add spray-100ml 2 19.99                             │
//! │         │                                                               │
//! │         │ (clap parsing, cli.rs)                                        │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      cart: &mut Cart<S>,          ◄── Loaded by state::open_cart       │
//! │      config: &StorefrontConfig,   ◄── From env                         │
//! │      id, quantity, price,         ◄── From arguments                   │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization, lib.rs)                                  │
//! │         ▼                                                               │
//! │  stdout: { "items": [...], "total": 39.98, ... }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never print; they return values and `lib.rs` renders them.

pub mod cart;
pub mod forms;
pub mod reviews;
pub mod site;
