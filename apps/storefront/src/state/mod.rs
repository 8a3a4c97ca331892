//! # State Module
//!
//! Configuration and the durable cart for a single CLI invocation.

pub mod cart;
pub mod config;

pub use cart::{open_cart, StoreCart};
pub use config::StorefrontConfig;
