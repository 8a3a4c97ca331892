//! # Storefront Entry Point
//!
//! ```text
//! $ storefront cart add spray-100ml 2 19.99
//! $ storefront form contact --name Jane --email jane@example.com --message "..."
//! $ storefront reviews list reviews.json
//! $ storefront site status
//! ```
//!
//! The actual setup is in `lib.rs` for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    storefront_lib::run()
}
