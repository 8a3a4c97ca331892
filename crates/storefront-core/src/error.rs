//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CartError     - Cart contract violations (caller bugs)            │
//! │  ├── StorageError  - Durable store failures (reported, never raised)   │
//! │  └── FormError     - Field messages shown next to form inputs          │
//! │                                                                         │
//! │  storefront-storage errors (separate crate)                            │
//! │  └── FileStoreError - File system failures → StorageError              │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError      - What the caller sees (serialized)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form problems are data, not failures: a [`FormError`] is rendered into
//! `ValidationResult::errors` and never returned through `Result`.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart operation errors.
///
/// These are programming-contract violations: the page script is expected
/// to prevent the call (e.g. the quantity input has `min="1"`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity passed to `add_item` was below one.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// Unit price was zero or negative.
    #[error("Price must be positive")]
    InvalidPrice,

    /// Quantity passed to `update_quantity` was negative.
    #[error("Quantity cannot be negative")]
    NegativeQuantity,

    /// Adding to an existing line would overflow its quantity.
    #[error("Quantity for {id} would overflow")]
    QuantityOverflow { id: String },
}

// =============================================================================
// Storage Error
// =============================================================================

/// Failures reported by a [`crate::storage::KeyValueStore`].
///
/// The cart never propagates these; it logs them and records a
/// [`crate::cart::CartDiagnostic`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing medium could not be read.
    #[error("Failed to read {key}: {reason}")]
    Read { key: String, reason: String },

    /// The backing medium could not be written.
    #[error("Failed to write {key}: {reason}")]
    Write { key: String, reason: String },

    /// The record could not be deleted.
    #[error("Failed to remove {key}: {reason}")]
    Remove { key: String, reason: String },

    /// The store is over its size limit.
    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },
}

// =============================================================================
// Form Error
// =============================================================================

/// Field-level messages produced by form validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    NameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please use a non-disposable email address")]
    DisposableEmail,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message must be at least {min} characters")]
    MessageTooShort { min: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

/// Convenience type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_messages() {
        assert_eq!(
            CartError::InvalidQuantity.to_string(),
            "Quantity must be at least 1"
        );
        assert_eq!(CartError::InvalidPrice.to_string(), "Price must be positive");
        assert_eq!(
            CartError::NegativeQuantity.to_string(),
            "Quantity cannot be negative"
        );
    }

    #[test]
    fn test_form_error_messages() {
        assert_eq!(FormError::NameRequired.to_string(), "Name is required");
        assert_eq!(
            FormError::MessageTooShort { min: 10 }.to_string(),
            "Message must be at least 10 characters"
        );
    }

    #[test]
    fn test_storage_error_messages() {
        let err = StorageError::Write {
            key: "storefront-cart".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to write storefront-cart: disk full");
    }
}
