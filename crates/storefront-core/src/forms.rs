//! # Form Submissions
//!
//! The shapes posted by the site's contact and newsletter forms, and the
//! result of validating them.
//!
//! ## Wire Shape
//! ```text
//! { "formType": "contact",    "name": "...", "email": "...", "message": "...", "honeypot": "" }
//! { "formType": "newsletter", "email": "...", "honeypot": "" }
//! ```
//!
//! Every field is optional on the wire; a missing field is treated the same
//! as a blank one by the validators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::FormError;

// =============================================================================
// Submissions
// =============================================================================

/// Fields of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    /// Hidden field; humans leave it empty.
    pub honeypot: Option<String>,
}

/// Fields of the newsletter signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NewsletterForm {
    pub email: Option<String>,
    pub honeypot: Option<String>,
}

/// A submission of one of the site's forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "formType", rename_all = "camelCase")]
#[ts(export)]
pub enum FormSubmission {
    Contact(ContactForm),
    Newsletter(NewsletterForm),
}

impl FormSubmission {
    /// The honeypot value, whichever form it came from.
    pub fn honeypot(&self) -> Option<&str> {
        match self {
            FormSubmission::Contact(form) => form.honeypot.as_deref(),
            FormSubmission::Newsletter(form) => form.honeypot.as_deref(),
        }
    }
}

impl From<ContactForm> for FormSubmission {
    fn from(form: ContactForm) -> Self {
        FormSubmission::Contact(form)
    }
}

impl From<NewsletterForm> for FormSubmission {
    fn from(form: NewsletterForm) -> Self {
        FormSubmission::Newsletter(form)
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Keys of the error and sanitized maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FormField {
    Name,
    Email,
    Message,
}

/// Outcome of `FormValidator::validate_form`.
///
/// ## States
/// ```text
/// ┌──────────────┬─────────┬────────┬─────────────────┬─────────────────┐
/// │ outcome      │ isValid │ isBot  │ errors          │ sanitized       │
/// ├──────────────┼─────────┼────────┼─────────────────┼─────────────────┤
/// │ bot          │ false   │ true   │ {}              │ {}              │
/// │ invalid      │ false   │ false  │ field → message │ valid fields    │
/// │ valid        │ true    │ false  │ {}              │ every field     │
/// └──────────────┴─────────┴────────┴─────────────────┴─────────────────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<FormField, String>,
    pub is_bot: bool,
    pub sanitized: BTreeMap<FormField, String>,
}

impl ValidationResult {
    /// Silent rejection: no field feedback for bots.
    pub fn bot() -> Self {
        ValidationResult {
            is_valid: false,
            errors: BTreeMap::new(),
            is_bot: true,
            sanitized: BTreeMap::new(),
        }
    }

    pub(crate) fn reject(&mut self, field: FormField, error: FormError) {
        self.errors.insert(field, error.to_string());
    }

    pub(crate) fn accept(&mut self, field: FormField, value: String) {
        self.sanitized.insert(field, value);
    }

    pub(crate) fn finish(mut self) -> Self {
        self.is_valid = self.errors.is_empty();
        self
    }

    /// The message for `field`, if it failed.
    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
