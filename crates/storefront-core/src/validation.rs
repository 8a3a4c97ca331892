//! # Validation Module
//!
//! Field validators, HTML sanitization and the form validator used by the
//! contact and newsletter forms.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      validate_form(submission)                          │
//! │                                                                         │
//! │  honeypot filled? ──yes──► ValidationResult::bot()  (silent, no errors) │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  Newsletter                      Contact                                │
//! │  ├── email: required             ├── name: required                     │
//! │  ├── email: format + domain      ├── email: required                    │
//! │  │   (disposable message if      ├── email: disposable domain           │
//! │  │    the domain is the cause)   ├── email: format                      │
//! │  │                               ├── message: required                  │
//! │  │                               └── message: >= 10 chars (trimmed)     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Every field that passed lands in `sanitized`; errors accumulate.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{sanitize_input, FormValidator};
//!
//! let validator = FormValidator::default();
//! assert!(validator.validate_email("a@b.co"));
//! assert!(!validator.validate_email("user@tempmail.com"));
//!
//! assert_eq!(
//!     sanitize_input(r#"<script>alert("x")</script>"#),
//!     "alert(&quot;x&quot;)"
//! );
//! ```

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::FormError;
use crate::forms::{ContactForm, FormField, FormSubmission, NewsletterForm, ValidationResult};
use crate::MIN_MESSAGE_LENGTH;

/// Throwaway-mailbox providers rejected out of the box.
pub const DEFAULT_DISPOSABLE_DOMAINS: [&str; 10] = [
    "tempmail.com",
    "guerrillamail.com",
    "mailinator.com",
    "10minutemail.com",
    "throwaway.email",
    "temp-mail.org",
    "fakeinbox.com",
    "trashmail.com",
    "sharklasers.com",
    "getnada.com",
];

/// One `@`, no whitespace, and a dot somewhere after the `@`.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Anything that looks like an HTML tag.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

// =============================================================================
// Free Validators
// =============================================================================

/// True if the value is present and not blank.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_required;
///
/// assert!(validate_required("Jane"));
/// assert!(!validate_required("   "));
/// assert!(!validate_required(None));
/// ```
pub fn validate_required<'a>(value: impl Into<Option<&'a str>>) -> bool {
    value.into().is_some_and(|v| !v.trim().is_empty())
}

/// Strips HTML tags, escapes what is left and trims the result.
///
/// Tags are stripped BEFORE escaping, so `<b>` disappears while a lone `<`
/// becomes `&lt;`. A missing value sanitizes to the empty string.
pub fn sanitize_input<'a>(value: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = value.into() else {
        return String::new();
    };

    let stripped = TAG_RE.replace_all(raw, "");
    escape(&stripped, "&#x27;").trim().to_string()
}

/// Escapes text for display inside HTML (review names and bodies).
///
/// Unlike [`sanitize_input`] nothing is stripped or trimmed.
pub fn escape_html(text: &str) -> String {
    escape(text, "&#39;")
}

fn escape(text: &str, apostrophe: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str(apostrophe),
            _ => out.push(c),
        }
    }
    out
}

/// The part after the last `@`, if any.
fn email_domain(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain)
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates emails and whole form submissions.
///
/// Holds the disposable-domain denylist; everything else is stateless.
#[derive(Debug, Clone)]
pub struct FormValidator {
    disposable_domains: BTreeSet<String>,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::with_disposable_domains(DEFAULT_DISPOSABLE_DOMAINS)
    }
}

impl FormValidator {
    /// Validator with the built-in denylist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with exactly `domains` on the denylist.
    pub fn with_disposable_domains<I, T>(domains: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut validator = FormValidator {
            disposable_domains: BTreeSet::new(),
        };
        validator.extend_disposable_domains(domains);
        validator
    }

    /// Adds domains to the denylist. Blank entries are ignored.
    pub fn extend_disposable_domains<I, T>(&mut self, domains: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.disposable_domains.extend(
            domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty()),
        );
    }

    /// The denylist, lower-cased and sorted.
    pub fn disposable_domains(&self) -> impl Iterator<Item = &str> {
        self.disposable_domains.iter().map(String::as_str)
    }

    /// True if the address is well formed and not from a disposable provider.
    pub fn validate_email<'a>(&self, email: impl Into<Option<&'a str>>) -> bool {
        let Some(email) = email.into().filter(|e| !e.is_empty()) else {
            return false;
        };
        EMAIL_RE.is_match(email) && !self.is_disposable_email(email)
    }

    /// True if the address has an `@` and its domain is on the denylist.
    ///
    /// Says nothing about whether the address is otherwise well formed.
    pub fn is_disposable_email<'a>(&self, email: impl Into<Option<&'a str>>) -> bool {
        email
            .into()
            .and_then(email_domain)
            .is_some_and(|domain| self.disposable_domains.contains(&domain.to_lowercase()))
    }

    /// Validates a whole submission.
    ///
    /// A filled honeypot short-circuits to [`ValidationResult::bot`].
    pub fn validate_form(&self, submission: &FormSubmission) -> ValidationResult {
        if submission.honeypot().is_some_and(|h| !h.trim().is_empty()) {
            debug!("honeypot filled, rejecting submission");
            return ValidationResult::bot();
        }

        match submission {
            FormSubmission::Newsletter(form) => self.validate_newsletter(form),
            FormSubmission::Contact(form) => self.validate_contact(form),
        }
    }

    fn validate_newsletter(&self, form: &NewsletterForm) -> ValidationResult {
        let mut result = ValidationResult::default();
        let email = form.email.as_deref();

        if !validate_required(email) {
            result.reject(FormField::Email, FormError::EmailRequired);
        } else if !self.validate_email(email) {
            let error = if self.is_disposable_email(email) {
                FormError::DisposableEmail
            } else {
                FormError::InvalidEmail
            };
            result.reject(FormField::Email, error);
        } else {
            result.accept(FormField::Email, sanitize_input(email));
        }

        result.finish()
    }

    fn validate_contact(&self, form: &ContactForm) -> ValidationResult {
        let mut result = ValidationResult::default();

        let name = form.name.as_deref();
        if validate_required(name) {
            result.accept(FormField::Name, sanitize_input(name));
        } else {
            result.reject(FormField::Name, FormError::NameRequired);
        }

        let email = form.email.as_deref();
        if !validate_required(email) {
            result.reject(FormField::Email, FormError::EmailRequired);
        } else if self.is_disposable_email(email) {
            result.reject(FormField::Email, FormError::DisposableEmail);
        } else if !self.validate_email(email) {
            result.reject(FormField::Email, FormError::InvalidEmail);
        } else {
            result.accept(FormField::Email, sanitize_input(email));
        }

        match form.message.as_deref() {
            Some(message) if validate_required(message) => {
                // Counted in chars, not UTF-16 units: five emoji are five
                // characters here (see "Message length" in DESIGN.md).
                if message.trim().chars().count() < MIN_MESSAGE_LENGTH {
                    result.reject(
                        FormField::Message,
                        FormError::MessageTooShort {
                            min: MIN_MESSAGE_LENGTH,
                        },
                    );
                } else {
                    result.accept(FormField::Message, sanitize_input(message));
                }
            }
            _ => result.reject(FormField::Message, FormError::MessageRequired),
        }

        result.finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
