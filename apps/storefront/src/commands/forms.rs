//! # Form Commands
//!
//! Commands behind `storefront form ...`: validate a contact or newsletter
//! submission and print the `ValidationResult`.
//!
//! Submitting the sanitized data to the mail/newsletter provider belongs to
//! the site's serverless functions; a bot result is only ever logged.

use storefront_core::{
    ContactForm, FormSubmission, FormValidator, NewsletterForm, ValidationResult,
};
use tracing::{debug, info};

/// Validates a contact form submission.
pub fn submit_contact(validator: &FormValidator, form: ContactForm) -> ValidationResult {
    debug!("submit_contact command");
    validate(validator, FormSubmission::Contact(form))
}

/// Validates a newsletter signup.
pub fn submit_newsletter(validator: &FormValidator, form: NewsletterForm) -> ValidationResult {
    debug!("submit_newsletter command");
    validate(validator, FormSubmission::Newsletter(form))
}

fn validate(validator: &FormValidator, submission: FormSubmission) -> ValidationResult {
    let result = validator.validate_form(&submission);

    if result.is_bot {
        info!("submission rejected by honeypot");
    } else {
        info!(
            valid = result.is_valid,
            errors = result.errors.len(),
            "validated submission"
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::FormField;

    #[test]
    fn test_submit_contact() {
        let result = submit_contact(
            &FormValidator::default(),
            ContactForm {
                name: Some("Jane".to_string()),
                email: Some("jane@example.com".to_string()),
                message: Some("When does the large bottle ship?".to_string()),
                honeypot: None,
            },
        );
        assert!(result.is_valid);
        assert_eq!(result.sanitized.len(), 3);
    }

    #[test]
    fn test_submit_newsletter_with_configured_domain() {
        let validator = FormValidator::with_disposable_domains(["spam.example"]);
        let result = submit_newsletter(
            &validator,
            NewsletterForm {
                email: Some("x@spam.example".to_string()),
                honeypot: None,
            },
        );
        assert_eq!(
            result.error(FormField::Email),
            Some("Please use a non-disposable email address")
        );
    }

    #[test]
    fn test_bot_submission() {
        let result = submit_newsletter(
            &FormValidator::default(),
            NewsletterForm {
                email: Some("x@example.com".to_string()),
                honeypot: Some("filled".to_string()),
            },
        );
        assert!(result.is_bot);
        assert!(result.errors.is_empty());
    }
}
