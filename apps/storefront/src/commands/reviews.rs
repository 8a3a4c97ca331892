//! # Review Commands
//!
//! Commands behind `storefront reviews ...`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reviews list <file>                                                   │
//! │       │  read { "reviews": [...] }                                      │
//! │       ▼                                                                 │
//! │  ReviewFeed::displayable() ──► drop invalid, newest first              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  [{ ...review (HTML-escaped), "stars": "★★★★☆" }]                      │
//! │                                                                         │
//! │  reviews approve --rating 5 --name ... --review ...                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Review::approve(submission, uuid, today) ──► trimmed, dated review    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use storefront_core::reviews::rating_label;
use storefront_core::validation::escape_html;
use storefront_core::{Review, ReviewFeed, ReviewSubmission};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// A review ready for the product page.
///
/// Name and review text are HTML-escaped here, never in the stored feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub stars: String,
    pub label: Option<&'static str>,
}

impl From<Review> for ReviewView {
    fn from(mut review: Review) -> Self {
        review.name = escape_html(&review.name);
        review.review = escape_html(&review.review);
        ReviewView {
            stars: review.stars(),
            label: rating_label(review.rating),
            review,
        }
    }
}

/// Reads a reviews feed and returns the displayable reviews, newest first.
pub fn list_reviews(path: &Path) -> Result<Vec<ReviewView>, ApiError> {
    debug!(path = %path.display(), "list_reviews command");

    let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ApiError::not_found("Reviews file", &path.display().to_string()),
        _ => ApiError::internal(format!("Failed to read {}: {}", path.display(), err)),
    })?;
    let feed: ReviewFeed = serde_json::from_str(&raw)?;

    let total = feed.reviews.len();
    let reviews: Vec<ReviewView> = feed.displayable().into_iter().map(ReviewView::from).collect();
    if reviews.len() < total {
        warn!(skipped = total - reviews.len(), "skipped reviews that cannot be displayed");
    }

    Ok(reviews)
}

/// Approves a submitted review with a fresh id.
pub fn approve_review(submission: &ReviewSubmission, today: NaiveDate) -> Result<Review, ApiError> {
    let review = Review::approve(submission, Uuid::new_v4().to_string(), today);
    if !review.is_displayable() {
        return Err(ApiError::validation("Review needs a name and review text"));
    }

    info!(id = %review.id, rating = review.rating, "approved review");
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_list_reviews() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"reviews":[
                {{"id":"1","rating":4,"name":"A","review":"ok","date":"2025-01-02","verified":true}},
                {{"id":"2","rating":0,"name":"B","review":"bad","date":"2025-05-01"}},
                {{"id":"3","rating":5,"name":"C","review":"great","date":"2025-02-10"}}
            ]}}"#
        )
        .unwrap();

        let reviews = list_reviews(file.path()).unwrap();
        let ids: Vec<&str> = reviews.iter().map(|r| r.review.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(reviews[0].stars, "★★★★★");
        assert_eq!(reviews[1].label, Some("Very Good"));

        let json = serde_json::to_value(&reviews[0]).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["stars"], "★★★★★");
    }

    #[test]
    fn test_list_reviews_escapes_text_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"reviews":[
                {{"id":"1","rating":5,"name":"Tom & Jerry","review":"It's <great>","date":"2025-01-02"}}
            ]}}"#
        )
        .unwrap();

        let reviews = list_reviews(file.path()).unwrap();
        assert_eq!(reviews[0].review.name, "Tom &amp; Jerry");
        assert_eq!(reviews[0].review.review, "It&#39;s &lt;great&gt;");
    }

    #[test]
    fn test_list_reviews_missing_file() {
        let err = list_reviews(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_list_reviews_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = list_reviews(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_approve_review() {
        let submission = ReviewSubmission {
            rating: "5".to_string(),
            name: "Pat".to_string(),
            review: "Lovely".to_string(),
            email: None,
        };
        let review = approve_review(&submission, today()).unwrap();

        assert!(Uuid::parse_str(&review.id).is_ok());
        assert_eq!(review.name, "Pat");
        assert_eq!(review.date, today());
        assert!(!review.verified);
    }

    #[test]
    fn test_approve_review_requires_text() {
        let submission = ReviewSubmission {
            rating: "5".to_string(),
            name: " ".to_string(),
            review: "Lovely".to_string(),
            email: None,
        };
        assert!(approve_review(&submission, today()).is_err());
    }
}
