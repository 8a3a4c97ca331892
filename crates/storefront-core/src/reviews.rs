//! # Reviews
//!
//! Shaping customer reviews for the reviews endpoint and the product page.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReviewSubmission ──approve()──► Review ──► ReviewFeed { reviews }      │
//! │  (raw form post)                 (trimmed,    │                         │
//! │                                   dated)      ▼                         │
//! │                                  displayable() = valid + newest first   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and moderation of reviews belong to the collaborator service;
//! this module only validates and orders. Text is stored as written and
//! escaped when it is rendered.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MAX_RATING;

// =============================================================================
// Review
// =============================================================================

/// An approved review as served by the reviews endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Review {
    pub id: String,
    /// 1..=5 when displayable; the feed is not trusted.
    pub rating: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub review: String,
    /// `YYYY-MM-DD`.
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// The reviewer left an email address.
    #[serde(default)]
    pub verified: bool,
}

impl Review {
    /// Turns a raw submission into an approved review.
    ///
    /// The rating is parsed leniently and clamped to 1..=5. Text fields are
    /// trimmed but otherwise kept as written.
    pub fn approve(submission: &ReviewSubmission, id: impl Into<String>, today: NaiveDate) -> Self {
        Review {
            id: id.into(),
            rating: parse_rating(&submission.rating),
            name: submission.name.trim().to_string(),
            review: submission.review.trim().to_string(),
            date: today,
            verified: submission
                .email
                .as_deref()
                .is_some_and(|email| !email.trim().is_empty()),
        }
    }

    /// Rating in range and both text fields non-blank.
    pub fn is_displayable(&self) -> bool {
        (1..=i64::from(MAX_RATING)).contains(&self.rating)
            && !self.name.trim().is_empty()
            && !self.review.trim().is_empty()
    }

    /// `★★★★☆` for a four-star review.
    pub fn stars(&self) -> String {
        star_rating(self.rating)
    }
}

/// The raw review form post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ReviewSubmission {
    /// As typed or clicked; parsed leniently on approval.
    pub rating: String,
    pub name: String,
    pub review: String,
    pub email: Option<String>,
}

/// Reviews endpoint payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReviewFeed {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl ReviewFeed {
    /// Displayable reviews, newest first.
    pub fn displayable(self) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .into_iter()
            .filter(Review::is_displayable)
            .collect();
        sort_newest_first(&mut reviews);
        reviews
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Sorts by date, newest first. Same-day reviews keep their order.
pub fn sort_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Filled stars for the rating, empty stars for the rest (clamped to 0..=5).
///
/// ## Example
/// ```rust
/// use storefront_core::reviews::star_rating;
///
/// assert_eq!(star_rating(4), "★★★★☆");
/// assert_eq!(star_rating(0), "☆☆☆☆☆");
/// ```
pub fn star_rating(rating: i64) -> String {
    let max = usize::from(MAX_RATING);
    let filled = rating.clamp(0, max as i64) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(max - filled))
}

/// Word shown next to the star picker.
pub fn rating_label(rating: i64) -> Option<&'static str> {
    match rating {
        1 => Some("Poor"),
        2 => Some("Fair"),
        3 => Some("Good"),
        4 => Some("Very Good"),
        5 => Some("Excellent"),
        _ => None,
    }
}

/// Leading integer of `raw`, clamped to 1..=5; anything unparseable is 1.
fn parse_rating(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['-', '+']));
    let digits_len = raw[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len() - sign_len);

    raw[..sign_len + digits_len]
        .parse::<i64>()
        .map(|rating| rating.clamp(1, i64::from(MAX_RATING)))
        .unwrap_or(1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn review(id: &str, rating: i64, day: u32) -> Review {
        Review {
            id: id.to_string(),
            rating,
            name: "Sam".to_string(),
            review: "Works great".to_string(),
            date: date(2025, 6, day),
            verified: false,
        }
    }

    #[test]
    fn test_star_rating() {
        assert_eq!(star_rating(5), "★★★★★");
        assert_eq!(star_rating(1), "★☆☆☆☆");
        assert_eq!(star_rating(9), "★★★★★");
        assert_eq!(star_rating(-2), "☆☆☆☆☆");
    }

    #[test]
    fn test_parse_rating_is_lenient() {
        assert_eq!(parse_rating("4"), 4);
        assert_eq!(parse_rating(" 3 stars"), 3);
        assert_eq!(parse_rating("7"), 5);
        assert_eq!(parse_rating("0"), 1);
        assert_eq!(parse_rating("-3"), 1);
        assert_eq!(parse_rating("great"), 1);
        assert_eq!(parse_rating(""), 1);
    }

    #[test]
    fn test_approve_trims_and_dates() {
        let submission = ReviewSubmission {
            rating: "5".to_string(),
            name: "  Pat <b>O'Neil</b> ".to_string(),
            review: " Smells \"amazing\" & lasts ".to_string(),
            email: Some("pat@example.com".to_string()),
        };

        let approved = Review::approve(&submission, "r-1", date(2025, 6, 1));
        assert_eq!(
            approved,
            Review {
                id: "r-1".to_string(),
                rating: 5,
                name: "Pat <b>O'Neil</b>".to_string(),
                review: "Smells \"amazing\" & lasts".to_string(),
                date: date(2025, 6, 1),
                verified: true,
            }
        );
    }

    #[test]
    fn test_approve_without_email_is_unverified() {
        let submission = ReviewSubmission {
            rating: "4".to_string(),
            name: "Pat".to_string(),
            review: "Nice".to_string(),
            email: Some("  ".to_string()),
        };
        assert!(!Review::approve(&submission, "r-2", date(2025, 6, 1)).verified);
    }

    #[test]
    fn test_is_displayable() {
        assert!(review("a", 5, 1).is_displayable());
        assert!(!review("a", 6, 1).is_displayable());
        assert!(!review("a", 0, 1).is_displayable());

        let mut blank = review("a", 5, 1);
        blank.review = "   ".to_string();
        assert!(!blank.is_displayable());
    }

    #[test]
    fn test_feed_displayable_sorted_newest_first() {
        let feed: ReviewFeed = serde_json::from_str(
            r#"{"reviews":[
                {"id":"old","rating":4,"name":"A","review":"ok","date":"2025-01-02","verified":true},
                {"id":"bad","rating":9,"name":"B","review":"spam","date":"2025-03-01"},
                {"id":"new","rating":5,"name":"C","review":"great","date":"2025-02-10"}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<String> = feed.displayable().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["new".to_string(), "old".to_string()]);
    }

    #[test]
    fn test_sort_is_stable_within_a_day() {
        let mut reviews = vec![review("first", 5, 3), review("second", 4, 3), review("newer", 3, 4)];
        sort_newest_first(&mut reviews);

        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "first", "second"]);
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(rating_label(4), Some("Very Good"));
        assert_eq!(rating_label(0), None);
    }

    #[test]
    fn test_review_date_format() {
        let json = serde_json::to_value(review("a", 5, 9)).unwrap();
        assert_eq!(json["date"], "2025-06-09");
    }
}
