//! # Item Images
//!
//! Rendered item assets (passage, question, answer, explanation) and the
//! chapter codes they are filed under.
//!
//! ## Code Layout
//! Chapter codes are fixed-width decimal prefixes of each other:
//! - subject: 4 digits
//! - large chapter: 6 digits
//! - medium chapter: 8 digits
//! - small chapter: 10 digits
//! - topic chapter: the full code
//!
//! So every ancestor of a topic code can be recovered by keeping its leftmost
//! digits.
use serde::{Deserialize, Serialize};

pub const SUBJECT_WIDTH: usize = 4;
pub const LARGE_WIDTH: usize = 6;
pub const MEDIUM_WIDTH: usize = 8;
pub const SMALL_WIDTH: usize = 10;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemImageDocument {
    pub item_id: Option<i64>,
    pub passage_url: Option<String>,
    pub question_url: Option<String>,
    pub answer_url: Option<String>,
    pub explain_url: Option<String>,
    pub subject_id: Option<i64>,
    pub large_chapter_id: Option<i64>,
    pub medium_chapter_id: Option<i64>,
    pub small_chapter_id: Option<i64>,
    pub topic_chapter_id: Option<i64>,
    pub difficulty_code: Option<i64>,
}

/// Keeps the leftmost `width` decimal digits of `code`.
///
/// Codes that already fit are returned unchanged, there is no padding.
pub fn truncate_code(code: i64, width: usize) -> i64 {
    let digits = code.to_string();

    if digits.len() <= width {
        return code;
    }

    digits[..width].parse().unwrap_or(code)
}

/// Every level of the hierarchy a topic code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncestorCodes {
    pub subject: i64,
    pub large: i64,
    pub medium: i64,
    pub small: i64,
    pub topic: i64,
}

impl AncestorCodes {
    pub fn from_topic(topic: i64) -> Self {
        Self {
            subject: truncate_code(topic, SUBJECT_WIDTH),
            large: truncate_code(topic, LARGE_WIDTH),
            medium: truncate_code(topic, MEDIUM_WIDTH),
            small: truncate_code(topic, SMALL_WIDTH),
            topic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_leftmost_digits() {
        let code = 123_456_789_012;

        assert_eq!(truncate_code(code, 4), 1234);
        assert_eq!(truncate_code(code, 6), 123_456);
        assert_eq!(truncate_code(code, 8), 12_345_678);
        assert_eq!(truncate_code(code, 10), 1_234_567_890);
    }

    #[test]
    fn test_short_code_passes_through() {
        assert_eq!(truncate_code(42, 4), 42);
        assert_eq!(truncate_code(1234, 4), 1234);
    }

    #[test]
    fn test_ancestors_from_topic() {
        let ancestors = AncestorCodes::from_topic(123_456_789_012);

        assert_eq!(
            ancestors,
            AncestorCodes {
                subject: 1234,
                large: 123_456,
                medium: 12_345_678,
                small: 1_234_567_890,
                topic: 123_456_789_012,
            }
        );
    }

    #[test]
    fn test_document_wire_names() {
        let doc = ItemImageDocument {
            item_id: Some(7),
            topic_chapter_id: Some(99),
            ..Default::default()
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["itemId"], 7);
        assert_eq!(json["topicChapterId"], 99);
        assert!(json["passageUrl"].is_null());
    }
}
