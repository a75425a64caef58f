//! Transport shapes for catalog records.
//!
//! Plain field copies. Missing pairs become missing fields and are left out of
//! the serialized JSON.
use serde::Serialize;

use crate::{
    hierarchy::{ChapterRow, LabelPair, code_of, name_of},
    subject::Subject,
};

fn label_code(pair: &Option<LabelPair>) -> Option<String> {
    pair.as_ref().and_then(|p| p.code.clone())
}

fn label_name(pair: &Option<LabelPair>) -> Option<String> {
    pair.as_ref().and_then(|p| p.name.clone())
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResponse {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curriculum_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curriculum_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_chapter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_chapter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_chapter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_chapter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_chapter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_chapter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_chapter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_chapter_name: Option<String>,
    pub chapter_path: String,
    pub chapter_depth: u8,
}

impl From<&ChapterRow> for ChapterResponse {
    fn from(row: &ChapterRow) -> Self {
        Self {
            id: row.id,
            subject_id: row.subject_id,
            subject_name: row.subject_name.clone(),
            curriculum_code: label_code(&row.curriculum),
            curriculum_name: label_name(&row.curriculum),
            large_chapter_id: code_of(&row.large),
            large_chapter_name: name_of(&row.large),
            medium_chapter_id: code_of(&row.medium),
            medium_chapter_name: name_of(&row.medium),
            small_chapter_id: code_of(&row.small),
            small_chapter_name: name_of(&row.small),
            topic_chapter_id: code_of(&row.topic),
            topic_chapter_name: name_of(&row.topic),
            chapter_path: row.chapter_path(),
            chapter_depth: row.chapter_depth(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub subject_id: i64,
    pub subject_name: Option<String>,
    pub subject_thumbnail: Option<String>,
    pub curriculum_code: Option<String>,
    pub curriculum_name: Option<String>,
    pub school_level_code: Option<String>,
    pub school_level_name: Option<String>,
    pub grade_code: Option<String>,
    pub grade_name: Option<String>,
    pub term_code: Option<String>,
    pub term_name: Option<String>,
    pub area_code: Option<String>,
    pub area_name: Option<String>,
}

impl From<&Subject> for SubjectResponse {
    fn from(subject: &Subject) -> Self {
        Self {
            subject_id: subject.subject_id,
            subject_name: subject.subject_name.clone(),
            subject_thumbnail: subject.subject_thumbnail.clone(),
            curriculum_code: label_code(&subject.curriculum),
            curriculum_name: label_name(&subject.curriculum),
            school_level_code: label_code(&subject.school_level),
            school_level_name: label_name(&subject.school_level),
            grade_code: label_code(&subject.grade),
            grade_name: label_name(&subject.grade),
            term_code: label_code(&subject.term),
            term_name: label_name(&subject.term),
            area_code: label_code(&subject.area),
            area_name: label_name(&subject.area),
        }
    }
}

pub fn chapter_responses<'a, I>(rows: I) -> Vec<ChapterResponse>
where
    I: IntoIterator<Item = &'a ChapterRow>,
{
    rows.into_iter().map(ChapterResponse::from).collect()
}

pub fn subject_responses<'a, I>(subjects: I) -> Vec<SubjectResponse>
where
    I: IntoIterator<Item = &'a Subject>,
{
    subjects.into_iter().map(SubjectResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::CodePair;

    #[test]
    fn test_chapter_response_copies_fields() {
        let row = ChapterRow {
            id: 3,
            subject_id: Some(1001),
            subject_name: Some("수학".into()),
            curriculum: Some(LabelPair::new("2015", "2015 개정")),
            large: Some(CodePair::new(100_101, "수와 연산")),
            medium: Some(CodePair::new(10_010_101, "소인수분해")),
            ..Default::default()
        };

        let response = ChapterResponse::from(&row);

        assert_eq!(response.curriculum_code.as_deref(), Some("2015"));
        assert_eq!(response.large_chapter_id, Some(100_101));
        assert_eq!(response.medium_chapter_name.as_deref(), Some("소인수분해"));
        assert_eq!(response.small_chapter_id, None);
        assert_eq!(response.chapter_path, "수와 연산 > 소인수분해");
        assert_eq!(response.chapter_depth, 2);
    }

    #[test]
    fn test_chapter_response_omits_missing_fields() {
        let response = ChapterResponse::from(&ChapterRow {
            id: 9,
            ..Default::default()
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["chapterDepth"], 0);
        assert!(json.get("largeChapterId").is_none());
        assert!(json.get("subjectName").is_none());
    }

    #[test]
    fn test_subject_response_copies_labels() {
        let subject = Subject {
            subject_id: 1001,
            grade: Some(LabelPair::new("1", "1학년")),
            ..Default::default()
        };

        let responses = subject_responses([&subject]);

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].grade_code.as_deref(), Some("1"));
        assert_eq!(responses[0].term_name, None);
    }
}
