//! # Exams
//!
//! An exam is an ordered selection of items for one subject.
//!
//! ## Numbering
//! Items are numbered from 1 in the order they appear. Removing or moving an
//! item renumbers the rest so the sequence stays contiguous, and `item_count`
//! always matches the number of items.
//!
//! ## Visibility
//! - PRIVATE: only the creator
//! - SCHOOL: members of the same school (membership is not tracked yet, so
//!   nobody passes this check)
//! - PUBLIC: everyone
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hierarchy::CodePair;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExamError {
    #[error("Item {0} is already part of the exam")]
    DuplicateItem(i64),

    #[error("Item {0} is not part of the exam")]
    ItemNotFound(i64),

    #[error("Position {position} is outside 1..={count}")]
    InvalidPosition { position: usize, count: usize },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamVisibility {
    Private,
    #[default]
    School,
    Public,
}

impl ExamVisibility {
    pub fn title(self) -> &'static str {
        match self {
            ExamVisibility::Private => "비공개",
            ExamVisibility::School => "학교 공개",
            ExamVisibility::Public => "전체 공개",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExamVisibility::Private => "시험 생성자만 접근 가능",
            ExamVisibility::School => "같은 학교 구성원만 접근 가능",
            ExamVisibility::Public => "모든 사용자 접근 가능",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExamItem {
    pub exam_id: i64,
    pub item_id: i64,
    pub item_no: usize,
}

impl ExamItem {
    pub fn is_first(&self) -> bool {
        self.item_no == 1
    }

    pub fn is_last(&self, total: usize) -> bool {
        self.item_no == total
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exam {
    pub id: i64,
    pub exam_name: String,
    pub subject_id: Option<i64>,
    pub large_chapter: Option<CodePair>,
    pub item_count: usize,
    pub preview_url: Option<String>,
    pub file_url: Option<String>,
    pub is_public: bool,
    pub visibility: ExamVisibility,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<ExamItem>,
}

impl Exam {
    pub fn new(id: i64, exam_name: &str, created_by: Option<&str>) -> Self {
        let now = Utc::now();

        Self {
            id,
            exam_name: exam_name.to_string(),
            subject_id: None,
            large_chapter: None,
            item_count: 0,
            preview_url: None,
            file_url: None,
            is_public: false,
            visibility: ExamVisibility::default(),
            created_by: created_by.map(str::to_string),
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.item_no = index + 1;
        }

        self.item_count = self.items.len();
        self.touch();
    }

    fn position_of(&self, item_id: i64) -> Result<usize, ExamError> {
        self.items
            .iter()
            .position(|item| item.item_id == item_id)
            .ok_or(ExamError::ItemNotFound(item_id))
    }

    pub fn add_item(&mut self, item_id: i64) -> Result<&ExamItem, ExamError> {
        if self.items.iter().any(|item| item.item_id == item_id) {
            return Err(ExamError::DuplicateItem(item_id));
        }

        self.items.push(ExamItem {
            exam_id: self.id,
            item_id,
            item_no: self.items.len() + 1,
        });
        self.renumber();

        Ok(&self.items[self.items.len() - 1])
    }

    pub fn remove_item(&mut self, item_id: i64) -> Result<ExamItem, ExamError> {
        let index = self.position_of(item_id)?;
        let removed = self.items.remove(index);
        self.renumber();

        Ok(removed)
    }

    /// Moves an item to the 1-based `position`, shifting the others.
    pub fn move_item(&mut self, item_id: i64, position: usize) -> Result<(), ExamError> {
        let count = self.items.len();
        if position == 0 || position > count {
            return Err(ExamError::InvalidPosition { position, count });
        }

        let index = self.position_of(item_id)?;
        let item = self.items.remove(index);
        self.items.insert(position - 1, item);
        self.renumber();

        Ok(())
    }

    pub fn publish(&mut self) {
        self.is_public = true;
        self.visibility = ExamVisibility::Public;
        self.touch();
    }

    pub fn make_private(&mut self) {
        self.is_public = false;
        self.visibility = ExamVisibility::Private;
        self.touch();
    }

    pub fn share_with_school(&mut self) {
        self.is_public = false;
        self.visibility = ExamVisibility::School;
        self.touch();
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by.as_deref() == Some(user_id)
    }

    pub fn is_accessible_by(&self, user_id: &str, _school_id: Option<i64>) -> bool {
        match self.visibility {
            ExamVisibility::Public => true,
            ExamVisibility::Private => self.is_owned_by(user_id),
            ExamVisibility::School => false,
        }
    }

    pub fn has_large_chapter(&self) -> bool {
        self.large_chapter.as_ref().is_some_and(CodePair::is_valid)
    }

    pub fn chapter_display_name(&self) -> String {
        self.large_chapter
            .as_ref()
            .map(CodePair::display_name)
            .unwrap_or_default()
    }
}
