//! # Chapter Hierarchy
//!
//! Flat classification rows for a subject.
//!
//! Every row carries up to four nested levels, large -> medium -> small -> topic,
//! each one a numeric code with a display name. A row may stop at any depth.
//!
//! ## Ordering
//! The tree builder depends on rows arriving grouped by their codes. The
//! relational source guaranteed this with an `ORDER BY` over the four codes,
//! so [`sort_rows`] reproduces that ordering for in-memory sources.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const PATH_SEPARATOR: &str = " > ";

/// Numeric classification value at one hierarchy level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodePair {
    pub code: Option<i64>,
    pub name: Option<String>,
}

impl CodePair {
    pub fn new(code: i64, name: &str) -> Self {
        Self {
            code: Some(code),
            name: Some(name.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.code.is_some()
    }

    pub fn display_name(&self) -> String {
        match (&self.name, self.code) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(code)) => code.to_string(),
            _ => String::new(),
        }
    }
}

/// Textual classification value (curriculum, grade, term, ...).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelPair {
    pub code: Option<String>,
    pub name: Option<String>,
}

impl LabelPair {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.code.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    pub fn display_name(&self) -> String {
        match (&self.name, &self.code) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(code)) => code.clone(),
            _ => String::new(),
        }
    }

    pub fn has_code(&self, target: &str) -> bool {
        self.code.as_deref() == Some(target)
    }
}

/// Returns the code of a pair, treating a missing pair and a missing code alike.
pub fn code_of(pair: &Option<CodePair>) -> Option<i64> {
    pair.as_ref().and_then(|p| p.code)
}

pub fn name_of(pair: &Option<CodePair>) -> Option<String> {
    pair.as_ref().and_then(|p| p.name.clone())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ChapterRow {
    pub id: i64,
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub curriculum: Option<LabelPair>,
    #[serde(default)]
    pub large: Option<CodePair>,
    #[serde(default)]
    pub medium: Option<CodePair>,
    #[serde(default)]
    pub small: Option<CodePair>,
    #[serde(default)]
    pub topic: Option<CodePair>,
}

impl ChapterRow {
    fn levels(&self) -> [&Option<CodePair>; 4] {
        [&self.large, &self.medium, &self.small, &self.topic]
    }

    fn codes(&self) -> [Option<i64>; 4] {
        self.levels().map(code_of)
    }

    /// Breadcrumb of the level names that are present, e.g. `"Algebra > Equations"`.
    pub fn chapter_path(&self) -> String {
        self.levels()
            .into_iter()
            .filter_map(name_of)
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }

    /// Breadcrumb over valid pairs, falling back to the code when a name is blank.
    pub fn display_path(&self) -> String {
        self.levels()
            .into_iter()
            .flatten()
            .filter(|pair| pair.is_valid())
            .map(CodePair::display_name)
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }

    /// Deepest level with a code: 4 topic, 3 small, 2 medium, 1 large, 0 none.
    pub fn chapter_depth(&self) -> u8 {
        self.codes()
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |index| index as u8 + 1)
    }

    pub fn has_large(&self) -> bool {
        code_of(&self.large).is_some()
    }

    pub fn has_medium(&self) -> bool {
        code_of(&self.medium).is_some()
    }

    pub fn has_small(&self) -> bool {
        code_of(&self.small).is_some()
    }

    pub fn has_topic(&self) -> bool {
        code_of(&self.topic).is_some()
    }

    /// Every provided code has to equal the row's code at that level.
    pub fn matches_hierarchy(
        &self,
        large: Option<i64>,
        medium: Option<i64>,
        small: Option<i64>,
        topic: Option<i64>,
    ) -> bool {
        [large, medium, small, topic]
            .into_iter()
            .zip(self.codes())
            .all(|(wanted, actual)| wanted.is_none() || wanted == actual)
    }
}

fn compare_codes(a: &ChapterRow, b: &ChapterRow) -> Ordering {
    a.codes().cmp(&b.codes())
}

/// Stable ascending sort by (large, medium, small, topic); absent codes sort first.
pub fn sort_rows(rows: &mut [ChapterRow]) {
    rows.sort_by(compare_codes);
}
