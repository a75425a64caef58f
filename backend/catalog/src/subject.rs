use serde::{Deserialize, Serialize};

use crate::hierarchy::LabelPair;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolLevel {
    Elementary,
    Middle,
    High,
}

impl SchoolLevel {
    const ALL: [SchoolLevel; 3] = [SchoolLevel::Elementary, SchoolLevel::Middle, SchoolLevel::High];

    pub fn code(self) -> &'static str {
        match self {
            SchoolLevel::Elementary => "ELEMENTARY",
            SchoolLevel::Middle => "MIDDLE",
            SchoolLevel::High => "HIGH",
        }
    }

    pub fn korean_name(self) -> &'static str {
        match self {
            SchoolLevel::Elementary => "초등학교",
            SchoolLevel::Middle => "중학교",
            SchoolLevel::High => "고등학교",
        }
    }

    fn matches(self, label: &LabelPair) -> bool {
        label.has_code(self.code()) || label.name.as_deref() == Some(self.korean_name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Subject {
    pub subject_id: i64,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub subject_thumbnail: Option<String>,
    #[serde(default)]
    pub curriculum: Option<LabelPair>,
    #[serde(default)]
    pub school_level: Option<LabelPair>,
    #[serde(default)]
    pub grade: Option<LabelPair>,
    #[serde(default)]
    pub term: Option<LabelPair>,
    #[serde(default)]
    pub area: Option<LabelPair>,
}

impl Subject {
    /// School level, grade and term names, e.g. `"고등학교 2학년 1학기"`.
    pub fn full_grade_name(&self) -> String {
        [&self.school_level, &self.grade, &self.term]
            .into_iter()
            .flatten()
            .filter_map(|label| label.name.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    pub fn school_level_kind(&self) -> Option<SchoolLevel> {
        let label = self.school_level.as_ref()?;

        SchoolLevel::ALL.into_iter().find(|level| level.matches(label))
    }
}
