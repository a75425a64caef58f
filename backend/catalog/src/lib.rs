//! # Catalog
//!
//! Read-only snapshot of the question bank: subjects, chapter rows and item
//! image documents.
//!
//! The snapshot lives in a single JSON file so the server and the ingest tool
//! agree on the same data without a database in between.
//!
//! ```json
//! {
//!   "subjects": [{ "subject_id": 1001, "subject_name": "수학" }],
//!   "chapters": [{ "id": 1, "subject_id": 1001, "large": { "code": 100101, "name": "수와 연산" } }],
//!   "items": [{ "itemId": 1, "topicChapterId": 100101010101, "difficultyCode": 3 }]
//! }
//! ```
use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub mod exam;
pub mod hierarchy;
pub mod item;
pub mod response;
pub mod subject;
pub mod tree;

use hierarchy::{ChapterRow, sort_rows};
use item::ItemImageDocument;
use subject::Subject;
use tree::{LargeNode, build_tree};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub chapters: Vec<ChapterRow>,
    #[serde(default)]
    pub items: Vec<ItemImageDocument>,
}

impl Catalog {
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn chapters(&self) -> &[ChapterRow] {
        &self.chapters
    }

    pub fn items(&self) -> &[ItemImageDocument] {
        &self.items
    }

    /// Chapter rows of one subject ordered by their four codes.
    pub fn chapters_for_subject(&self, subject_id: i64) -> Vec<ChapterRow> {
        let mut rows: Vec<ChapterRow> = self
            .chapters
            .iter()
            .filter(|row| row.subject_id == Some(subject_id))
            .cloned()
            .collect();

        sort_rows(&mut rows);
        rows
    }

    pub fn chapter_tree(&self, subject_id: i64) -> Vec<LargeNode> {
        build_tree(&self.chapters_for_subject(subject_id))
    }
}

pub fn get_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let data = fs::read(path.as_ref())?;
    let catalog: Catalog = serde_json::from_slice(&data)?;

    info!(
        subjects = catalog.subjects.len(),
        chapters = catalog.chapters.len(),
        items = catalog.items.len(),
        "Loaded catalog from {}",
        path.as_ref().display()
    );

    Ok(catalog)
}

pub fn write_catalog(path: impl AsRef<Path>, catalog: &Catalog) -> Result<(), CatalogError> {
    fs::write(path, serde_json::to_vec_pretty(catalog)?)?;

    Ok(())
}
