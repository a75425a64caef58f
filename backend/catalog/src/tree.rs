//! # Chapter Tree
//!
//! Folds flat [`ChapterRow`]s into the nested large -> medium -> small -> topic
//! tree served to the frontend.
//!
//! ## Rules
//! - Nodes are deduplicated by code per level, first seen wins.
//! - Children keep first-seen order under their parent.
//! - A row without a large code is skipped.
//! - A row stops contributing at its first missing level.
//! - Topics are leaves and are never deduplicated.
//!
//! ## Level maps
//! Medium and small codes are looked up across the whole subject, not only
//! under the current parent. A code reused under two different parents
//! therefore resolves to the node created first.
use std::collections::{HashMap, hash_map::Entry};

use serde::Serialize;

use crate::hierarchy::{ChapterRow, CodePair, code_of};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TopicNode {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SmallNode {
    pub id: i64,
    pub name: Option<String>,
    pub topics: Vec<TopicNode>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MediumNode {
    pub id: i64,
    pub name: Option<String>,
    pub children: Vec<SmallNode>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LargeNode {
    pub id: i64,
    pub name: Option<String>,
    pub children: Vec<MediumNode>,
}

fn present(pair: &Option<CodePair>) -> Option<(i64, Option<String>)> {
    let pair = pair.as_ref()?;
    Some((pair.code?, pair.name.clone()))
}

/// Position of a medium node: (large index, medium index).
type MediumSlot = (usize, usize);

/// Position of a small node: (large index, medium index, small index).
type SmallSlot = (usize, usize, usize);

pub fn build_tree<'a, I>(rows: I) -> Vec<LargeNode>
where
    I: IntoIterator<Item = &'a ChapterRow>,
{
    let mut tree: Vec<LargeNode> = Vec::new();

    let mut large_slots: HashMap<i64, usize> = HashMap::new();
    let mut medium_slots: HashMap<i64, MediumSlot> = HashMap::new();
    let mut small_slots: HashMap<i64, SmallSlot> = HashMap::new();

    for row in rows {
        let Some((large_id, large_name)) = present(&row.large) else {
            continue;
        };

        let large_index = match large_slots.entry(large_id) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                tree.push(LargeNode {
                    id: large_id,
                    name: large_name,
                    children: Vec::new(),
                });

                *entry.insert(tree.len() - 1)
            }
        };

        let Some((medium_id, medium_name)) = present(&row.medium) else {
            continue;
        };

        let medium_slot = match medium_slots.entry(medium_id) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let children = &mut tree[large_index].children;
                children.push(MediumNode {
                    id: medium_id,
                    name: medium_name,
                    children: Vec::new(),
                });

                *entry.insert((large_index, children.len() - 1))
            }
        };

        let Some((small_id, small_name)) = present(&row.small) else {
            continue;
        };

        let (l, m, s) = match small_slots.entry(small_id) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let (l, m) = medium_slot;
                let children = &mut tree[l].children[m].children;
                children.push(SmallNode {
                    id: small_id,
                    name: small_name,
                    topics: Vec::new(),
                });

                *entry.insert((l, m, children.len() - 1))
            }
        };

        if let Some(topic_id) = code_of(&row.topic) {
            tree[l].children[m].children[s].topics.push(TopicNode {
                id: topic_id,
                name: row.topic.as_ref().and_then(|t| t.name.clone()),
            });
        }
    }

    tree
}
