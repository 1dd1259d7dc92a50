use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bullet::{Bullet, BulletError};
use crate::selection::strategy::StrategyKind;
use crate::types::identifiers::GroupKey;

/// Metadata describing the outcome of one selection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionMetadata {
    pub strategy: StrategyKind,
    pub top_k: usize,
    pub min_score: f64,

    pub bullets_considered: usize,
    pub bullets_below_threshold: usize,
    pub bullets_selected: usize,
    pub groups_selected: usize,
}

/// Selected bullets per company, plus how they were chosen.
///
/// Companies with no bullet at or above the threshold are absent from
/// `groups`. Each group is sorted by score, highest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub groups: BTreeMap<GroupKey, Vec<Bullet>>,
    pub selection: SelectionMetadata,
}

impl SelectionResult {
    pub fn group(&self, company: &str) -> Option<&[Bullet]> {
        self.groups.get(&GroupKey::new(company)).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> BTreeMap<GroupKey, Vec<Bullet>> {
        self.groups
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Invalid top_k: {0} (must be a positive integer)")]
    InvalidTopK(i64),

    #[error("Invalid min_score: {0}")]
    InvalidMinScore(f64),

    #[error("Malformed bullet at index {index}: {source}")]
    MalformedBullet {
        index: usize,
        #[source]
        source: BulletError,
    },
}
