use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bullet::Bullet;
use crate::selection::grouping::{partition_by_company, passes_threshold, sort_by_score_desc};
use crate::selection::min_heap::MinHeap;
use crate::types::identifiers::GroupKey;

/// Keeps the `top_k` highest-scoring bullets per company.
///
/// Every implementation returns, for each company with at least one bullet
/// scoring `>= min_score`, at most `top_k` bullets sorted by score
/// descending. The order of equal scores is implementation-defined.
/// With `top_k == 0` each such company maps to an empty vector.
pub trait TopKStrategy {
    fn select_top_k<I>(
        &self,
        bullets: I,
        top_k: usize,
        min_score: f64,
    ) -> BTreeMap<GroupKey, Vec<Bullet>>
    where
        I: IntoIterator<Item = Bullet>;
}

/// Partition everything, sort each group, truncate.
///
/// Ties keep input order. Holds every qualifying bullet in memory at once,
/// which is fine for the usual handful of bullets per company.
#[derive(Debug, Default, Clone, Copy)]
pub struct SortAndTruncate;

impl TopKStrategy for SortAndTruncate {
    fn select_top_k<I>(
        &self,
        bullets: I,
        top_k: usize,
        min_score: f64,
    ) -> BTreeMap<GroupKey, Vec<Bullet>>
    where
        I: IntoIterator<Item = Bullet>,
    {
        let mut groups = partition_by_company(bullets, min_score);
        for group in groups.values_mut() {
            sort_by_score_desc(group);
            group.truncate(top_k);
        }
        groups
    }
}

/// One bounded min-heap per company; the weakest member is evicted as soon
/// as a heap holds more than `top_k` bullets.
///
/// Memory is O(top_k) per company regardless of input length, so the input
/// can be a lazily decoded stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapEviction;

impl TopKStrategy for HeapEviction {
    fn select_top_k<I>(
        &self,
        bullets: I,
        top_k: usize,
        min_score: f64,
    ) -> BTreeMap<GroupKey, Vec<Bullet>>
    where
        I: IntoIterator<Item = Bullet>,
    {
        let mut heaps: BTreeMap<GroupKey, MinHeap<Bullet>> = BTreeMap::new();

        for bullet in bullets {
            if !passes_threshold(&bullet, min_score) {
                continue;
            }
            let heap = heaps.entry(bullet.company().clone()).or_default();
            heap.insert(bullet);
            if heap.len() > top_k {
                heap.extract_min();
            }
        }

        heaps
            .into_iter()
            .map(|(company, mut heap)| {
                let mut drained = Vec::with_capacity(heap.len());
                while let Some(bullet) = heap.extract_min() {
                    drained.push(bullet);
                }
                sort_by_score_desc(&mut drained);
                (company, drained)
            })
            .collect()
    }
}

/// Runtime choice of strategy, as carried in [`SelectionConfig`](super::SelectionConfig).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Sort,
    Heap,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Sort => f.write_str("sort"),
            StrategyKind::Heap => f.write_str("heap"),
        }
    }
}

impl TopKStrategy for StrategyKind {
    fn select_top_k<I>(
        &self,
        bullets: I,
        top_k: usize,
        min_score: f64,
    ) -> BTreeMap<GroupKey, Vec<Bullet>>
    where
        I: IntoIterator<Item = Bullet>,
    {
        match self {
            StrategyKind::Sort => SortAndTruncate.select_top_k(bullets, top_k, min_score),
            StrategyKind::Heap => HeapEviction.select_top_k(bullets, top_k, min_score),
        }
    }
}
