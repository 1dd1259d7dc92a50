pub mod config;
pub mod grouping;
pub mod min_heap;
pub mod strategy;

use serde_json::Value;
use tracing::debug;

use crate::bullet::Bullet;
use crate::selection::grouping::passes_threshold;
use crate::types::grouped_selection::{SelectionError, SelectionMetadata, SelectionResult};

pub use config::{SelectionConfig, DEFAULT_MIN_SCORE, DEFAULT_TOP_K};
pub use grouping::{partition_by_company, sort_by_score_desc};
pub use min_heap::{MinHeap, Scored};
pub use strategy::{HeapEviction, SortAndTruncate, StrategyKind, TopKStrategy};

/// Runs top-K selection with a validated [`SelectionConfig`].
///
/// Stateless across calls: each `select*` call builds its own groups and
/// heaps and drops them before returning.
#[derive(Debug, Clone, Default)]
pub struct BulletSelector {
    config: SelectionConfig,
}

impl BulletSelector {
    pub fn new(config: SelectionConfig) -> Result<Self, SelectionError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn select<I>(&self, bullets: I) -> SelectionResult
    where
        I: IntoIterator<Item = Bullet>,
    {
        let result = self.run(bullets);
        log_complete(&result.selection);
        result
    }

    fn run<I>(&self, bullets: I) -> SelectionResult
    where
        I: IntoIterator<Item = Bullet>,
    {
        let SelectionConfig {
            top_k,
            min_score,
            strategy,
        } = self.config;

        let mut bullets_considered: usize = 0;
        let mut bullets_below_threshold: usize = 0;

        let counted = bullets.into_iter().inspect(|bullet| {
            bullets_considered += 1;
            if !passes_threshold(bullet, min_score) {
                bullets_below_threshold += 1;
            }
        });

        let groups = strategy.select_top_k(counted, top_k, min_score);

        let bullets_selected: usize = groups.values().map(Vec::len).sum();

        debug_assert!(groups.values().all(|g| g.len() <= top_k));
        debug_assert!(groups
            .values()
            .flatten()
            .all(|b| passes_threshold(b, min_score)));

        let selection = SelectionMetadata {
            strategy,
            top_k,
            min_score,
            bullets_considered,
            bullets_below_threshold,
            bullets_selected,
            groups_selected: groups.len(),
        };

        SelectionResult { groups, selection }
    }

    /// Select from a fallible source, stopping at the first error.
    ///
    /// Items before the failing one have already been fed to the strategy,
    /// but no partial result is returned.
    pub fn select_fallible<I, E>(&self, items: I) -> Result<SelectionResult, E>
    where
        I: IntoIterator<Item = Result<Bullet, E>>,
    {
        let mut failure = None;

        let bullets = items.into_iter().map_while(|item| match item {
            Ok(bullet) => Some(bullet),
            Err(err) => {
                failure = Some(err);
                None
            }
        });

        let result = self.run(bullets);

        match failure {
            Some(err) => {
                debug!(
                    strategy = %self.config.strategy,
                    bullets_read = result.selection.bullets_considered,
                    "bullet selection aborted on input error"
                );
                Err(err)
            }
            None => {
                log_complete(&result.selection);
                Ok(result)
            }
        }
    }

    /// Select from raw JSON records, failing on the first malformed one.
    pub fn select_values<I>(&self, records: I) -> Result<SelectionResult, SelectionError>
    where
        I: IntoIterator<Item = Value>,
    {
        let bullets = records.into_iter().enumerate().map(|(index, value)| {
            Bullet::try_from(value)
                .map_err(|source| SelectionError::MalformedBullet { index, source })
        });

        self.select_fallible(bullets)
    }
}

fn log_complete(selection: &SelectionMetadata) {
    debug!(
        strategy = %selection.strategy,
        top_k = selection.top_k,
        min_score = selection.min_score,
        bullets_considered = selection.bullets_considered,
        bullets_selected = selection.bullets_selected,
        groups = selection.groups_selected,
        "bullet selection complete"
    );
}
