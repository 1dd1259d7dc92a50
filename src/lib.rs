//! Bounded top-K selection and grouping for scored resume bullets.
//!
//! `bullet-core` takes already-parsed bullet records, groups them by
//! company, drops those below a score threshold, and keeps the K
//! highest-scoring bullets of each company. Two interchangeable strategies
//! produce the same groups: a full sort-and-truncate, and a bounded
//! min-heap that keeps memory at O(K) per company and can consume a stream.
//!
//! Bullets keep every field they arrived with; selection only reads
//! `relevance_score` and `company`.

pub mod bullet;
pub mod selection;
pub mod types;

pub use bullet::{Bullet, BulletError, IngestError};
pub use selection::{
    BulletSelector, HeapEviction, MinHeap, Scored, SelectionConfig, SortAndTruncate, StrategyKind,
    TopKStrategy,
};
pub use types::{BulletId, GroupKey, SelectionError, SelectionMetadata, SelectionResult};
