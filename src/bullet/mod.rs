pub mod bullet;
pub mod ingest;

pub use crate::types::identifiers::{BulletId, GroupKey};
pub use bullet::{Bullet, BulletError, COMPANY_FIELD, ID_FIELD, SCORE_FIELD};
pub use ingest::{
    assign_missing_ids, load_bullets, parse_bullets, read_bullets, stream_bullets, IngestError,
};
