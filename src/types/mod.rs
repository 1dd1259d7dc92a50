pub mod grouped_selection;
pub mod identifiers;

pub use grouped_selection::{SelectionError, SelectionMetadata, SelectionResult};
pub use identifiers::{BulletId, GroupKey};
