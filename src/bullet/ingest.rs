use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use super::bullet::{json_type, Bullet, BulletError};

/// Wrapper field accepted around the bullet array.
const BULLETS_FIELD: &str = "bullets";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected an array of bullets or an object with a `bullets` array, found {0}")]
    UnexpectedShape(&'static str),
    #[error("Malformed bullet at index {index}: {source}")]
    MalformedBullet {
        index: usize,
        #[source]
        source: BulletError,
    },
}

/// Parse bullets from JSON text.
///
/// Accepts either a bare array or `{"bullets": [...]}`. Fails on the first
/// malformed record.
pub fn parse_bullets(json: &str) -> Result<Vec<Bullet>, IngestError> {
    let value: Value = serde_json::from_str(json)?;
    bullets_from_value(value)
}

pub fn read_bullets<R: Read>(reader: R) -> Result<Vec<Bullet>, IngestError> {
    let value: Value = serde_json::from_reader(reader)?;
    bullets_from_value(value)
}

pub fn load_bullets(path: &Path) -> Result<Vec<Bullet>, IngestError> {
    let f = File::open(path)?;
    let bullets = read_bullets(BufReader::new(f))?;
    debug!(path = %path.display(), count = bullets.len(), "loaded bullets");
    Ok(bullets)
}

/// Lazily decode a stream of concatenated or newline-delimited JSON objects.
///
/// Each item is converted as it is read, so the stream can feed a heap
/// selection without holding every record in memory. Decoding stops after
/// the first JSON syntax error.
pub fn stream_bullets<R: Read>(reader: R) -> impl Iterator<Item = Result<Bullet, IngestError>> {
    serde_json::Deserializer::from_reader(reader)
        .into_iter::<Value>()
        .enumerate()
        .map(|(index, item)| {
            let value = item?;
            Bullet::try_from(value).map_err(|source| IngestError::MalformedBullet { index, source })
        })
}

/// Give every bullet without an `id` its content fingerprint as `id`.
///
/// Returns the number of IDs written.
pub fn assign_missing_ids(bullets: &mut [Bullet]) -> usize {
    let mut assigned = 0;
    for bullet in bullets.iter_mut() {
        if bullet.ensure_id() {
            assigned += 1;
        }
    }
    trace!(assigned, total = bullets.len(), "assigned bullet ids");
    assigned
}

fn bullets_from_value(value: Value) -> Result<Vec<Bullet>, IngestError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove(BULLETS_FIELD) {
            Some(Value::Array(items)) => items,
            Some(other) => return Err(IngestError::UnexpectedShape(json_type(&other))),
            None => return Err(IngestError::UnexpectedShape("object")),
        },
        other => return Err(IngestError::UnexpectedShape(json_type(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Bullet::try_from(item).map_err(|source| IngestError::MalformedBullet { index, source })
        })
        .collect()
}
