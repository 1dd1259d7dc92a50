use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::selection::min_heap::Scored;
use crate::types::identifiers::{BulletId, GroupKey};

/// Field holding the numeric relevance score.
pub const SCORE_FIELD: &str = "relevance_score";
/// Field holding the group key.
pub const COMPANY_FIELD: &str = "company";
/// Field holding the bullet identifier, when present.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Error, PartialEq)]
pub enum BulletError {
    #[error("Bullet must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("Bullet is missing required field `relevance_score`")]
    MissingScore,
    #[error("`relevance_score` must be a number, found {0}")]
    NonNumericScore(&'static str),
    #[error("`relevance_score` must be finite, found {0}")]
    NonFiniteScore(f64),
    #[error("`company` must be a string or null, found {0}")]
    InvalidGroupKey(&'static str),
}

/// A scored bullet.
///
/// The full JSON object is kept as-is; `relevance_score` and `company` are
/// read once at construction. Serializing a bullet writes back the
/// original object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Bullet {
    company: GroupKey,
    relevance_score: f64,
    fields: Map<String, Value>,
}

impl Bullet {
    /// Build a bullet from parts. `company = None` groups it under "Unknown"
    /// while leaving the `company` field null in the payload.
    pub fn new(
        company: Option<&str>,
        relevance_score: f64,
        extra: Map<String, Value>,
    ) -> Result<Self, BulletError> {
        let score =
            Number::from_f64(relevance_score).ok_or(BulletError::NonFiniteScore(relevance_score))?;

        let mut fields = Map::with_capacity(extra.len() + 2);
        fields.insert(
            COMPANY_FIELD.to_string(),
            company.map_or(Value::Null, |c| Value::String(c.to_string())),
        );
        fields.insert(SCORE_FIELD.to_string(), Value::Number(score));
        for (k, v) in extra {
            if k != COMPANY_FIELD && k != SCORE_FIELD {
                fields.insert(k, v);
            }
        }

        Bullet::from_fields(fields)
    }

    /// Validate a JSON object and extract the fields selection reads.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, BulletError> {
        let relevance_score = extract_score(fields.get(SCORE_FIELD))?;
        let company = extract_company(fields.get(COMPANY_FIELD))?;

        Ok(Bullet {
            company,
            relevance_score,
            fields,
        })
    }

    pub fn company(&self) -> &GroupKey {
        &self.company
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
    }

    pub fn id(&self) -> Option<&Value> {
        self.fields.get(ID_FIELD)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Content hash of the full payload.
    pub fn fingerprint(&self) -> BulletId {
        BulletId::from_fields(&self.fields)
    }

    /// Set `id` to the content fingerprint if the bullet has none.
    /// Returns true when an ID was written.
    pub fn ensure_id(&mut self) -> bool {
        if self.fields.contains_key(ID_FIELD) {
            return false;
        }
        let id = self.fingerprint();
        self.fields
            .insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
        true
    }
}

fn extract_score(value: Option<&Value>) -> Result<f64, BulletError> {
    match value {
        None | Some(Value::Null) => Err(BulletError::MissingScore),
        Some(Value::Number(n)) => {
            // as_f64 only fails for arbitrary-precision numbers, which are not enabled.
            let score = n.as_f64().ok_or(BulletError::NonNumericScore("number"))?;
            if score.is_finite() {
                Ok(score)
            } else {
                Err(BulletError::NonFiniteScore(score))
            }
        }
        Some(other) => Err(BulletError::NonNumericScore(json_type(other))),
    }
}

fn extract_company(value: Option<&Value>) -> Result<GroupKey, BulletError> {
    match value {
        None | Some(Value::Null) => Ok(GroupKey::unknown()),
        Some(Value::String(s)) => Ok(GroupKey::new(s.as_str())),
        Some(other) => Err(BulletError::InvalidGroupKey(json_type(other))),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<Map<String, Value>> for Bullet {
    type Error = BulletError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Bullet::from_fields(fields)
    }
}

impl TryFrom<Value> for Bullet {
    type Error = BulletError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Bullet::from_fields(fields),
            other => Err(BulletError::NotAnObject(json_type(&other))),
        }
    }
}

impl From<Bullet> for Value {
    fn from(bullet: Bullet) -> Self {
        Value::Object(bullet.fields)
    }
}

impl Serialize for Bullet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl Scored for Bullet {
    fn relevance_score(&self) -> f64 {
        self.relevance_score
    }
}
