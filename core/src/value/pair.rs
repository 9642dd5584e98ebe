use crate::tags::Tag;
use crate::types::{DynaryError, PairSide, Result};
use crate::value::Value;

/// Exactly one key and one value, each tagged independently on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    key: Value,
    value: Value,
}

impl Pair {
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Build from optional halves; a missing side is `NullValue`.
    pub fn try_new(key: Option<Value>, value: Option<Value>) -> Result<Self> {
        let key = key.ok_or(DynaryError::NullValue { side: PairSide::Key })?;
        let value = value.ok_or(DynaryError::NullValue { side: PairSide::Value })?;
        Ok(Self { key, value })
    }

    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn key_tag(&self) -> Tag {
        self.key.tag()
    }

    pub fn value_tag(&self) -> Tag {
        self.value.tag()
    }

    pub fn into_parts(self) -> (Value, Value) {
        (self.key, self.value)
    }
}
