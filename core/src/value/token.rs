use std::fmt;

use crate::tags::Tag;
use crate::value::{CompoundId, Value};

/// Non-owning back-reference from a token to its enclosing compound.
/// Diagnostic only: encoding and decoding never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentRef {
    pub compound: CompoundId,
    pub index: usize,
}

/// Unit of the value model: a kind, its value, a sequence id and an optional parent.
///
/// `kind` is always derived from `value`.
#[derive(Debug, Clone)]
pub struct Token {
    kind: Tag,
    value: Value,
    sequence_id: u64,
    parent: Option<ParentRef>,
}

impl Token {
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_sequence(value, 0)
    }

    pub fn with_sequence(value: impl Into<Value>, sequence_id: u64) -> Self {
        let value = value.into();
        Self {
            kind: value.tag(),
            value,
            sequence_id,
            parent: None,
        }
    }

    pub fn kind(&self) -> Tag {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn sequence_id(&self) -> u64 {
        self.sequence_id
    }

    pub fn parent(&self) -> Option<ParentRef> {
        self.parent
    }

    pub(crate) fn attach(&mut self, sequence_id: u64, parent: ParentRef) {
        self.sequence_id = sequence_id;
        self.parent = Some(parent);
    }

    /// `"{sequence_id}->{kind}"`, used in diagnostics.
    pub fn to_path(&self) -> String {
        format!("{}->{}", self.sequence_id, self.kind)
    }
}

/// Tokens compare by kind and value; sequence ids and parents are diagnostics.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
