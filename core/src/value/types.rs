//! value/types.rs
//! The value union and homogeneous lists.

use crate::tags::{Tag, WireType};
use crate::types::{DynaryError, Result};
use crate::value::{Compound, Pair};

/// A decoded or to-be-encoded value. The active variant always matches `tag()`.
///
/// Only kinds with a payload codec are representable; reserved tags and control
/// markers have no variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(u8),
    Char(char),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    SByte(i8),
    String(String),
    UShort(u16),
    ULong(u64),
    UInt(u32),
    Pair(Box<Pair>),
    Compound(Compound),
    List(List),
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_)     => Tag::Byte,
            Value::Char(_)     => Tag::Char,
            Value::Short(_)    => Tag::Short,
            Value::Integer(_)  => Tag::Integer,
            Value::Long(_)     => Tag::Long,
            Value::Float(_)    => Tag::Float,
            Value::Double(_)   => Tag::Double,
            Value::Bool(_)     => Tag::Bool,
            Value::SByte(_)    => Tag::SByte,
            Value::String(_)   => Tag::String,
            Value::UShort(_)   => Tag::UShort,
            Value::ULong(_)    => Tag::ULong,
            Value::UInt(_)     => Tag::UInt,
            Value::Pair(_)     => Tag::Pair,
            Value::Compound(_) => Tag::Compound,
            Value::List(_)     => Tag::List,
        }
    }

    /// Convert into a concrete wire type.
    pub fn into_wire<T: WireType>(self) -> Result<T> {
        T::from_value(self)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Widened integer view for any integral kind.
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Value::Byte(v)    => Some(v as i128),
            Value::Short(v)   => Some(v as i128),
            Value::Integer(v) => Some(v as i128),
            Value::Long(v)    => Some(v as i128),
            Value::SByte(v)   => Some(v as i128),
            Value::UShort(v)  => Some(v as i128),
            Value::ULong(v)   => Some(v as i128),
            Value::UInt(v)    => Some(v as i128),
            _ => None,
        }
    }
}

impl From<List> for Value {
    fn from(list: List) -> Value {
        Value::List(list)
    }
}

/// Homogeneous ordered sequence written under one element tag.
///
/// The wire carries 1..=255 elements; an empty or oversized list is only
/// rejected (or skipped) when it is written.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: Tag,
    items: Vec<Value>,
}

impl List {
    /// Build a list, checking that every item matches `element`.
    pub fn new(element: Tag, items: Vec<Value>) -> Result<Self> {
        element.ensure_encodable()?;
        if let Some((index, found)) = items
            .iter()
            .enumerate()
            .find(|(_, v)| v.tag() != element)
            .map(|(i, v)| (i, v.tag()))
        {
            return Err(DynaryError::MixedListElement { index, expected: element, found });
        }
        Ok(Self { element, items })
    }

    /// Homogeneous by construction.
    pub fn from_items<T, I>(items: I) -> Self
    where
        T: WireType,
        I: IntoIterator<Item = T>,
    {
        Self {
            element: T::TAG,
            items: items.into_iter().map(WireType::into_value).collect(),
        }
    }

    /// Reader-side constructor: items were decoded under `element`.
    pub(crate) fn from_decoded(element: Tag, items: Vec<Value>) -> Self {
        Self { element, items }
    }

    pub fn element(&self) -> Tag {
        self.element
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// Unwrap every element as `T`; the element tag must be `T::TAG`.
    pub fn into_typed<T: WireType>(self) -> Result<Vec<T>> {
        if self.element != T::TAG {
            return Err(DynaryError::UnexpectedTag {
                expected: T::TAG,
                found: self.element.to_u8(),
            });
        }
        self.items.into_iter().map(T::from_value).collect()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
