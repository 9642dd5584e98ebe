use std::fmt;

use crate::value::{ParentRef, Token, Value};

/// Identity of a compound, target of child `ParentRef`s.
///
/// The reader numbers compounds from 1 per reader; compounds built in memory
/// default to `CompoundId::DETACHED`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompoundId(pub u64);

impl CompoundId {
    pub const DETACHED: CompoundId = CompoundId(0);
}

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered, nestable sequence of tokens, closed by End-Of-Compound on the wire.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    id: CompoundId,
    tokens: Vec<Token>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: CompoundId) -> Self {
        Self { id, tokens: Vec::new() }
    }

    pub fn from_values<V, I>(values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let mut compound = Self::new();
        for v in values {
            compound.push(v);
        }
        compound
    }

    /// Append a value; its sequence id is its index and its parent is this compound.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.push_token(Token::new(value))
    }

    /// Append an existing token, re-pointing its sequence id and parent.
    pub fn push_token(&mut self, mut token: Token) -> &mut Self {
        let index = self.tokens.len();
        token.attach(index as u64, ParentRef { compound: self.id, index });
        self.tokens.push(token);
        self
    }

    pub fn id(&self) -> CompoundId {
        self.id
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Compound nesting depth: 1 for a flat compound.
    pub fn depth(&self) -> usize {
        1 + self
            .tokens
            .iter()
            .filter_map(|t| t.value().as_compound())
            .map(Compound::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Compounds compare by their token sequence; ids are diagnostics.
impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
