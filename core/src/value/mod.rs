//! value/mod.rs
//! In-memory value model: `Value`, `Token`, `Compound`, `Pair`, `List`.
//!
//! Ownership:
//! - A token owns its value; composite values own their children.
//! - Parent links are ids (`ParentRef`), never pointers, so no cycles exist.

pub mod types;
pub mod token;
pub mod compound;
pub mod pair;

pub use types::*;
pub use token::*;
pub use compound::*;
pub use pair::*;
