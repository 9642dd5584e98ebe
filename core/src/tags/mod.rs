//! tags/mod.rs
//! Tag vocabulary and the type <-> tag mapping shared by both engines.

pub mod types;
pub mod mapping;

pub use types::*;
pub use mapping::*;
