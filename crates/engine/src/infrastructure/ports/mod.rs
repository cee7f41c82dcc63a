//! Port traits for infrastructure boundaries.
//!
//! Storage is the only abstraction in the engine. The HTTP layer depends on
//! these traits, never on a concrete database adapter.

mod error;
mod repos;

pub use error::RepoError;
pub use repos::*;
