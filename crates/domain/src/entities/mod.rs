//! Domain entities - Core business objects with identity

mod promotion;

pub use promotion::Promotion;
