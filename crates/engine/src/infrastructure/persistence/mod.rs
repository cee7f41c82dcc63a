//! SQLite persistence adapters
//!
//! Implements the repository ports on top of a `sqlx` SQLite pool.

mod promotion_repository;

pub use promotion_repository::SqlitePromotionRepo;
