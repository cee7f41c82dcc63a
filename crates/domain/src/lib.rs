//! Promotions domain types.
//!
//! Holds the `Promotion` entity and its identifier. Nothing here touches
//! storage or HTTP; the engine crate owns both.

pub mod entities;
pub mod ids;

pub use entities::Promotion;
pub use ids::PromotionId;
