//! Repository port traits for database access.

use async_trait::async_trait;
use promo_domain::{Promotion, PromotionId};

use super::error::RepoError;

// =============================================================================
// Promotion Storage
// =============================================================================

/// Typed access to stored promotions.
///
/// `save` inserts when the record has no id (or an id storage does not
/// know) and overwrites the matching row otherwise. Callers that need a
/// strict create or update pick the id accordingly before calling it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromotionRepo: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Promotion>, RepoError>;
    async fn find_by_id(&self, id: PromotionId) -> Result<Option<Promotion>, RepoError>;
    async fn save(&self, promotion: &Promotion) -> Result<Promotion, RepoError>;
    /// Removing an id that does not exist is not an error.
    async fn delete_by_id(&self, id: PromotionId) -> Result<(), RepoError>;
}
