//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::PromotionRepo;

/// Main application state.
///
/// Holds the repository ports. Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
}

/// Container for all repository ports.
pub struct Repositories {
    pub promotion: Arc<dyn PromotionRepo>,
}

impl App {
    pub fn new(promotion: Arc<dyn PromotionRepo>) -> Self {
        Self {
            repositories: Repositories { promotion },
        }
    }
}
