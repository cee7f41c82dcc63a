//! Promotions Engine library.
//!
//! Server-side code for the promotions CRUD service.
//!
//! ## Structure
//!
//! - `infrastructure/` - Repository ports, SQLite adapter, configuration
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;

pub use app::App;
