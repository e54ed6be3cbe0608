//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by domain.

pub mod catalog;
pub mod health;
pub mod metrics;
pub mod purchases;

// Re-export common handler utilities
pub use catalog::get_catalog;
pub use health::{health_check, readiness};
pub use metrics::render_metrics;
pub use purchases::list_purchases;
