//! HTTP layer of the IELTS practice backend.
//!
//! Thin axum handlers over the recommendation, streak and progress rules in
//! `ielts-engine`, backed by the PostgreSQL store from `ielts-db`.

pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod recommendation;
pub mod response;
pub mod review;
pub mod router;
pub mod state;
pub mod streak;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::ApiState;
