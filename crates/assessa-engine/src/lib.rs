//! assessa-engine
//!
//! The assessment data engine: profile registry, result ledger, and the
//! query/aggregation functions behind history views and charts. The
//! registry, ledger, and query modules are pure functions over a
//! [`Document`](assessa_core::models::document::Document); [`Engine`] wraps
//! them in one load-modify-save cycle per operation.

pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod query;
pub mod registry;

pub use engine::Engine;
pub use error::EngineError;
