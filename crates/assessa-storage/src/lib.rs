//! assessa-storage
//!
//! Persistence of the single assessment document. Backends move raw bytes;
//! [`document`] layers JSON parsing, seeding, and schema migration on top.

pub mod backend;
pub mod document;
pub mod error;

pub use backend::{DocumentStore, FileStore, MemoryStore};
pub use document::{load_document, load_or_default, save_document};
