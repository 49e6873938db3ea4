//! assessa-core
//!
//! Pure domain types for the assessment document: profiles, scored test
//! results, settings, and file naming conventions. No I/O lives here; this is
//! the shared vocabulary of the Assessa system.

pub mod error;
pub mod files;
pub mod models;
