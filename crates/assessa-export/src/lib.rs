//! assessa-export
//!
//! Full-document backup and restore, plus the renderer-agnostic report
//! payload handed to whatever draws the final page.

pub mod backup;
pub mod error;
pub mod render;
pub mod report;
