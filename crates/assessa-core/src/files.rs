//! File naming conventions.
//!
//! Pure string functions. These define the canonical names of the persisted
//! document and of the files handed to the user on export.

use jiff::Timestamp;

/// Name of the single persisted document inside the data directory.
pub const DOCUMENT: &str = "assessa.json";

/// Backup file name. The export date is embedded so successive backups don't
/// collide.
pub fn backup(exported_at: Timestamp) -> String {
    format!("assessa-backup-{}.json", exported_at.strftime("%Y-%m-%d"))
}

/// Report file name for a given extension (e.g. `"pdf"`, `"txt"`).
pub fn report(generated_at: Timestamp, extension: &str) -> String {
    format!(
        "assessa-report-{}.{extension}",
        generated_at.strftime("%Y-%m-%d")
    )
}
