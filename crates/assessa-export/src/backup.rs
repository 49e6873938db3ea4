use std::collections::HashSet;

use serde_json::{Map, Value};

use assessa_core::files;
use assessa_core::models::document::Document;

use crate::error::ExportError;

/// A ready-to-save backup: the serialized document and a dated file name.
#[derive(Debug, Clone)]
pub struct Backup {
    pub file_name: String,
    pub exported_at: jiff::Timestamp,
    pub contents: String,
}

/// Serialize the whole document for backup.
///
/// Output is stable: struct fields keep declaration order and every map in
/// the document is key-sorted, so the same document always yields the same
/// bytes.
pub fn full_export(document: &Document) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Build a backup of `document`, stamping `lastBackup` with `exported_at`.
pub fn backup(document: &Document, exported_at: jiff::Timestamp) -> Result<Backup, ExportError> {
    let mut stamped = document.clone();
    stamped.last_backup = Some(exported_at);

    let contents = full_export(&stamped)?;
    tracing::debug!(
        profiles = stamped.profiles.len(),
        results = stamped.test_results.len(),
        bytes = contents.len(),
        "backup serialized"
    );

    Ok(Backup {
        file_name: files::backup(exported_at),
        exported_at,
        contents,
    })
}

/// Parse and validate a backup payload.
///
/// The shape is checked before anything is deserialized, and the result is
/// all-or-nothing: a malformed payload is rejected outright, never merged.
pub fn restore(payload: &str) -> Result<Document, ExportError> {
    let json: Value = serde_json::from_str(payload)
        .map_err(|e| ExportError::InvalidBackupFormat(format!("not valid JSON: {e}")))?;

    let obj = json.as_object().ok_or_else(|| {
        ExportError::InvalidBackupFormat("top level must be a JSON object".to_string())
    })?;

    require(obj, "profiles", "an array", Value::is_array)?;
    require(obj, "testResults", "an array", Value::is_array)?;
    require(obj, "settings", "an object", Value::is_object)?;
    require(obj, "version", "a string", Value::is_string)?;

    // Same migration path as a document loaded from disk.
    let document = assessa_storage::document::parse_document(payload.as_bytes(), "backup")
        .map_err(|e| ExportError::InvalidBackupFormat(e.to_string()))?;

    let mut profile_ids = HashSet::new();
    for profile in &document.profiles {
        if !profile_ids.insert(profile.id) {
            return Err(ExportError::InvalidBackupFormat(format!(
                "duplicate profile id {}",
                profile.id
            )));
        }
    }

    let mut result_ids = HashSet::new();
    for result in &document.test_results {
        if !result_ids.insert(result.id) {
            return Err(ExportError::InvalidBackupFormat(format!(
                "duplicate test result id {}",
                result.id
            )));
        }
    }

    Ok(document)
}

fn require(
    obj: &Map<String, Value>,
    key: &str,
    expected: &str,
    check: fn(&Value) -> bool,
) -> Result<(), ExportError> {
    match obj.get(key) {
        Some(value) if check(value) => Ok(()),
        Some(_) => Err(ExportError::InvalidBackupFormat(format!(
            "'{key}' must be {expected}"
        ))),
        None => Err(ExportError::InvalidBackupFormat(format!(
            "missing '{key}'"
        ))),
    }
}
