use serde_json::Value;

use assessa_core::models::document::{CURRENT_VERSION, Document};

use crate::backend::DocumentStore;
use crate::error::StorageError;

/// Load the document, seeding and persisting a default one if the store is
/// empty.
///
/// Read and parse faults are logged and returned; a partially parsed
/// document is never handed back.
pub fn load_document<S: DocumentStore + ?Sized>(store: &mut S) -> Result<Document, StorageError> {
    let body = match store.read() {
        Ok(Some(body)) => body,
        Ok(None) => {
            let document = Document::default();
            save_document(store, &document)?;
            tracing::info!(location = %store.location(), "seeded new document");
            return Ok(document);
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to read document");
            return Err(e);
        }
    };

    parse_document(&body, &store.location()).inspect_err(|e| {
        tracing::error!(error = %e, location = %store.location(), "failed to load document");
    })
}

/// Load the document for read-only use, falling back to an unpersisted
/// default when the store is empty or unreadable.
pub fn load_or_default<S: DocumentStore + ?Sized>(store: &S) -> Document {
    let loaded = store
        .read()
        .and_then(|body| body.map(|b| parse_document(&b, &store.location())).transpose());

    match loaded {
        Ok(Some(document)) => document,
        Ok(None) => Document::default(),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to default document");
            Document::default()
        }
    }
}

/// Serialize and write the whole document, stamped with the current version.
pub fn save_document<S: DocumentStore + ?Sized>(
    store: &mut S,
    document: &Document,
) -> Result<(), StorageError> {
    let body = if document.version == CURRENT_VERSION {
        serde_json::to_vec_pretty(document)?
    } else {
        let mut stamped = document.clone();
        stamped.version = CURRENT_VERSION.to_string();
        serde_json::to_vec_pretty(&stamped)?
    };

    store.write(&body).inspect_err(|e| {
        tracing::error!(error = %e, "failed to save document");
    })?;

    tracing::debug!(
        location = %store.location(),
        profiles = document.profiles.len(),
        results = document.test_results.len(),
        "document saved"
    );
    Ok(())
}

/// Parse raw bytes into a document, running migrations first.
pub fn parse_document(body: &[u8], location: &str) -> Result<Document, StorageError> {
    let json: Value = serde_json::from_slice(body).map_err(|e| StorageError::Corrupt {
        location: location.to_string(),
        reason: e.to_string(),
    })?;

    let migrated = migrate(json, location)?;
    serde_json::from_value(migrated).map_err(|e| StorageError::Corrupt {
        location: location.to_string(),
        reason: e.to_string(),
    })
}

/// Bring a raw document up to [`CURRENT_VERSION`].
///
/// Each step is a pure transform on the JSON value, keyed on the version the
/// document was written with.
fn migrate(mut json: Value, location: &str) -> Result<Value, StorageError> {
    let obj = json.as_object_mut().ok_or_else(|| StorageError::Corrupt {
        location: location.to_string(),
        reason: "document is not a JSON object".to_string(),
    })?;

    let on_disk = obj.get("version").and_then(|v| v.as_str()).map(str::to_string);

    match on_disk {
        None => {
            // Pre-versioned documents share the 1.0.0 shape.
            obj.insert(
                "version".to_string(),
                Value::String(CURRENT_VERSION.to_string()),
            );
            tracing::info!(location, "stamped pre-versioned document as {CURRENT_VERSION}");
        }
        Some(found) => {
            let newer = match (parse_version(&found), parse_version(CURRENT_VERSION)) {
                (Some(found), Some(current)) => found > current,
                _ => true,
            };
            if newer {
                return Err(StorageError::UnsupportedVersion {
                    found,
                    supported: CURRENT_VERSION.to_string(),
                });
            }
        }
    }

    // Future migrations go here, e.g. `if version < [1, 1, 0] { ... }`.

    Ok(json)
}

fn parse_version(version: &str) -> Option<Vec<u64>> {
    version.split('.').map(|part| part.parse().ok()).collect()
}
