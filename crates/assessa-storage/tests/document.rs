use assessa_core::models::document::{CURRENT_VERSION, Document};
use assessa_storage::error::StorageError;
use assessa_storage::{DocumentStore, FileStore, MemoryStore, load_document, load_or_default, save_document};

#[test]
fn empty_store_is_seeded_and_persisted() {
    let mut store = MemoryStore::new();
    let document = load_document(&mut store).unwrap();

    assert!(document.profiles.is_empty());
    assert!(document.test_results.is_empty());
    assert_eq!(document.version, CURRENT_VERSION);
    assert_eq!(document.settings.audio.music_volume, 0.5);
    assert_eq!(store.write_count(), 1);

    // A second load reads the seeded copy instead of seeding again.
    let again = load_document(&mut store).unwrap();
    assert_eq!(again, document);
    assert_eq!(store.write_count(), 1);
}

#[test]
fn save_then_load_round_trips() {
    let mut store = MemoryStore::new();
    let mut document = Document::default();
    document.settings.ui.theme = "dark".to_string();

    save_document(&mut store, &document).unwrap();
    let loaded = load_document(&mut store).unwrap();
    assert_eq!(loaded, document);
}

#[test]
fn repeated_saves_do_not_drift_volumes() {
    // Values whose shortest decimal form needs all 17 digits.
    let volumes = [0.9941414234726625, 0.1 + 0.2, 1.0 / 3.0, 0.7071067811865476];
    let mut store = MemoryStore::new();

    for volume in volumes {
        let mut document = Document::default();
        document.settings.audio.music_volume = volume;
        save_document(&mut store, &document).unwrap();

        for _ in 0..3 {
            let loaded = load_document(&mut store).unwrap();
            assert_eq!(loaded.settings.audio.music_volume.to_bits(), volume.to_bits());
            save_document(&mut store, &loaded).unwrap();
        }
    }
}

#[test]
fn corrupt_document_is_an_error_not_a_partial_parse() {
    let mut store = MemoryStore::with_contents(r#"{"profiles": [], "testResults": "#);
    let err = load_document(&mut store).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
    // Nothing was overwritten.
    assert_eq!(store.write_count(), 0);
}

#[test]
fn non_object_document_is_corrupt() {
    let mut store = MemoryStore::with_contents("[1, 2, 3]");
    assert!(matches!(
        load_document(&mut store).unwrap_err(),
        StorageError::Corrupt { .. }
    ));
}

#[test]
fn newer_version_is_rejected() {
    let body = serde_json::json!({
        "profiles": [],
        "testResults": [],
        "settings": {},
        "version": "9.0.0"
    });
    let mut store = MemoryStore::with_contents(body.to_string());
    match load_document(&mut store).unwrap_err() {
        StorageError::UnsupportedVersion { found, supported } => {
            assert_eq!(found, "9.0.0");
            assert_eq!(supported, CURRENT_VERSION);
        }
        other => panic!("expected UnsupportedVersion, got {other:?}"),
    }
}

#[test]
fn pre_versioned_document_is_stamped_and_settings_filled() {
    let body = serde_json::json!({
        "profiles": [],
        "testResults": [],
        "settings": { "audio": { "musicVolume": 0.9 } }
    });
    let mut store = MemoryStore::with_contents(body.to_string());
    let document = load_document(&mut store).unwrap();

    assert_eq!(document.version, CURRENT_VERSION);
    assert_eq!(document.settings.audio.music_volume, 0.9);
    assert!(document.settings.audio.background_music);
    assert_eq!(document.settings.ui.language, "pt");
}

#[test]
fn unknown_settings_keys_survive_a_save() {
    let body = serde_json::json!({
        "profiles": [],
        "testResults": [],
        "settings": {
            "audio": { "spatial": true },
            "experimental": { "flag": 1 }
        },
        "version": "1.0.0"
    });
    let mut store = MemoryStore::with_contents(body.to_string());
    let document = load_document(&mut store).unwrap();
    save_document(&mut store, &document).unwrap();

    let saved: serde_json::Value = serde_json::from_slice(store.contents().unwrap()).unwrap();
    assert_eq!(saved["settings"]["audio"]["spatial"], true);
    assert_eq!(saved["settings"]["experimental"]["flag"], 1);
}

#[test]
fn load_or_default_recovers_from_corruption() {
    let store = MemoryStore::with_contents("not json");
    let document = load_or_default(&store);
    assert_eq!(document, Document::default());
}

#[test]
fn file_store_seeds_writes_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("assessa.json");
    let mut store = FileStore::new(&path);

    assert!(store.read().unwrap().is_none());
    let mut document = load_document(&mut store).unwrap();
    assert!(path.exists());

    document.settings.accessibility.large_text = true;
    save_document(&mut store, &document).unwrap();

    let mut reopened = FileStore::new(&path);
    let loaded = load_document(&mut reopened).unwrap();
    assert_eq!(loaded, document);
    assert!(!path.with_extension("json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn file_store_writes_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assessa.json");
    let mut store = FileStore::new(&path);
    load_document(&mut store).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn boxed_store_is_usable() {
    let mut store: Box<dyn DocumentStore> = Box::new(MemoryStore::new());
    let document = load_document(&mut store).unwrap();
    assert_eq!(document.version, CURRENT_VERSION);
    assert_eq!(store.location(), "memory");
}
