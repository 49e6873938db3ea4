use assessa_core::error::CoreError;
use assessa_core::models::settings::Settings;
use serde_json::json;

#[test]
fn defaults_match_first_run_values() {
    let settings = Settings::default();
    assert!(settings.audio.background_music);
    assert_eq!(settings.audio.music_volume, 0.5);
    assert_eq!(settings.audio.effects_volume, 0.3);
    assert_eq!(settings.audio.selected_track, "ambient1");
    assert_eq!(settings.ui.theme, "light");
    assert_eq!(settings.ui.font_size, "medium");
    assert!(!settings.accessibility.high_contrast);
}

#[test]
fn set_leaf_leaves_siblings_alone() {
    let mut settings = Settings::default();
    settings.set("audio.backgroundMusic", json!(false)).unwrap();

    assert!(!settings.audio.background_music);
    assert_eq!(settings.audio.music_volume, 0.5);
    assert!(settings.audio.sound_effects);
    assert_eq!(settings.ui, Settings::default().ui);
}

#[test]
fn set_numeric_and_string_leaves() {
    let mut settings = Settings::default();
    settings.set("audio.musicVolume", json!(0.8)).unwrap();
    settings.set("ui.theme", json!("dark")).unwrap();

    assert_eq!(settings.audio.music_volume, 0.8);
    assert_eq!(settings.ui.theme, "dark");
    assert_eq!(settings.get("ui.theme").unwrap(), Some(json!("dark")));
}

#[test]
fn setting_a_group_merges_into_stored_values() {
    let mut settings = Settings::default();
    settings.set("audio.backgroundMusic", json!(false)).unwrap();
    settings.set("audio.selectedTrack", json!("rain")).unwrap();
    settings.set("audio", json!({ "musicVolume": 0.9 })).unwrap();

    assert!(!settings.audio.background_music);
    assert_eq!(settings.audio.selected_track, "rain");
    assert_eq!(settings.audio.music_volume, 0.9);
    assert_eq!(settings.audio.effects_volume, 0.3);

    settings
        .set("audio", json!({ "fadeIn": { "seconds": 2 } }))
        .unwrap();
    settings
        .set("audio.fadeIn", json!({ "curve": "linear" }))
        .unwrap();
    assert_eq!(
        settings.get("audio.fadeIn").unwrap(),
        Some(json!({ "seconds": 2, "curve": "linear" }))
    );
    assert!(!settings.audio.background_music);
}

#[test]
fn wrongly_typed_value_is_rejected_and_nothing_changes() {
    let mut settings = Settings::default();
    let err = settings.set("audio.musicVolume", json!("loud")).unwrap_err();

    assert!(matches!(err, CoreError::InvalidSettingValue { ref path, .. } if path == "audio.musicVolume"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn unknown_keys_are_created_and_preserved() {
    let mut settings = Settings::default();
    settings.set("audio.spatialSound", json!(true)).unwrap();
    settings.set("labs.newCharts.enabled", json!(true)).unwrap();

    assert_eq!(settings.audio.extra.get("spatialSound"), Some(&json!(true)));
    assert_eq!(settings.get("labs.newCharts.enabled").unwrap(), Some(json!(true)));

    let round_tripped: Settings =
        serde_json::from_value(serde_json::to_value(&settings).unwrap()).unwrap();
    assert_eq!(round_tripped, settings);
}

#[test]
fn path_through_a_leaf_is_invalid() {
    let mut settings = Settings::default();
    let err = settings
        .set("audio.musicVolume.left", json!(0.1))
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidSettingPath(_)));
}

#[test]
fn empty_segments_are_invalid() {
    let mut settings = Settings::default();
    for path in ["", "audio.", ".theme", "ui..theme"] {
        assert!(
            matches!(settings.set(path, json!(1)), Err(CoreError::InvalidSettingPath(_))),
            "{path:?}"
        );
    }
}

#[test]
fn get_missing_path_is_none() {
    let settings = Settings::default();
    assert_eq!(settings.get("audio.nothingHere").unwrap(), None);
    assert_eq!(settings.get("ui.theme.deeper").unwrap(), None);
}

#[test]
fn partial_settings_fill_from_defaults() {
    let settings: Settings = serde_json::from_value(json!({
        "ui": { "theme": "dark" }
    }))
    .unwrap();
    assert_eq!(settings.ui.theme, "dark");
    assert_eq!(settings.ui.font_size, "medium");
    assert!(settings.audio.background_music);
}
