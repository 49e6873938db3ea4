use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::CoreError;

/// User preferences, grouped by concern.
///
/// Every level carries an `extra` map so keys written by a newer build (or by
/// hand) survive a load/save cycle untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub accessibility: AccessibilitySettings,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct AudioSettings {
    pub background_music: bool,
    pub music_volume: f64,
    pub sound_effects: bool,
    pub effects_volume: f64,
    pub selected_track: String,
    pub transition_chimes: bool,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            background_music: true,
            music_volume: 0.5,
            sound_effects: true,
            effects_volume: 0.3,
            selected_track: "ambient1".to_string(),
            transition_chimes: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct UiSettings {
    pub theme: String,
    pub font_size: String,
    pub contrast: String,
    pub language: String,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            font_size: "medium".to_string(),
            contrast: "normal".to_string(),
            language: "pt".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_text: bool,
    pub keyboard_navigation: bool,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Read a value by dotted path, e.g. `"audio.musicVolume"`.
    ///
    /// Returns `Ok(None)` when the path is well-formed but nothing is stored
    /// there.
    pub fn get(&self, path: &str) -> Result<Option<Value>, CoreError> {
        let segments = split_path(path)?;
        let mut current = serde_json::to_value(self)?;
        for segment in segments {
            current = match current {
                Value::Object(mut map) => match map.remove(segment) {
                    Some(next) => next,
                    None => return Ok(None),
                },
                _ => return Ok(None),
            };
        }
        Ok(Some(current))
    }

    /// Set a single leaf by dotted path without disturbing its siblings.
    ///
    /// Known leaves are type-checked against the typed structure; unknown
    /// leaves (and any missing intermediate objects) are created and kept.
    /// An object written over a stored object is merged into it key by key,
    /// so `set("audio", {"musicVolume": 0.9})` leaves the other audio keys
    /// as they were.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), CoreError> {
        let segments = split_path(path)?;
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(CoreError::InvalidSettingPath(path.to_string()));
        };

        let mut root = serde_json::to_value(&*self)?;
        let mut current = &mut root;
        for segment in parents {
            current = match current {
                Value::Object(map) => map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new())),
                _ => {
                    return Err(CoreError::InvalidSettingPath(format!(
                        "{path}: '{segment}' is below a non-object value"
                    )));
                }
            };
        }

        match current {
            Value::Object(map) => match map.get_mut(*leaf) {
                Some(existing) => merge(existing, value),
                None => {
                    map.insert(leaf.to_string(), value);
                }
            },
            _ => {
                return Err(CoreError::InvalidSettingPath(format!(
                    "{path}: '{leaf}' is below a non-object value"
                )));
            }
        }

        *self = serde_json::from_value(root).map_err(|e| CoreError::InvalidSettingValue {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Deep-merge `incoming` into `target`. Non-object values replace.
fn merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(target), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, incoming) => *target = incoming,
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, CoreError> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(CoreError::InvalidSettingPath(path.to_string()));
    }
    Ok(segments)
}
