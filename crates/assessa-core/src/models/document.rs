use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::profile::Profile;
use super::result::TestResult;
use super::settings::Settings;

/// Schema version written by this build.
pub const CURRENT_VERSION: &str = "1.0.0";

/// The single persisted root object: every profile, every result, and the
/// user's settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Document {
    pub profiles: Vec<Profile>,
    pub test_results: Vec<TestResult>,
    pub settings: Settings,
    pub version: String,
    /// When the last full backup was exported.
    #[serde(default)]
    pub last_backup: Option<jiff::Timestamp>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            test_results: Vec::new(),
            settings: Settings::default(),
            version: CURRENT_VERSION.to_string(),
            last_backup: None,
        }
    }
}

impl Document {
    pub fn profile(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn profile_mut(&mut self, id: Uuid) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.id == id)
    }
}
