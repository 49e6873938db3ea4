use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A named respondent context under which assessments are taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub is_anonymous: bool,
    #[serde(default)]
    pub demographics: Demographics,
    pub created: jiff::Timestamp,
    pub last_used: jiff::Timestamp,
}

/// Optional background details. Always empty for anonymous profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Demographics {
    #[serde(default)]
    pub birth_date: Option<jiff::civil::Date>,
    #[serde(default)]
    pub pronouns: Option<String>,
    /// Centimetres.
    #[serde(default)]
    pub height: Option<u32>,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
}

impl Demographics {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Caller-supplied fields for a new profile. Identity and timestamps are
/// assigned by the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProfile {
    pub name: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub demographics: Demographics,
}

/// A partial edit of an existing profile. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_anonymous: Option<bool>,
    #[serde(default)]
    pub demographics: Option<Demographics>,
}
