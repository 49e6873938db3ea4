use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A scored, immutable record of one completed questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TestResult {
    pub id: Uuid,
    pub profile_id: Uuid,
    /// Catalog identifier of the instrument (e.g. `"PHQ-9"`).
    pub test_type: String,
    pub date: jiff::Timestamp,
    pub scores: Scores,
    /// Selected option value keyed by zero-based question index.
    pub raw_answers: BTreeMap<usize, u32>,
    #[serde(default)]
    pub context_note: String,

    // Reserved for future analysis metadata. Always written as null today.
    #[serde(default)]
    pub ai_analysis: Option<serde_json::Value>,
    /// Seconds taken to complete the questionnaire.
    #[serde(default)]
    pub completion_time: Option<u64>,
}

/// Outcome of scoring a set of answers against an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Scores {
    pub total: u32,
    pub severity: String,
    /// Display colour of the severity band, as a CSS hex string.
    pub color: String,
}
