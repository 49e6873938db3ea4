use serde::{Deserialize, Serialize};
use ts_rs::TS;

use assessa_core::models::profile::Profile;
use assessa_core::models::result::TestResult;
use assessa_instruments::Instrument;
use assessa_instruments::catalog::Catalog;

/// Shown in place of a profile name when the result outlived its profile.
pub const REMOVED_PROFILE: &str = "Removed profile";

/// Everything a renderer needs to lay out a results report. Nothing in here
/// is formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportPayload {
    pub generated_at: jiff::Timestamp,
    pub total_count: usize,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportEntry {
    /// One-based position in the report.
    pub index: usize,
    pub instrument_name: String,
    pub profile_name: String,
    pub date: jiff::Timestamp,
    pub score: u32,
    pub severity: String,
    pub context_note: Option<String>,
}

/// Assemble a report over `results`, keeping their order.
///
/// Profile and instrument names are resolved here so the renderer never has
/// to look anything up.
pub fn build_report<'a>(
    results: impl IntoIterator<Item = &'a TestResult>,
    profiles: &[Profile],
    catalog: &Catalog,
    generated_at: jiff::Timestamp,
) -> ReportPayload {
    let entries: Vec<ReportEntry> = results
        .into_iter()
        .enumerate()
        .map(|(i, result)| ReportEntry {
            index: i + 1,
            instrument_name: catalog
                .get(&result.test_type)
                .map(|instrument| instrument.name().to_string())
                .unwrap_or_else(|| result.test_type.clone()),
            profile_name: profiles
                .iter()
                .find(|p| p.id == result.profile_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| REMOVED_PROFILE.to_string()),
            date: result.date,
            score: result.scores.total,
            severity: result.scores.severity.clone(),
            context_note: Some(result.context_note.trim())
                .filter(|note| !note.is_empty())
                .map(str::to_string),
        })
        .collect();

    ReportPayload {
        generated_at,
        total_count: entries.len(),
        entries,
    }
}
