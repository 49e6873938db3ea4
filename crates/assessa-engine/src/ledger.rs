//! Result ledger: append-only record of scored submissions.
//!
//! Results are never edited. They leave the document only when their profile
//! is deleted (see [`crate::registry::delete_profile`]).

use jiff::Timestamp;
use serde::Deserialize;
use ts_rs::TS;
use uuid::Uuid;

use assessa_core::models::document::Document;
use assessa_core::models::result::TestResult;
use assessa_instruments::catalog::Catalog;
use assessa_instruments::scoring::{self, Answers};

use crate::error::EngineError;
use crate::registry::check_len;

pub const MAX_CONTEXT_NOTE_LEN: usize = 500;

/// A completed questionnaire, as submitted.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Submission {
    pub profile_id: Uuid,
    pub test_type: String,
    pub answers: Answers,
    /// What was going on at the time. May be empty.
    #[serde(default)]
    pub context_note: String,
}

/// Score a submission and append the resulting record.
///
/// The profile must exist and the instrument must be in the catalog; answers
/// are scored strictly (see [`scoring::score`]).
pub fn record_result(
    document: &mut Document,
    catalog: &Catalog,
    submission: Submission,
    now: Timestamp,
) -> Result<TestResult, EngineError> {
    if document.profile(submission.profile_id).is_none() {
        return Err(EngineError::ProfileNotFound(submission.profile_id));
    }
    let instrument = catalog.lookup(&submission.test_type)?;

    let context_note = submission.context_note.trim().to_string();
    check_len("context note", &context_note, MAX_CONTEXT_NOTE_LEN)?;

    let scores = scoring::score(instrument, &submission.answers)?;

    let mut id = Uuid::new_v4();
    while document.test_results.iter().any(|r| r.id == id) {
        id = Uuid::new_v4();
    }

    let result = TestResult {
        id,
        profile_id: submission.profile_id,
        test_type: submission.test_type,
        date: now,
        scores,
        raw_answers: submission.answers.into_inner(),
        context_note,
        ai_analysis: None,
        completion_time: None,
    };
    document.test_results.push(result.clone());
    Ok(result)
}

/// All results, or only those of one profile, in insertion order.
pub fn results_for(document: &Document, profile_id: Option<Uuid>) -> Vec<&TestResult> {
    document
        .test_results
        .iter()
        .filter(|r| profile_id.is_none_or(|id| r.profile_id == id))
        .collect()
}

pub fn result_count(document: &Document, profile_id: Uuid) -> usize {
    document
        .test_results
        .iter()
        .filter(|r| r.profile_id == profile_id)
        .count()
}
