//! assessa-instruments
//!
//! Standardized self-report questionnaire definitions and the scoring rules
//! that turn a set of answers into a total and a severity band. Pure data and
//! pure functions; adding an instrument means adding a catalog entry, nothing
//! else.

pub mod catalog;
pub mod error;
pub mod instruments;
pub mod scoring;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use scoring::{AnswerOption, RangeProblem, ScoringRange};

/// Trait implemented by each questionnaire in the catalog.
pub trait Instrument: Send + Sync {
    /// Catalog key, stored as `testType` on results (e.g. `"PHQ-9"`).
    fn id(&self) -> &str;

    /// Human-readable name (e.g. "PHQ-9 Patient Health Questionnaire").
    fn name(&self) -> &str;

    /// One-line statement of what the instrument screens for.
    fn description(&self) -> &str;

    /// Prompts, in presentation order.
    fn questions(&self) -> &[String];

    /// Options shared by every question.
    fn options(&self) -> &[AnswerOption];

    /// Severity bands over the total score.
    fn scoring_ranges(&self) -> &[ScoringRange];

    fn question_count(&self) -> usize {
        self.questions().len()
    }

    fn max_option_value(&self) -> u32 {
        self.options().iter().map(|o| o.value).max().unwrap_or(0)
    }

    /// Highest attainable total: every question answered with the top option.
    /// Saturates at `u32::MAX`.
    fn max_total(&self) -> u32 {
        u32::try_from(self.question_count())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.max_option_value())
    }

    /// Report gaps and overlaps in this instrument's ranges.
    fn check_ranges(&self) -> Vec<RangeProblem> {
        scoring::check_ranges(self.scoring_ranges(), self.max_total())
    }

    /// Owned snapshot for serialization to collaborators.
    fn to_definition(&self) -> InstrumentDefinition {
        InstrumentDefinition {
            id: self.id().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            questions: self.questions().to_vec(),
            options: self.options().to_vec(),
            scoring_ranges: self.scoring_ranges().to_vec(),
        }
    }
}

/// A questionnaire described entirely by data. Lets callers register
/// instruments without writing a new type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InstrumentDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<String>,
    pub options: Vec<AnswerOption>,
    pub scoring_ranges: Vec<ScoringRange>,
}

impl Instrument for InstrumentDefinition {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn questions(&self) -> &[String] {
        &self.questions
    }

    fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    fn scoring_ranges(&self) -> &[ScoringRange] {
        &self.scoring_ranges
    }
}

/// Return all built-in instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::phq2::Phq2),
        Box::new(instruments::gad2::Gad2),
    ]
}

/// Look up a built-in instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
