use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use assessa_core::models::result::Scores;

use crate::Instrument;
use crate::error::InstrumentError;

/// One selectable answer, shared by every question of an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub value: u32,
    pub label: String,
}

/// A labelled, colour-tagged band of total score. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringRange {
    pub min: u32,
    pub max: u32,
    pub severity: String,
    pub color: String,
}

impl ScoringRange {
    pub fn contains(&self, total: u32) -> bool {
        self.min <= total && total <= self.max
    }
}

/// Selected option values keyed by zero-based question index.
///
/// Nothing is assumed about completeness here; [`score`] checks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Answers(BTreeMap<usize, u32>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build answers from values given in question order.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        values.into_iter().enumerate().collect()
    }

    pub fn insert(&mut self, question: usize, value: u32) -> Option<u32> {
        self.0.insert(question, value)
    }

    pub fn get(&self, question: usize) -> Option<u32> {
        self.0.get(&question).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0.iter().map(|(q, v)| (*q, *v))
    }

    pub fn into_inner(self) -> BTreeMap<usize, u32> {
        self.0
    }
}

impl FromIterator<(usize, u32)> for Answers {
    fn from_iter<T: IntoIterator<Item = (usize, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<usize, u32>> for Answers {
    fn from(map: BTreeMap<usize, u32>) -> Self {
        Self(map)
    }
}

/// Score a complete answer set against an instrument.
///
/// Every question in `[0, question_count)` needs exactly one answer drawn from
/// the instrument's options. The severity is the first range containing the
/// total; a total outside every range is reported, never papered over.
pub fn score(instrument: &dyn Instrument, answers: &Answers) -> Result<Scores, InstrumentError> {
    let question_count = instrument.question_count();

    for (question, value) in answers.iter() {
        let known_option = instrument.options().iter().any(|o| o.value == value);
        if question >= question_count || !known_option {
            return Err(InstrumentError::InvalidAnswer {
                instrument_id: instrument.id().to_string(),
                question,
                value,
            });
        }
    }

    let missing: Vec<usize> = (0..question_count)
        .filter(|q| answers.get(*q).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(InstrumentError::IncompleteAnswers {
            instrument_id: instrument.id().to_string(),
            missing,
        });
    }

    let sum: u64 = answers.iter().map(|(_, v)| u64::from(v)).sum();
    let out_of_range = || InstrumentError::ScoreOutOfRange {
        instrument_id: instrument.id().to_string(),
        total: sum,
    };
    let total = u32::try_from(sum).map_err(|_| out_of_range())?;
    let band = instrument
        .scoring_ranges()
        .iter()
        .find(|r| r.contains(total))
        .ok_or_else(out_of_range)?;

    Ok(Scores {
        total,
        severity: band.severity.clone(),
        color: band.color.clone(),
    })
}

/// A defect in how an instrument's ranges cover `[0, max_total]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeProblem {
    /// `min > max`.
    Inverted { min: u32, max: u32 },
    /// Totals in `[from, to]` match no range.
    Gap { from: u32, to: u32 },
    /// A range starting at `at` overlaps an earlier one.
    Overlap { at: u32 },
    /// Ranges reach past the highest attainable total.
    Overhang { max: u32, max_total: u32 },
}

impl fmt::Display for RangeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeProblem::Inverted { min, max } => write!(f, "range {min}-{max} is inverted"),
            RangeProblem::Gap { from, to } => write!(f, "totals {from}-{to} are not covered"),
            RangeProblem::Overlap { at } => write!(f, "range starting at {at} overlaps another"),
            RangeProblem::Overhang { max, max_total } => {
                write!(f, "ranges reach {max} but the highest total is {max_total}")
            }
        }
    }
}

/// Check that `ranges` partition `[0, max_total]` with no gaps or overlaps.
pub fn check_ranges(ranges: &[ScoringRange], max_total: u32) -> Vec<RangeProblem> {
    let mut sorted: Vec<&ScoringRange> = ranges.iter().collect();
    sorted.sort_by_key(|r| (r.min, r.max));

    let mut problems = Vec::new();
    // First total not yet covered by an earlier range.
    let mut next: u64 = 0;

    for range in sorted {
        if range.min > range.max {
            problems.push(RangeProblem::Inverted {
                min: range.min,
                max: range.max,
            });
            continue;
        }
        let min = u64::from(range.min);
        if min > next {
            problems.push(RangeProblem::Gap {
                from: next as u32,
                to: range.min - 1,
            });
        } else if min < next {
            problems.push(RangeProblem::Overlap { at: range.min });
        }
        next = next.max(u64::from(range.max) + 1);
    }

    let end = u64::from(max_total) + 1;
    if next < end {
        problems.push(RangeProblem::Gap {
            from: next as u32,
            to: max_total,
        });
    } else if next > end {
        problems.push(RangeProblem::Overhang {
            max: (next - 1) as u32,
            max_total,
        });
    }

    problems
}
