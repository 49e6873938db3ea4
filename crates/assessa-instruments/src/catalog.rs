use std::collections::HashSet;

use assessa_core::models::result::Scores;

use crate::error::InstrumentError;
use crate::scoring::{self, Answers, RangeProblem};
use crate::{Instrument, all_instruments};

/// Read-only table of the instruments available to the engine, populated once
/// at start-up.
pub struct Catalog {
    instruments: Vec<Box<dyn Instrument>>,
}

/// A defect found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProblem {
    pub instrument_id: String,
    pub problem: CatalogIssue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    Range(RangeProblem),
    /// A later entry reuses an earlier id and is never reachable by lookup.
    DuplicateId { position: usize },
}

impl Catalog {
    /// Build a catalog from arbitrary instruments. On duplicate ids the first
    /// entry wins.
    pub fn new(instruments: Vec<Box<dyn Instrument>>) -> Self {
        Self { instruments }
    }

    /// The built-in instruments.
    pub fn standard() -> Self {
        Self::new(all_instruments())
    }

    pub fn get(&self, test_type: &str) -> Option<&dyn Instrument> {
        self.instruments
            .iter()
            .find(|i| i.id() == test_type)
            .map(|i| i.as_ref())
    }

    pub fn lookup(&self, test_type: &str) -> Result<&dyn Instrument, InstrumentError> {
        self.get(test_type)
            .ok_or_else(|| InstrumentError::UnknownInstrument(test_type.to_string()))
    }

    pub fn contains(&self, test_type: &str) -> bool {
        self.get(test_type).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Instrument> + '_ {
        self.instruments.iter().map(|i| i.as_ref())
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Look up `test_type` and score `answers` against it.
    pub fn score(&self, test_type: &str, answers: &Answers) -> Result<Scores, InstrumentError> {
        scoring::score(self.lookup(test_type)?, answers)
    }

    /// Every range defect and shadowed duplicate across the catalog. Empty
    /// for a well-formed catalog.
    pub fn validate(&self) -> Vec<CatalogProblem> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for (position, instrument) in self.iter().enumerate() {
            let instrument_id = instrument.id().to_string();
            if !seen.insert(instrument.id()) {
                problems.push(CatalogProblem {
                    instrument_id,
                    problem: CatalogIssue::DuplicateId { position },
                });
                continue;
            }
            problems.extend(instrument.check_ranges().into_iter().map(|problem| {
                CatalogProblem {
                    instrument_id: instrument_id.clone(),
                    problem: CatalogIssue::Range(problem),
                }
            }));
        }

        problems
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
