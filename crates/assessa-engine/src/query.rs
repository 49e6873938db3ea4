//! Filtering and aggregation over test results, for history views, summary
//! cards, and charts.
//!
//! History order is newest first. Chart series are the one place results
//! are re-sorted oldest first, and they get their own accessor.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use assessa_core::models::result::TestResult;

use crate::error::EngineError;

/// How far back to look. Serialized as `"all"` or a day count such as `"30"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    #[default]
    All,
    Days(u32),
}

impl Timeframe {
    /// Earliest instant still inside the timeframe, if bounded.
    pub fn cutoff(self, now: Timestamp) -> Option<Timestamp> {
        match self {
            Timeframe::All => None,
            Timeframe::Days(days) => Some(
                now.checked_sub(SignedDuration::from_hours(i64::from(days) * 24))
                    .unwrap_or(Timestamp::MIN),
            ),
        }
    }
}

impl FromStr for Timeframe {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Timeframe::All);
        }
        s.parse::<u32>()
            .map(Timeframe::Days)
            .map_err(|_| EngineError::InvalidInput {
                field: "timeframe",
                reason: format!("expected \"all\" or a number of days, got {s:?}"),
            })
    }
}

impl TryFrom<String> for Timeframe {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(timeframe: Timeframe) -> Self {
        timeframe.to_string()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::All => f.write_str("all"),
            Timeframe::Days(days) => write!(f, "{days}"),
        }
    }
}

/// Which results a view should show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResultFilter {
    #[serde(default)]
    pub profile_id: Option<Uuid>,
    #[serde(default)]
    #[ts(type = "string")]
    pub timeframe: Timeframe,
}

impl ResultFilter {
    pub fn for_profile(profile_id: Uuid) -> Self {
        Self {
            profile_id: Some(profile_id),
            timeframe: Timeframe::All,
        }
    }

    pub fn within_days(mut self, days: u32) -> Self {
        self.timeframe = Timeframe::Days(days);
        self
    }
}

/// Keep the results matching `filter`, newest first.
///
/// The timeframe boundary is inclusive: a result dated exactly
/// `now - days` is kept. Ties on date keep their incoming order.
pub fn filter<'a>(
    results: &'a [TestResult],
    filter: &ResultFilter,
    now: Timestamp,
) -> Vec<&'a TestResult> {
    let cutoff = filter.timeframe.cutoff(now);

    let mut kept: Vec<&TestResult> = results
        .iter()
        .filter(|r| filter.profile_id.is_none_or(|id| r.profile_id == id))
        .filter(|r| cutoff.is_none_or(|c| r.date >= c))
        .collect();

    kept.sort_by(|a, b| b.date.cmp(&a.date));
    kept
}

/// Partition results by instrument, preserving incoming order in each group.
pub fn group_by_instrument<'a>(
    results: &[&'a TestResult],
) -> BTreeMap<String, Vec<&'a TestResult>> {
    let mut groups: BTreeMap<String, Vec<&TestResult>> = BTreeMap::new();
    for &result in results {
        groups
            .entry(result.test_type.clone())
            .or_default()
            .push(result);
    }
    groups
}

/// Headline numbers for a set of results.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Summary {
    pub count: usize,
    pub distinct_instrument_count: usize,
    pub average_score_by_instrument: BTreeMap<String, f64>,
    /// `None` when there are no results.
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum DateRange {
    /// Every result shares one instant.
    Single { at: Timestamp },
    Span { earliest: Timestamp, latest: Timestamp },
}

pub fn summarize(results: &[&TestResult]) -> Summary {
    let instruments: BTreeSet<&str> = results.iter().map(|r| r.test_type.as_str()).collect();

    let average_score_by_instrument = group_by_instrument(results)
        .into_iter()
        .map(|(test_type, group)| {
            let sum: u64 = group.iter().map(|r| u64::from(r.scores.total)).sum();
            (test_type, sum as f64 / group.len() as f64)
        })
        .collect();

    let earliest = results.iter().map(|r| r.date).min();
    let latest = results.iter().map(|r| r.date).max();
    let date_range = match (earliest, latest) {
        (Some(earliest), Some(latest)) if earliest == latest => {
            Some(DateRange::Single { at: earliest })
        }
        (Some(earliest), Some(latest)) => Some(DateRange::Span { earliest, latest }),
        _ => None,
    };

    Summary {
        count: results.len(),
        distinct_instrument_count: instruments.len(),
        average_score_by_instrument,
        date_range,
    }
}

/// Chart data for one instrument group: parallel vectors, oldest first.
///
/// Raw data points only; no smoothing or interpolation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Series {
    pub labels: Vec<Timestamp>,
    pub scores: Vec<u32>,
    pub severities: Vec<String>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn series_for(group: &[&TestResult]) -> Series {
    let mut ordered = group.to_vec();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));

    let mut series = Series::default();
    for result in ordered {
        series.labels.push(result.date);
        series.scores.push(result.scores.total);
        series.severities.push(result.scores.severity.clone());
    }
    series
}
