//! Built-in instruments. All are public-domain screeners that share the
//! four-point "over the last two weeks" frequency scale.

pub mod gad2;
pub mod gad7;
pub mod phq2;
pub mod phq9;

use std::sync::LazyLock;

use crate::scoring::{AnswerOption, ScoringRange};

static FREQUENCY_OPTIONS: LazyLock<Vec<AnswerOption>> = LazyLock::new(|| {
    [
        (0, "Not at all"),
        (1, "Several days"),
        (2, "More than half the days"),
        (3, "Nearly every day"),
    ]
    .into_iter()
    .map(|(value, label)| AnswerOption {
        value,
        label: label.to_string(),
    })
    .collect()
});

fn frequency_options() -> &'static [AnswerOption] {
    &FREQUENCY_OPTIONS
}

fn band(min: u32, max: u32, severity: &str, color: &str) -> ScoringRange {
    ScoringRange {
        min,
        max,
        severity: severity.to_string(),
        color: color.to_string(),
    }
}

fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const GREEN: &str = "#22c55e";
const YELLOW: &str = "#eab308";
const ORANGE: &str = "#f97316";
const RED: &str = "#dc2626";
const BROWN: &str = "#7c2d12";
