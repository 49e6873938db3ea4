use std::sync::LazyLock;

use super::{GREEN, ORANGE, band, frequency_options, prompts};
use crate::Instrument;
use crate::scoring::{AnswerOption, ScoringRange};

/// GAD-2: the first two GAD-7 items. Total 0–6; cut-off 3.
pub struct Gad2;

static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
    prompts(&[
        "Feeling nervous, anxious, or on edge",
        "Not being able to stop or control worrying",
    ])
});

static RANGES: LazyLock<Vec<ScoringRange>> = LazyLock::new(|| {
    vec![
        band(0, 2, "Negative screen", GREEN),
        band(3, 6, "Positive screen", ORANGE),
    ]
});

impl Instrument for Gad2 {
    fn id(&self) -> &str {
        "GAD-2"
    }

    fn name(&self) -> &str {
        "GAD-2 Generalized Anxiety Disorder Scale (short form)"
    }

    fn description(&self) -> &str {
        "Quick anxiety pre-screen"
    }

    fn questions(&self) -> &[String] {
        &QUESTIONS
    }

    fn options(&self) -> &[AnswerOption] {
        frequency_options()
    }

    fn scoring_ranges(&self) -> &[ScoringRange] {
        &RANGES
    }
}
