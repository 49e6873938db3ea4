use std::sync::LazyLock;

use super::{GREEN, ORANGE, band, frequency_options, prompts};
use crate::Instrument;
use crate::scoring::{AnswerOption, ScoringRange};

/// PHQ-2: the first two PHQ-9 items, used as a quick pre-screen.
/// Total 0–6; 3 or more warrants the full PHQ-9.
pub struct Phq2;

static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
    prompts(&[
        "Little interest or pleasure in doing things",
        "Feeling down, depressed, or hopeless",
    ])
});

static RANGES: LazyLock<Vec<ScoringRange>> = LazyLock::new(|| {
    vec![
        band(0, 2, "Negative screen", GREEN),
        band(3, 6, "Positive screen", ORANGE),
    ]
});

impl Instrument for Phq2 {
    fn id(&self) -> &str {
        "PHQ-2"
    }

    fn name(&self) -> &str {
        "PHQ-2 Patient Health Questionnaire (short form)"
    }

    fn description(&self) -> &str {
        "Quick depression pre-screen"
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
