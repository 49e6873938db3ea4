use std::sync::LazyLock;

use super::{GREEN, ORANGE, RED, YELLOW, band, frequency_options, prompts};
use crate::Instrument;
use crate::scoring::{AnswerOption, ScoringRange};

/// GAD-7: Generalized Anxiety Disorder seven-item scale.
/// Items rated 0–3; total 0–21.
pub struct Gad7;

static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
    prompts(&[
        "Feeling nervous, anxious, or on edge",
        "Not being able to stop or control worrying",
        "Worrying too much about different things",
        "Trouble relaxing",
        "Being so restless that it is hard to sit still",
        "Becoming easily annoyed or irritable",
        "Feeling afraid, as if something awful might happen",
    ])
});

static RANGES: LazyLock<Vec<ScoringRange>> = LazyLock::new(|| {
    vec![
        band(0, 4, "Minimal", GREEN),
        band(5, 9, "Mild", YELLOW),
        band(10, 14, "Moderate", ORANGE),
        band(15, 21, "Severe", RED),
    ]
});

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "GAD-7"
    }

    fn name(&self) -> &str {
        "GAD-7 Generalized Anxiety Disorder Scale"
    }

    fn description(&self) -> &str {
        "Anxiety screening"
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
