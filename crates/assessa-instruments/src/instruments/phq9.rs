use std::sync::LazyLock;

use super::{BROWN, GREEN, ORANGE, RED, YELLOW, band, frequency_options, prompts};
use crate::Instrument;
use crate::scoring::{AnswerOption, ScoringRange};

/// PHQ-9: Patient Health Questionnaire, nine-item depression screener.
/// Items rated 0–3; total 0–27.
pub struct Phq9;

static QUESTIONS: LazyLock<Vec<String>> = LazyLock::new(|| {
    prompts(&[
        "Little interest or pleasure in doing things",
        "Feeling down, depressed, or hopeless",
        "Trouble falling or staying asleep, or sleeping too much",
        "Feeling tired or having little energy",
        "Poor appetite or overeating",
        "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
        "Trouble concentrating on things, such as reading the newspaper or watching television",
        "Moving or speaking so slowly that other people could have noticed, or the opposite: being so fidgety or restless that you have been moving around a lot more than usual",
        "Thoughts that you would be better off dead, or of hurting yourself in some way",
    ])
});

static RANGES: LazyLock<Vec<ScoringRange>> = LazyLock::new(|| {
    vec![
        band(0, 4, "Minimal", GREEN),
        band(5, 9, "Mild", YELLOW),
        band(10, 14, "Moderate", ORANGE),
        band(15, 19, "Moderately severe", RED),
        band(20, 27, "Severe", BROWN),
    ]
});

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "PHQ-9"
    }

    fn name(&self) -> &str {
        "PHQ-9 Patient Health Questionnaire"
    }

    fn description(&self) -> &str {
        "Depression screening"
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
