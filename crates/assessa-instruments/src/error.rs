use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("{instrument_id}: no answer for question(s) {missing:?}")]
    IncompleteAnswers {
        instrument_id: String,
        missing: Vec<usize>,
    },

    #[error("{instrument_id}: {value} is not a valid answer for question {question}")]
    InvalidAnswer {
        instrument_id: String,
        question: usize,
        value: u32,
    },

    /// Only reachable with a malformed catalog entry: its ranges leave gaps,
    /// or its option values are large enough that the total overflows `u32`.
    #[error("{instrument_id}: total score {total} falls in no scoring range")]
    ScoreOutOfRange { instrument_id: String, total: u64 },
}
