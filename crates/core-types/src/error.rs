use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Series length mismatch: {dates} dates vs {returns} returns")]
    LengthMismatch { dates: usize, returns: usize },

    #[error("Series dates must be strictly ascending: {previous} is followed by {next}")]
    UnsortedDates { previous: String, next: String },

    #[error("Rank matrix month {month} has {labels} labels but {values} values")]
    RankRowMismatch {
        month: usize,
        labels: usize,
        values: usize,
    },
}
