/// All errors the showcase core can produce.
///
/// None of these escape the convenience wrappers: date failures collapse to
/// `None`/`false` and incomplete records are skipped during grouping.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShowcaseError {
    /// The date input was empty or only whitespace.
    #[error("empty date input")]
    EmptyDate,

    /// The date input could not be parsed as a calendar date or date/time.
    #[error("invalid date: {input:?}")]
    InvalidDate { input: String },

    /// A result row is missing a field required for grouping.
    #[error("result record is missing {field}")]
    IncompleteRecord { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
