use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("timeline document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event `{title}`: cannot parse {field} `{value}` as an ISO-8601 date")]
    InvalidDate {
        title: String,
        field: &'static str,
        value: String,
    },

    #[error("event `{title}`: needs either `date` or `startDate`")]
    MissingDate { title: String },

    #[error("event `{title}`: `date` cannot be combined with `startDate`/`endDate`")]
    ConflictingDates { title: String },

    #[error("event `{title}`: `endDate` given without `startDate`")]
    EndWithoutStart { title: String },

    #[error("event `{title}`: `endDate` is earlier than `startDate`")]
    EndBeforeStart { title: String },

    #[error("event `{title}`: unknown category `{category}`")]
    UnknownCategory { title: String, category: String },

    #[error("failed to fetch timeline data: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
