//! Errors returned by this crate

use crate::date_key::DateKey;
use crate::plan::PlanId;

/// Every failure this crate can report.
///
/// Scheduling errors are caller-correctable preconditions (bad input). The remaining variants come from
/// the storage boundary (see [`PlanSource`](crate::traits::PlanSource)).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("invalid range: end {end} is before start {start}")]
    InvalidRange { start: DateKey, end: DateKey },

    #[error("invalid calendar color {0:?}")]
    InvalidColor(String),

    #[error("no such plan: {0}")]
    UnknownPlan(PlanId),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_date<S: Into<String>, R: Into<String>>(input: S, reason: R) -> Self {
        Error::InvalidDate { input: input.into(), reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
