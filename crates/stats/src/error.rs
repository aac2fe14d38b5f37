use thiserror::Error;

/// Failure kinds for a single stats request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("timestamp {requested} is in the future (now {now})")]
    FutureTimestamp { requested: i64, now: i64 },

    #[error("value #{index} is not numeric: {value:?}")]
    InvalidNumericValue { index: usize, value: String },

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed upstream payload: {0}")]
    MalformedUpstreamPayload(String),
}

impl StatsError {
    /// True when the caller's input caused the failure rather than the upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StatsError::FutureTimestamp { .. })
    }
}
