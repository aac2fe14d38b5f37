use crate::StatsError;

/// Resolve the caller-supplied `timestamp` query value against `now`.
///
/// Absent, empty, or non-integer input falls back to `now`. Only a value that
/// parses and lies strictly after `now` is rejected.
pub fn prepare(raw: Option<&str>, now: i64) -> Result<i64, StatsError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(now);
    };
    match raw.parse::<i64>() {
        Ok(requested) if requested > now => Err(StatsError::FutureTimestamp { requested, now }),
        Ok(requested) => Ok(requested),
        Err(_) => Ok(now),
    }
}

/// Upstream query URL for the series ending at `timestamp`.
pub fn upstream_url(endpoint: &str, timestamp: i64) -> String {
    format!(
        "{}/stats?timestamp={timestamp}",
        endpoint.trim_end_matches('/')
    )
}

/// A validated request, ready to be sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRequest {
    pub timestamp: i64,
    pub url: String,
}

impl StatsRequest {
    /// Resolve the timestamp and build the upstream URL for it.
    pub fn prepare(endpoint: &str, raw: Option<&str>, now: i64) -> Result<Self, StatsError> {
        let timestamp = prepare(raw, now)?;
        Ok(Self {
            timestamp,
            url: upstream_url(endpoint, timestamp),
        })
    }
}
