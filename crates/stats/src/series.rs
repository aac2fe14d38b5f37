//! Upstream series payload.
//!
//! The upstream answers `GET {endpoint}/stats?timestamp=<secs>` with two
//! parallel string arrays:
//!
//! ```json
//! {"Timestamps": ["1700000000", ...], "Values": ["0.42", ...]}
//! ```
//!
//! Values stay as strings here; numeric validation happens in
//! [`compute_stats`](crate::compute_stats).

use serde::Deserialize;

use crate::StatsError;

/// How to treat a body that does not decode as a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadPolicy {
    /// Fail with [`StatsError::MalformedUpstreamPayload`].
    #[default]
    Strict,
    /// Treat the body as an empty series.
    Lenient,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSeries {
    #[serde(rename = "Timestamps", default)]
    pub timestamps: Vec<String>,
    #[serde(rename = "Values", default)]
    pub values: Vec<String>,
}

impl RawSeries {
    pub fn new(timestamps: Vec<String>, values: Vec<String>) -> Self {
        Self { timestamps, values }
    }

    pub fn decode(body: &[u8], policy: PayloadPolicy) -> Result<Self, StatsError> {
        match serde_json::from_slice::<RawSeries>(body) {
            Ok(series) => Ok(series),
            Err(err) => match policy {
                PayloadPolicy::Strict => {
                    Err(StatsError::MalformedUpstreamPayload(err.to_string()))
                }
                PayloadPolicy::Lenient => Ok(Self::default()),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Both arrays have one entry per sample.
    pub fn is_aligned(&self) -> bool {
        self.timestamps.len() == self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_upstream_shape() {
        let body = br#"{"Timestamps":["1","2"],"Values":["0.5","1.5"]}"#;
        let series = RawSeries::decode(body, PayloadPolicy::Strict).unwrap();
        assert_eq!(
            series,
            RawSeries::new(
                vec!["1".into(), "2".into()],
                vec!["0.5".into(), "1.5".into()]
            )
        );
        assert!(series.is_aligned());
        assert_eq!(series.values.len(), 2);
    }

    #[test]
    fn missing_keys_decode_empty() {
        let series = RawSeries::decode(b"{}", PayloadPolicy::Strict).unwrap();
        assert!(series.is_empty());
        assert!(series.is_aligned());
    }

    #[test]
    fn malformed_body_depends_on_policy() {
        let body = b"<html>502 Bad Gateway</html>";
        let err = RawSeries::decode(body, PayloadPolicy::Strict).unwrap_err();
        assert!(matches!(err, StatsError::MalformedUpstreamPayload(_)));

        let series = RawSeries::decode(body, PayloadPolicy::Lenient).unwrap();
        assert_eq!(series, RawSeries::default());
    }

    #[test]
    fn numeric_values_are_not_strings() {
        // The upstream contract is string arrays; bare numbers are a shape error.
        let body = br#"{"Timestamps":[],"Values":[1.0]}"#;
        assert!(RawSeries::decode(body, PayloadPolicy::Strict).is_err());
    }

    #[test]
    fn misaligned_arrays_are_reported() {
        let series = RawSeries::new(vec!["1".into()], vec!["1".into(), "2".into()]);
        assert!(!series.is_aligned());
    }
}
