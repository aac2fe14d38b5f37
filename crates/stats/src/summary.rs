use std::cmp::Ordering;

use serde::Serialize;

use crate::{RawSeries, StatsError};

/// Fixed-point summary of a series, three fractional digits per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub mean: String,
    pub median: String,
    pub min: String,
    pub max: String,
}

impl Stats {
    /// Result for an empty series.
    pub fn zero() -> Self {
        Self::from_values(0.0, 0.0, 0.0, 0.0)
    }

    fn from_values(mean: f64, median: f64, min: f64, max: f64) -> Self {
        Self {
            mean: format_fixed(mean),
            median: format_fixed(median),
            min: format_fixed(min),
            max: format_fixed(max),
        }
    }
}

fn format_fixed(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{v:.3}")
    }
}

/// `inf`, `infinity` or `nan` spelled out, in any case, optionally signed.
fn is_non_finite_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|lit| unsigned.eq_ignore_ascii_case(lit))
}

fn parse_value(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    // Out-of-range magnitudes like "1e400" overflow to infinity.
    if v.is_finite() || is_non_finite_literal(s) {
        Some(v)
    } else {
        None
    }
}

/// Parse every value, stopping at the first one that is not a float.
fn parse_values(raw: &[String]) -> Result<Vec<f64>, StatsError> {
    raw.iter()
        .enumerate()
        .map(|(index, s)| {
            parse_value(s).ok_or_else(|| StatsError::InvalidNumericValue {
                index,
                value: s.clone(),
            })
        })
        .collect()
}

/// Ascending order with NaN ahead of every number.
fn nan_first(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(b),
    }
}

/// Median of an ascending-sorted, non-empty slice.
fn median_sorted(sorted: &[f64]) -> f64 {
    let len = sorted.len();
    if len % 2 == 0 {
        (sorted[(len - 1) / 2] + sorted[(len + 1) / 2]) / 2.0
    } else {
        sorted[len / 2]
    }
}

/// Mean, median, min and max over the series values.
///
/// Timestamps are ignored. An empty series yields [`Stats::zero`].
pub fn compute_stats(series: &RawSeries) -> Result<Stats, StatsError> {
    if series.values.is_empty() {
        return Ok(Stats::zero());
    }

    let mut values = parse_values(&series.values)?;
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    values.sort_by(nan_first);
    let min = values[0];
    let max = values[values.len() - 1];

    Ok(Stats::from_values(mean, median_sorted(&values), min, max))
}
