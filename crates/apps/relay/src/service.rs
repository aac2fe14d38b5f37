use stats::{compute_stats, RawSeries, Stats, StatsError, StatsRequest};
use tracing::{debug, warn};

use crate::config::RelayConfig;
use crate::upstream::Upstream;

/// Validate the timestamp, fetch the series and summarise it.
///
/// A rejected timestamp never reaches the upstream.
pub async fn fetch_stats(
    upstream: &dyn Upstream,
    config: &RelayConfig,
    raw_timestamp: Option<&str>,
    now: i64,
) -> Result<Stats, StatsError> {
    let request = StatsRequest::prepare(&config.upstream_url, raw_timestamp, now)?;
    debug!("fetching series: {}", request.url);

    let body = upstream.fetch(&request.url).await?;
    let series = RawSeries::decode(&body, config.payload_policy)?;
    if !series.is_aligned() {
        warn!(
            "series arrays differ in length: {} timestamps, {} values",
            series.timestamps.len(),
            series.values.len()
        );
    }

    compute_stats(&series)
}
