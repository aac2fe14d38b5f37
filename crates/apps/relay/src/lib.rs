//! HTTP relay serving descriptive statistics over an upstream series.
//!
//! `GET /stats?timestamp=<epoch secs>` validates the timestamp, fetches the
//! matching series from the configured upstream and answers with
//! `{"mean", "median", "min", "max"}` as fixed-point strings.

pub mod config;
pub mod routes;
pub mod service;
pub mod upstream;

pub use config::{Args, RelayConfig};
pub use routes::{router, AppState};
pub use service::fetch_stats;
pub use upstream::{HttpUpstream, Upstream};
