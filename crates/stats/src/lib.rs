//! Descriptive statistics over an upstream network-statistics series.
//!
//! The crate is deliberately free of I/O: callers fetch the upstream body
//! themselves and hand the bytes to [`RawSeries::decode`], then run
//! [`compute_stats`] over the result. Timestamp validation for the inbound
//! request lives in [`request`].

pub mod error;
pub mod request;
pub mod series;
pub mod summary;

pub use error::*;
pub use request::*;
pub use series::*;
pub use summary::*;
