use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use stats::PayloadPolicy;

pub const DEFAULT_UPSTREAM_URL: &str = "https://cfisysapi.developers.workers.dev";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Relay that summarises an upstream network-statistics series")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "RELAY_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,

    /// Base URL of the statistics upstream (without the /stats path)
    #[arg(long, env = "RELAY_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// File served at /README.txt
    #[arg(long = "readme", env = "RELAY_README", default_value = "README.txt")]
    pub readme_path: PathBuf,

    /// Treat an undecodable upstream body as an empty series instead of failing
    #[arg(long, env = "RELAY_LENIENT_PAYLOAD")]
    pub lenient_payload: bool,

    /// Per-request timeout for upstream fetches
    #[arg(long, env = "RELAY_UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub addr: SocketAddr,
    pub upstream_url: String,
    pub readme_path: PathBuf,
    pub payload_policy: PayloadPolicy,
    pub upstream_timeout: Duration,
}

impl RelayConfig {
    /// Defaults for everything except the upstream base URL.
    pub fn with_upstream(upstream_url: impl Into<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            ..Self::default()
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            readme_path: PathBuf::from("README.txt"),
            payload_policy: PayloadPolicy::Strict,
            upstream_timeout: Duration::from_secs(10),
        }
    }
}

impl From<Args> for RelayConfig {
    fn from(args: Args) -> Self {
        let payload_policy = if args.lenient_payload {
            PayloadPolicy::Lenient
        } else {
            PayloadPolicy::Strict
        };
        Self {
            addr: args.addr,
            upstream_url: args.upstream_url,
            readme_path: args.readme_path,
            payload_policy,
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
        }
    }
}
