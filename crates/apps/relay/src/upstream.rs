//! Upstream fetch abstraction.
//!
//! The relay only ever issues a plain GET against a fully formed URL and
//! hands the body back untouched. Decoding is the caller's job.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use stats::{PayloadPolicy, StatsError};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of raw series bodies.
///
/// Methods return boxed futures for dyn-compatibility.
pub trait Upstream: Send + Sync {
    /// GET `url` and return the response body.
    fn fetch(&self, url: &str) -> BoxFuture<'_, Result<Bytes, StatsError>>;
}

/// reqwest-backed upstream.
///
/// Under [`PayloadPolicy::Lenient`] the body is returned whatever the
/// response status, so an error page decodes as an empty series.
pub struct HttpUpstream {
    client: reqwest::Client,
    timeout: Duration,
    policy: PayloadPolicy,
}

impl HttpUpstream {
    pub fn new(timeout: Duration, policy: PayloadPolicy) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
            policy,
        }
    }
}

impl Upstream for HttpUpstream {
    fn fetch(&self, url: &str) -> BoxFuture<'_, Result<Bytes, StatsError>> {
        let url = url.to_string();
        Box::pin(async move {
            let resp = self
                .client
                .get(&url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| StatsError::UpstreamUnavailable(e.to_string()))?;

            if self.policy == PayloadPolicy::Strict && !resp.status().is_success() {
                return Err(StatsError::UpstreamUnavailable(format!(
                    "HTTP error: {}",
                    resp.status()
                )));
            }

            resp.bytes()
                .await
                .map_err(|e| StatsError::UpstreamUnavailable(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let addr = serve(Router::new().route("/stats", get(|| async { "payload" }))).await;
        let upstream = HttpUpstream::new(Duration::from_secs(5), PayloadPolicy::Strict);

        let body = upstream
            .fetch(&format!("http://{addr}/stats?timestamp=1"))
            .await
            .unwrap();
        assert_eq!(&body[..], b"payload");
    }

    #[tokio::test]
    async fn error_status_is_unavailable() {
        let app = Router::new().route(
            "/stats",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let addr = serve(app).await;
        let upstream = HttpUpstream::new(Duration::from_secs(5), PayloadPolicy::Strict);

        let err = upstream
            .fetch(&format!("http://{addr}/stats"))
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::UpstreamUnavailable(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn lenient_policy_returns_error_bodies() {
        let app = Router::new().route(
            "/stats",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let addr = serve(app).await;
        let upstream = HttpUpstream::new(Duration::from_secs(5), PayloadPolicy::Lenient);

        let body = upstream
            .fetch(&format!("http://{addr}/stats"))
            .await
            .unwrap();
        assert_eq!(&body[..], b"busy");
    }

    #[tokio::test]
    async fn connection_failure_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let upstream = HttpUpstream::new(Duration::from_secs(5), PayloadPolicy::Strict);
        let err = upstream
            .fetch(&format!("http://{addr}/stats"))
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::UpstreamUnavailable(_)));
    }
}
