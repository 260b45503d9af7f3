//! HTTP transport seam for the auth gateway.
//!
//! Client-side (csr): real `fetch` calls via `gloo-net`.
//! Native builds: `FetchTransport` fails every request, since the identity
//! service is only reachable from the browser. Tests supply their own
//! `Transport` implementations.

use async_trait::async_trait;

use super::types::{HttpRequest, HttpResponse};
#[cfg(feature = "csr")]
use super::types::Method;

/// The request never completed (offline, DNS failure, refused, CORS).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

#[async_trait(?Send)]
pub trait Transport {
    /// Send one request and return the status and raw body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when no HTTP response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Browser `fetch` transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let transport_err = |e: gloo_net::Error| TransportError(e.to_string());
            let builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
            }
            .header("Authorization", &request.authorization);

            let response = match request.body {
                Some(body) => {
                    builder
                        .header("Content-Type", "application/json")
                        .body(body)
                        .map_err(transport_err)?
                        .send()
                        .await
                }
                None => builder.send().await,
            }
            .map_err(transport_err)?;

            let status = response.status();
            // An unreadable body is surfaced as an empty one and fails decoding upstream.
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError(format!("not available outside the browser: {}", request.url)))
        }
    }
}
