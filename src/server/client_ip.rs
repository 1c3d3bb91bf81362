//! Client address extraction.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::config::HEADER_X_FORWARDED_FOR;

const UNKNOWN_CLIENT: &str = "unknown";

/// The requester's address: the first `X-Forwarded-For` entry, else the socket peer.
///
/// Never rejects; falls back to `"unknown"` when neither is available (e.g. a
/// router driven without `into_make_service_with_connect_info`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(HEADER_X_FORWARDED_FOR)?.to_str().ok()?;
    value
        .split(',')
        .next()
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ip) = forwarded_for(&parts.headers) {
            return Ok(ClientIp(ip));
        }
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());
        Ok(ClientIp(peer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> String {
        let (mut parts, _) = request.into_parts();
        let ClientIp(ip) = ClientIp::from_request_parts(&mut parts, &()).await.unwrap();
        ip
    }

    #[tokio::test]
    async fn test_first_forwarded_entry_wins() {
        let request = Request::builder()
            .header(HEADER_X_FORWARDED_FOR, "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, "203.0.113.7");
    }

    #[tokio::test]
    async fn test_peer_address_fallback() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 40000))));
        assert_eq!(extract(request).await, "192.0.2.1");
    }

    #[tokio::test]
    async fn test_blank_header_falls_back() {
        let mut request = Request::builder()
            .header(HEADER_X_FORWARDED_FOR, " ")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 40000))));
        assert_eq!(extract(request).await, "192.0.2.1");
    }

    #[tokio::test]
    async fn test_unknown_without_peer() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await, UNKNOWN_CLIENT);
    }
}
