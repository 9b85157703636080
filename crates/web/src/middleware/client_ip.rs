use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use std::convert::Infallible;

pub const UNKNOWN_IP: &str = "unknown";

/// Client address as reported by the proxy chain in front of us.
///
/// Order: first `x-forwarded-for` hop, `x-real-ip`, `cf-connecting-ip`.
pub fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| header("x-real-ip"))
        .or_else(|| header("cf-connecting-ip"))
        .unwrap_or(UNKNOWN_IP)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_ip(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn first_forwarded_hop_wins() {
        let h = headers(&[
            ("x-forwarded-for", " 203.0.113.7 , 10.0.0.1"),
            ("x-real-ip", "198.51.100.1"),
            ("cf-connecting-ip", "192.0.2.1"),
        ]);
        assert_eq!(client_ip(&h), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_real_ip_then_cloudflare() {
        let h = headers(&[("x-real-ip", "198.51.100.1"), ("cf-connecting-ip", "192.0.2.1")]);
        assert_eq!(client_ip(&h), "198.51.100.1");

        let h = headers(&[("cf-connecting-ip", "192.0.2.1")]);
        assert_eq!(client_ip(&h), "192.0.2.1");
    }

    #[test]
    fn empty_forwarded_for_is_skipped() {
        let h = headers(&[("x-forwarded-for", " , 10.0.0.1"), ("x-real-ip", "198.51.100.1")]);
        assert_eq!(client_ip(&h), "198.51.100.1");
    }

    #[test]
    fn unknown_without_headers() {
        assert_eq!(client_ip(&HeaderMap::new()), UNKNOWN_IP);
    }
}
