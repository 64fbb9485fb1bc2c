//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers. Used to
//! attach the originating user agent and IP address to session records.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Client identity derived from request headers
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    /// User-Agent header, if the client sent one
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// Get IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Extract client identity from request headers.
///
/// Neither field is required; a client without a User-Agent still gets a
/// session, it just has less metadata attached.
pub fn extract_client_info(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientInfo {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    ClientInfo {
        ip: extract_client_ip(headers, direct_ip),
        user_agent,
    }
}

/// Extract client IP address from headers.
///
/// Checks the X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // X-Forwarded-For: first IP in the list is the original client
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_info() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );

        let info = extract_client_info(&headers, None);
        assert_eq!(info.user_agent, Some("Mozilla/5.0 Test Browser".to_string()));
        assert!(info.ip.is_none());
    }

    #[test]
    fn test_extract_client_info_missing_ua() {
        let headers = HeaderMap::new();
        let info = extract_client_info(&headers, Some("127.0.0.1".parse().unwrap()));
        assert!(info.user_agent.is_none());
        assert_eq!(info.ip_string(), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }

    #[test]
    fn test_extract_client_ip_invalid_xff() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));

        let direct: IpAddr = "10.0.0.2".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }
}
