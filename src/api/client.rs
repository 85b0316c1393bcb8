//! Shared HTTP client for the course backend

use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::error::Result;

/// Course backend client wrapper
///
/// Holds one `reqwest` client and the configured base URL; the
/// per-concern services build their endpoints through it.
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Resolve a path against the configured base
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }
}

/// Error body shapes the backend uses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

/// Pull a human-readable reason out of a non-2xx response, falling
/// back to a generic message when the body carries no structured one
pub(crate) async fn error_reason(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body
            .detail
            .or(body.error)
            .unwrap_or_else(|| format!("Request failed ({})", status)),
        Err(_) => format!("Request failed ({})", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_against_base() {
        let api = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            api.endpoint("fetch/quiz").unwrap().as_str(),
            "http://localhost:8000/fetch/quiz"
        );
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(ApiClient::new("not a url").is_err());
    }
}
