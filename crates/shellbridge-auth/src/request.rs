//! Outgoing API request options.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};

/// Options for an API request, decorated by a
/// [`CredentialSupplier`](crate::CredentialSupplier) before sending.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Add a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Current `Authorization` header, if set and printable.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Build the request on `client`.
    pub fn into_request(self, client: &Client) -> RequestBuilder {
        client.request(self.method, self.url).headers(self.headers)
    }
}
