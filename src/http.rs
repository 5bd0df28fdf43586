use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::error::KiraError;

pub fn build_client(timeout: Duration) -> Result<Client, KiraError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("kira-mo/{}", env!("CARGO_PKG_VERSION")))
            .map_err(|err| KiraError::HttpClient(err.to_string()))?,
    );
    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|err| KiraError::HttpClient(err.to_string()))
}

/// Error constructors for one upstream service.
#[derive(Clone, Copy)]
pub struct ServiceErrors {
    pub name: &'static str,
    pub http: fn(String) -> KiraError,
    pub status: fn(u16, String) -> KiraError,
    pub parse: fn(String) -> KiraError,
}

impl ServiceErrors {
    /// `base_url` with `segments` appended, each percent-encoded so that a
    /// `/` inside a gene symbol stays within its own path segment.
    pub fn url(&self, base_url: &str, segments: &[&str]) -> Result<Url, KiraError> {
        let mut url = Url::parse(base_url)
            .map_err(|err| (self.http)(format!("invalid base URL {base_url}: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| (self.http)(format!("base URL {base_url} cannot take a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn send(&self, request: RequestBuilder) -> Result<Response, KiraError> {
        let response = request.send().map_err(|err| self.transport(err))?;
        tracing::debug!(
            service = self.name,
            url = %response.url(),
            status = response.status().as_u16(),
            "upstream response"
        );
        self.handle_status(response)
    }

    pub fn text(&self, request: RequestBuilder) -> Result<String, KiraError> {
        self.send(request)?
            .text()
            .map_err(|err| self.transport(err))
    }

    pub fn json(&self, request: RequestBuilder) -> Result<Value, KiraError> {
        let body = self.text(request)?;
        serde_json::from_str(&body).map_err(|err| (self.parse)(err.to_string()))
    }

    fn transport(&self, err: reqwest::Error) -> KiraError {
        if err.is_timeout() {
            KiraError::Timeout(self.name.to_string())
        } else {
            (self.http)(err.to_string())
        }
    }

    fn handle_status(&self, response: Response) -> Result<Response, KiraError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| format!("{} request failed", self.name));
        Err((self.status)(status, message.trim().to_string()))
    }
}

pub fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
