//! HTTP quote source backed by `reqwest::blocking`.
//!
//! Talks to the local quote service (`GET /api/stocks`,
//! `GET /api/stocks/{symbol}/history`). No retries: a failed request is
//! reported once and the caller decides what to keep on screen.

use std::time::Duration;

use log::debug;

use super::endpoints::{history_url, stocks_url};
use super::history::{ErrorBody, HistoryBar, Period};
use super::provider::{FetchError, QuoteSource};
use crate::domain::Quote;

/// Quote source for the local HTTP service.
pub struct HttpQuoteSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpQuoteSource {
    /// Build a client for `base_url`. `timeout: None` waits indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tickerboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// GET `url` and return the body of a 2xx response.
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| FetchError::Network(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
            });
        }
        Ok(body)
    }
}

impl QuoteSource for HttpQuoteSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self) -> Result<Vec<Quote>, FetchError> {
        let body = self.get_text(&stocks_url(&self.base_url))?;
        parse_quotes(&body)
    }

    fn fetch_history(&self, symbol: &str, period: Period) -> Result<Vec<HistoryBar>, FetchError> {
        let body = self.get_text(&history_url(&self.base_url, symbol, period))?;
        parse_history(&body)
    }
}

/// Parse a `/api/stocks` body. Only the top-level shape must be right;
/// individual fields degrade to absent.
pub fn parse_quotes(body: &str) -> Result<Vec<Quote>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

pub fn parse_history(body: &str) -> Result<Vec<HistoryBar>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Prefer the service's `{"error": "..."}` message, then the status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return err.error;
    }
    reason.unwrap_or("request failed").to_string()
}
