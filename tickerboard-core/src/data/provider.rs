//! Quote source trait and structured fetch errors.
//!
//! The `QuoteSource` trait abstracts over where quotes come from (the local
//! HTTP service, or a fixed in-memory list) so the UI and tests can swap
//! implementations.

use std::sync::Mutex;

use thiserror::Error;

use super::history::{HistoryBar, Period};
use crate::domain::Quote;

/// The single failure kind of a refresh.
///
/// Displayable in both the CLI and the TUI error history.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Parse(String),
}

impl FetchError {
    /// Short tag for compact displays.
    pub fn label(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "NET",
            FetchError::Status { .. } => "HTTP",
            FetchError::Parse(_) => "DATA",
        }
    }
}

/// A source of quote snapshots.
pub trait QuoteSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the current list of quotes, in the source's own order.
    fn fetch(&self) -> Result<Vec<Quote>, FetchError>;

    /// Fetch price history for one symbol.
    fn fetch_history(&self, symbol: &str, period: Period) -> Result<Vec<HistoryBar>, FetchError>;
}

/// Fixed in-memory source. Each `fetch` pops the next queued response;
/// the last one repeats once the queue is down to one.
pub struct StaticSource {
    responses: Mutex<Vec<Result<Vec<Quote>, FetchError>>>,
    history: Vec<HistoryBar>,
}

impl StaticSource {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self::with_responses(vec![Ok(quotes)])
    }

    /// Responses are served front to back.
    pub fn with_responses(responses: Vec<Result<Vec<Quote>, FetchError>>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryBar>) -> Self {
        self.history = history;
        self
    }
}

impl QuoteSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> Result<Vec<Quote>, FetchError> {
        let mut queue = self
            .responses
            .lock()
            .map_err(|e| FetchError::Network(format!("source lock poisoned: {e}")))?;
        match queue.len() {
            0 => Ok(Vec::new()),
            1 => queue[0].clone(),
            _ => queue.pop().unwrap_or_else(|| Ok(Vec::new())),
        }
    }

    fn fetch_history(&self, _symbol: &str, _period: Period) -> Result<Vec<HistoryBar>, FetchError> {
        Ok(self.history.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str) -> Quote {
        Quote {
            symbol: Some(symbol.into()),
            ..Default::default()
        }
    }

    #[test]
    fn static_source_serves_in_order_then_repeats_last() {
        let source = StaticSource::with_responses(vec![
            Ok(vec![quote("A")]),
            Err(FetchError::Network("down".into())),
            Ok(vec![quote("B")]),
        ]);
        assert_eq!(source.fetch().unwrap()[0].symbol.as_deref(), Some("A"));
        assert!(source.fetch().is_err());
        assert_eq!(source.fetch().unwrap()[0].symbol.as_deref(), Some("B"));
        assert_eq!(source.fetch().unwrap()[0].symbol.as_deref(), Some("B"));
    }

    #[test]
    fn error_labels() {
        assert_eq!(FetchError::Parse("x".into()).label(), "DATA");
        assert_eq!(
            FetchError::Status { status: 500, message: "boom".into() }.to_string(),
            "HTTP 500: boom"
        );
    }
}
