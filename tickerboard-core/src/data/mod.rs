//! Data access: the quote source trait, the HTTP implementation, and
//! the history endpoint.

pub mod endpoints;
pub mod history;
pub mod http;
pub mod provider;

pub use endpoints::{detail_url, history_url, stocks_url};
pub use history::{HistoryBar, Period};
pub use http::{parse_history, parse_quotes, HttpQuoteSource};
pub use provider::{FetchError, QuoteSource, StaticSource};
