//! Tickerboard Core: quote model, sort engine, formatting, and data access.
//!
//! This crate holds everything that does not touch a terminal:
//! - Quote and column types with lenient deserialization
//! - Three-state sort toggle and the client-side sort engine
//! - Large-number, currency, and percent formatting
//! - Daily-change color interpolation
//! - Row view model shared by the TUI and the CLI
//! - HTTP quote source, history endpoint, and TOML configuration

pub mod color;
pub mod config;
pub mod data;
pub mod domain;
pub mod format;
pub mod sort;
pub mod view;

pub use color::{color_for, Rgb};
pub use config::{BoardConfig, ConfigError};
pub use data::{FetchError, HttpQuoteSource, QuoteSource};
pub use domain::{Column, Quote};
pub use sort::{sort_rows, SortDirection, SortState};
pub use view::{render_rows, RowView};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI worker moves across threads
    /// is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Quote>();
        require_sync::<Quote>();
        require_send::<FetchError>();
        require_sync::<FetchError>();
        require_send::<data::HistoryBar>();
        require_sync::<data::HistoryBar>();
        require_send::<HttpQuoteSource>();
        require_sync::<HttpQuoteSource>();
        require_send::<data::StaticSource>();
        require_sync::<data::StaticSource>();
        require_send::<BoardConfig>();
        require_sync::<BoardConfig>();
    }
}
