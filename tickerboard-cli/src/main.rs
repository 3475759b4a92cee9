//! Tickerboard CLI: snapshot, history, and link commands.
//!
//! Commands:
//! - `snapshot`: fetch quotes once (or every interval with `--watch`),
//!   sort locally, print a table or JSON
//! - `history`: print a symbol's closing prices for a period
//! - `link`: print or open a symbol's detail page

use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use tickerboard_core::data::{detail_url, stocks_url, Period};
use tickerboard_core::{
    render_rows, sort_rows, BoardConfig, Column, HttpQuoteSource, QuoteSource, RowView,
    SortDirection, SortState,
};

#[derive(Parser)]
#[command(
    name = "tickerboard-cli",
    about = "Tickerboard CLI: stock quote snapshots from the local quote service"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root URL of the quote service (overrides the config file).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Seconds between refreshes in watch mode (overrides the config file).
    #[arg(long, global = true)]
    interval: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the quote list and print it.
    Snapshot {
        /// Column to sort by (key or header label, e.g. marketCap or "Mkt Cap").
        #[arg(long)]
        sort: Option<Column>,

        /// Sort order: desc, asc, or none (fetch order).
        #[arg(long, requires = "sort", default_value = "desc")]
        order: SortDirection,

        /// Print the sorted quotes as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Keep refreshing every interval until interrupted.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    /// Print closing prices for one symbol.
    History {
        symbol: String,

        /// Lookback window: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max.
        #[arg(long)]
        period: Option<Period>,
    },
    /// Print the detail page URL for a symbol.
    Link {
        symbol: String,

        /// Open it in the system browser.
        #[arg(long, default_value_t = false)]
        open: bool,
    },
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    let config = BoardConfig::resolve(cli.config.as_deref())?
        .with_overrides(cli.base_url, cli.interval)?;

    match cli.command {
        Commands::Snapshot {
            sort,
            order,
            json,
            watch,
        } => {
            let state = match sort {
                Some(column) => SortState::new(column, order),
                None => SortState::default(),
            };
            run_snapshot(&config, state, json, watch)
        }
        Commands::History { symbol, period } => {
            run_history(&config, &symbol, period.unwrap_or(config.history_period))
        }
        Commands::Link { symbol, open } => run_link(&config, &symbol, open),
    }
}

fn run_snapshot(config: &BoardConfig, state: SortState, json: bool, watch: bool) -> Result<()> {
    let source = HttpQuoteSource::new(config.base_url.clone(), config.request_timeout())?;
    let (key, order) = state.as_query();
    info!("GET {} (sort {key} {order}, applied locally)", stocks_url(&config.base_url));

    loop {
        match source.fetch() {
            Ok(quotes) => {
                let sorted = sort_rows(&quotes, &state);
                if json {
                    println!("{}", serde_json::to_string_pretty(&sorted)?);
                } else {
                    let rows = render_rows(&sorted, &config.base_url);
                    print!("{}", format_table(&rows, &state));
                }
            }
            Err(e) if watch => error!("refresh failed: {e}"),
            Err(e) => bail!("fetch failed: {e}"),
        }
        if !watch {
            return Ok(());
        }
        thread::sleep(config.refresh_interval());
        println!();
    }
}

fn run_history(config: &BoardConfig, symbol: &str, period: Period) -> Result<()> {
    let source = HttpQuoteSource::new(config.base_url.clone(), config.request_timeout())?;
    let bars = match source.fetch_history(symbol, period) {
        Ok(bars) => bars,
        Err(e) => bail!("history for {symbol} ({period}) failed: {e}"),
    };

    println!("{:<12} {:>12}", "Date", "Close");
    for bar in &bars {
        let date = bar
            .day()
            .map(|d| d.to_string())
            .or_else(|| bar.date.clone())
            .unwrap_or_default();
        let close = bar
            .close
            .map(|c| format!("{c:.2}"))
            .unwrap_or_else(|| "N/A".into());
        println!("{date:<12} {close:>12}");
    }
    info!("{} bars for {symbol} ({period})", bars.len());
    Ok(())
}

fn run_link(config: &BoardConfig, symbol: &str, open_it: bool) -> Result<()> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        bail!("symbol must not be empty");
    }
    let url = detail_url(&config.base_url, symbol);
    println!("{url}");
    if open_it {
        open::that(&url)?;
    }
    Ok(())
}

/// Plain-text table: header with the sort arrow, cells padded to the
/// widest value in each column.
fn format_table(rows: &[RowView], state: &SortState) -> String {
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|c| format!("{}{}", c.label(), state.indicator_for(*c)))
        .collect();

    let widths: Vec<usize> = Column::ALL
        .iter()
        .zip(&headers)
        .map(|(c, h)| {
            rows.iter()
                .map(|r| r.cell(*c).chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, Column::ALL.iter().map(|c| row.cell(*c)), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .zip(Column::ALL)
        .map(|((cell, w), c)| {
            if c.is_text() {
                format!("{cell:<w$}")
            } else {
                format!("{cell:>w$}")
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
