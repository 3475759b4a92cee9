//! Application state, single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.
//! The table shows the most recent successful snapshot, sorted locally;
//! a failed refresh never touches it.

use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;

use tickerboard_core::data::{HistoryBar, Period};
use tickerboard_core::{render_rows, sort_rows, Column, FetchError, Quote, RowView, SortState};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Oldest entries fall off past this many.
pub const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Local>,
    /// Short tag such as `NET` or `HTTP`.
    pub category: &'static str,
    pub message: String,
    pub context: String,
}

/// What asked for a refresh. Only used for logging and the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    Timer,
    Manual,
    Sort,
}

impl fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefreshTrigger::Startup => "startup",
            RefreshTrigger::Timer => "timer",
            RefreshTrigger::Manual => "manual",
            RefreshTrigger::Sort => "sort",
        })
    }
}

/// Contents of the history overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryView {
    Loading,
    Ready(Vec<HistoryBar>),
    Failed(String),
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
    History {
        symbol: String,
        period: Period,
        view: HistoryView,
    },
}

/// Screen regions recorded during the last draw, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct ClickRegions {
    pub headers: Vec<(Rect, Column)>,
    /// Visible rows: (rect, index into `AppState::rows`).
    pub rows: Vec<(Rect, usize)>,
    pub symbol_cells: Vec<(Rect, usize)>,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub base_url: String,

    // Table
    /// Last successful response, in fetch order.
    pub snapshot: Vec<Quote>,
    pub sort: SortState,
    /// `snapshot` sorted by `sort` and rendered.
    pub rows: Vec<RowView>,
    pub table: TableState,
    pub column_cursor: Column,
    pub last_updated: Option<DateTime<Local>>,

    // Refresh bookkeeping
    pub refresh_interval: Duration,
    next_tick: Instant,
    latest_seq: u64,
    pub awaiting: bool,
    pub history_period: Period,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub regions: ClickRegions,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        base_url: impl Into<String>,
        refresh_interval: Duration,
        history_period: Period,
        now: Instant,
    ) -> Self {
        Self {
            running: true,
            base_url: base_url.into(),
            snapshot: Vec::new(),
            sort: SortState::default(),
            rows: Vec::new(),
            table: TableState::default(),
            column_cursor: Column::Number,
            last_updated: None,
            refresh_interval,
            next_tick: now + refresh_interval,
            latest_seq: 0,
            awaiting: false,
            history_period,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            regions: ClickRegions::default(),
        }
    }

    /// Ask the worker for a fresh snapshot. Any earlier request still in
    /// flight becomes stale.
    pub fn request_refresh(&mut self, trigger: RefreshTrigger) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        info!("refresh #{seq} requested ({trigger})");
        if self.worker_tx.send(WorkerCommand::FetchQuotes { seq }).is_err() {
            self.push_error("ERR", "background worker is not running".into(), trigger.to_string());
            return;
        }
        self.awaiting = true;
    }

    /// Fire the refresh timer if it is due.
    pub fn tick(&mut self, now: Instant) {
        if now >= self.next_tick {
            self.next_tick = now + self.refresh_interval;
            self.request_refresh(RefreshTrigger::Timer);
        }
    }

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Quotes { seq, result } => {
                if seq != self.latest_seq {
                    debug!("discarding stale response #{seq} (latest #{})", self.latest_seq);
                    return;
                }
                self.awaiting = false;
                match result {
                    Ok(quotes) => self.apply_snapshot(quotes),
                    Err(e) => self.record_fetch_error(&e, "GET /api/stocks".into()),
                }
            }
            WorkerResponse::History {
                symbol,
                period,
                result,
            } => self.apply_history(symbol, period, result),
        }
    }

    fn apply_snapshot(&mut self, quotes: Vec<Quote>) {
        info!("snapshot received: {} rows", quotes.len());
        self.snapshot = quotes;
        self.last_updated = Some(Local::now());
        self.rebuild_rows();
    }

    fn apply_history(
        &mut self,
        symbol: String,
        period: Period,
        result: Result<Vec<HistoryBar>, FetchError>,
    ) {
        let wanted = matches!(
            &self.overlay,
            Overlay::History { symbol: s, period: p, .. } if *s == symbol && *p == period
        );
        if let Err(e) = &result {
            self.record_fetch_error(e, format!("history {symbol} {period}"));
        }
        if !wanted {
            debug!("discarding history for {symbol} ({period}); overlay moved on");
            return;
        }
        let view = match result {
            Ok(bars) => HistoryView::Ready(bars),
            Err(e) => HistoryView::Failed(e.to_string()),
        };
        self.overlay = Overlay::History {
            symbol,
            period,
            view,
        };
    }

    fn record_fetch_error(&mut self, err: &FetchError, context: String) {
        error!("{context} failed: {err}");
        self.push_error(err.label(), err.to_string(), context);
    }

    /// Re-sort the cached snapshot and re-render, keeping the selected
    /// symbol under the cursor when it is still present.
    pub fn rebuild_rows(&mut self) {
        let selected_symbol = self.selected_row().and_then(|r| r.symbol.clone());
        let sorted = sort_rows(&self.snapshot, &self.sort);
        self.rows = render_rows(&sorted, &self.base_url);

        let index = selected_symbol
            .and_then(|s| self.rows.iter().position(|r| r.symbol.as_deref() == Some(s.as_str())))
            .or_else(|| self.table.selected().map(|i| i.min(self.rows.len().saturating_sub(1))))
            .or(Some(0));
        self.table
            .select(if self.rows.is_empty() { None } else { index });
    }

    /// Header click (or its keyboard equivalent): cycle the sort on
    /// `column`, re-sort what is on screen, then refresh.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort.toggle(column);
        self.column_cursor = column;
        let (key, order) = self.sort.as_query();
        info!("sort changed: {key} {order}");
        self.rebuild_rows();
        self.request_refresh(RefreshTrigger::Sort);
    }

    pub fn selected_row(&self) -> Option<&RowView> {
        self.table.selected().and_then(|i| self.rows.get(i))
    }

    pub fn select(&mut self, index: usize) {
        if index < self.rows.len() {
            self.table.select(Some(index));
        }
    }

    pub fn select_next(&mut self) {
        let next = self.table.selected().map_or(0, |i| i + 1);
        self.select(next);
    }

    pub fn select_prev(&mut self) {
        let prev = self.table.selected().map_or(0, |i| i.saturating_sub(1));
        self.select(prev);
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(self.rows.len().saturating_sub(1));
    }

    pub fn cursor_right(&mut self) {
        self.column_cursor = self.column_cursor.next();
    }

    pub fn cursor_left(&mut self) {
        self.column_cursor = self.column_cursor.prev();
    }

    /// Open the detail page of row `index` in the system browser.
    pub fn open_link(&mut self, index: usize) {
        let Some(url) = self.rows.get(index).and_then(|r| r.detail_url.clone()) else {
            self.set_warning("No symbol on this row");
            return;
        };
        info!("opening {url}");
        match open::that_detached(&url) {
            Ok(()) => self.set_status(format!("Opened {url}")),
            Err(e) => {
                warn!("failed to open {url}: {e}");
                self.push_error("LINK", e.to_string(), url);
                self.set_warning("Could not open browser (see e)");
            }
        }
    }

    pub fn open_selected_link(&mut self) {
        if let Some(i) = self.table.selected() {
            self.open_link(i);
        }
    }

    /// Show the price history overlay for the selected row.
    pub fn show_history(&mut self) {
        let Some(symbol) = self.selected_row().and_then(|r| r.symbol.clone()) else {
            self.set_warning("No symbol on this row");
            return;
        };
        self.request_history(symbol, self.history_period);
    }

    /// Switch the open history overlay to the next period.
    pub fn cycle_history_period(&mut self) {
        if let Overlay::History { symbol, period, .. } = &self.overlay {
            let symbol = symbol.clone();
            let period = period.next();
            self.history_period = period;
            self.request_history(symbol, period);
        }
    }

    fn request_history(&mut self, symbol: String, period: Period) {
        info!("history requested: {symbol} ({period})");
        let sent = self.worker_tx.send(WorkerCommand::FetchHistory {
            symbol: symbol.clone(),
            period,
        });
        let view = match sent {
            Ok(()) => HistoryView::Loading,
            Err(_) => HistoryView::Failed("background worker is not running".into()),
        };
        self.overlay = Overlay::History {
            symbol,
            period,
            view,
        };
    }

    /// Push an error to the history, capping at [`ERROR_HISTORY_CAP`].
    ///
    /// The table and the status line are left alone.
    pub fn push_error(&mut self, category: &'static str, message: String, context: String) {
        self.error_history.push_front(ErrorRecord {
            timestamp: Local::now(),
            category,
            message,
            context,
        });
        self.error_history.truncate(ERROR_HISTORY_CAP);
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use proptest::prelude::*;
    use tickerboard_core::SortDirection;

    struct Harness {
        app: AppState,
        commands: Receiver<WorkerCommand>,
        _responses: Sender<WorkerResponse>,
        start: Instant,
    }

    fn harness() -> Harness {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let start = Instant::now();
        let app = AppState::new(
            cmd_tx,
            resp_rx,
            "http://127.0.0.1:5000",
            Duration::from_secs(60),
            Period::SixMonths,
            start,
        );
        Harness {
            app,
            commands: cmd_rx,
            _responses: resp_tx,
            start,
        }
    }

    fn quote(symbol: &str, price: f64) -> Quote {
        Quote {
            symbol: Some(symbol.into()),
            current_price: Some(price),
            ..Default::default()
        }
    }

    fn symbols(app: &AppState) -> Vec<&str> {
        app.rows.iter().map(|r| r.cell(Column::Symbol)).collect()
    }

    fn last_seq(commands: &Receiver<WorkerCommand>) -> Option<u64> {
        commands
            .try_iter()
            .filter_map(|c| match c {
                WorkerCommand::FetchQuotes { seq } => Some(seq),
                _ => None,
            })
            .last()
    }

    fn deliver(app: &mut AppState, seq: u64, quotes: Vec<Quote>) {
        app.handle_response(WorkerResponse::Quotes {
            seq,
            result: Ok(quotes),
        });
    }

    #[test]
    fn header_clicks_cycle_desc_asc_none() {
        let mut h = harness();
        h.app.request_refresh(RefreshTrigger::Startup);
        deliver(
            &mut h.app,
            1,
            vec![quote("B", 2.0), quote("C", 3.0), quote("A", 1.0)],
        );
        assert_eq!(symbols(&h.app), ["B", "C", "A"]);

        h.app.toggle_sort(Column::CurrentPrice);
        assert_eq!(h.app.sort.direction, SortDirection::Descending);
        assert_eq!(symbols(&h.app), ["C", "B", "A"]);

        h.app.toggle_sort(Column::CurrentPrice);
        assert_eq!(symbols(&h.app), ["A", "B", "C"]);

        h.app.toggle_sort(Column::CurrentPrice);
        assert_eq!(h.app.sort.direction, SortDirection::None);
        assert_eq!(symbols(&h.app), ["B", "C", "A"]);
    }

    #[test]
    fn sort_action_also_requests_refresh() {
        let mut h = harness();
        h.app.toggle_sort(Column::Symbol);
        assert_eq!(last_seq(&h.commands), Some(1));
        assert!(h.app.awaiting);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut h = harness();
        h.app.request_refresh(RefreshTrigger::Startup); // #1
        h.app.request_refresh(RefreshTrigger::Manual); // #2

        deliver(&mut h.app, 2, vec![quote("NEW", 1.0)]);
        deliver(&mut h.app, 1, vec![quote("OLD", 1.0)]);
        assert_eq!(symbols(&h.app), ["NEW"]);
        assert!(!h.app.awaiting);
    }

    #[test]
    fn failed_refresh_keeps_table_and_logs_error() {
        let mut h = harness();
        h.app.request_refresh(RefreshTrigger::Startup);
        deliver(&mut h.app, 1, vec![quote("A", 1.0)]);
        let updated = h.app.last_updated;

        h.app.request_refresh(RefreshTrigger::Manual);
        h.app.handle_response(WorkerResponse::Quotes {
            seq: 2,
            result: Err(FetchError::Status {
                status: 500,
                message: "boom".into(),
            }),
        });
        assert_eq!(symbols(&h.app), ["A"]);
        assert_eq!(h.app.last_updated, updated);
        assert_eq!(h.app.error_history.len(), 1);
        assert_eq!(h.app.error_history[0].category, "HTTP");
        assert_eq!(h.app.status_message, None);
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut h = harness();
        for i in 0..60 {
            h.app.push_error("ERR", format!("error {i}"), String::new());
        }
        assert_eq!(h.app.error_history.len(), ERROR_HISTORY_CAP);
        assert!(h.app.error_history[0].message.contains("59"));
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let mut h = harness();
        let start = h.start;
        h.app.tick(start + Duration::from_secs(59));
        assert_eq!(last_seq(&h.commands), None);

        h.app.tick(start + Duration::from_secs(60));
        assert_eq!(last_seq(&h.commands), Some(1));

        h.app.tick(start + Duration::from_secs(61));
        assert_eq!(last_seq(&h.commands), None);

        h.app.tick(start + Duration::from_secs(121));
        assert_eq!(last_seq(&h.commands), Some(2));
    }

    #[test]
    fn selection_follows_symbol_across_resort() {
        let mut h = harness();
        h.app.request_refresh(RefreshTrigger::Startup);
        deliver(&mut h.app, 1, vec![quote("A", 1.0), quote("B", 2.0)]);
        h.app.select(0);
        h.app.toggle_sort(Column::CurrentPrice);
        assert_eq!(h.app.selected_row().unwrap().cell(Column::Symbol), "A");
        assert_eq!(h.app.table.selected(), Some(1));
    }

    #[test]
    fn history_for_closed_overlay_is_dropped() {
        let mut h = harness();
        h.app.request_refresh(RefreshTrigger::Startup);
        deliver(&mut h.app, 1, vec![quote("A", 1.0)]);
        h.app.show_history();
        assert!(matches!(
            &h.app.overlay,
            Overlay::History { view: HistoryView::Loading, .. }
        ));

        h.app.overlay = Overlay::None;
        h.app.handle_response(WorkerResponse::History {
            symbol: "A".into(),
            period: Period::SixMonths,
            result: Ok(Vec::new()),
        });
        assert_eq!(h.app.overlay, Overlay::None);
    }

    #[test]
    fn history_period_cycles_and_rerequests() {
        let mut h = harness();
        h.app.request_refresh(RefreshTrigger::Startup);
        deliver(&mut h.app, 1, vec![quote("A", 1.0)]);
        h.app.show_history();
        h.app.cycle_history_period();
        assert_eq!(h.app.history_period, Period::OneYear);

        let periods: Vec<Period> = h
            .commands
            .try_iter()
            .filter_map(|c| match c {
                WorkerCommand::FetchHistory { period, .. } => Some(period),
                _ => None,
            })
            .collect();
        assert_eq!(periods, [Period::SixMonths, Period::OneYear]);
    }

    proptest! {
        #[test]
        fn rows_always_match_snapshot_sorted_by_state(
            prices in prop::collection::vec(0.0..100.0_f64, 0..12),
            clicks in prop::collection::vec(0..Column::COUNT, 0..10),
        ) {
            let mut h = harness();
            let quotes: Vec<Quote> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| quote(&format!("S{i}"), *p))
                .collect();
            h.app.request_refresh(RefreshTrigger::Startup);
            deliver(&mut h.app, 1, quotes);

            for i in clicks {
                h.app.toggle_sort(Column::from_index(i).unwrap());
                let expected = render_rows(&sort_rows(&h.app.snapshot, &h.app.sort), &h.app.base_url);
                prop_assert_eq!(&h.app.rows, &expected);
            }
        }
    }
}
