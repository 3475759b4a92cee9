//! Background worker. All blocking HTTP happens off the UI thread.
//!
//! The dispatcher thread reads commands from an `mpsc` channel and starts
//! one short-lived fetch thread per request, so a request that never
//! returns does not hold up the ones after it. Every quote response echoes
//! the sequence number of the request that produced it; the UI keeps only
//! the latest.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, info};

use tickerboard_core::data::{HistoryBar, Period};
use tickerboard_core::{FetchError, Quote, QuoteSource};

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    FetchQuotes { seq: u64 },
    FetchHistory { symbol: String, period: Period },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Quotes {
        seq: u64,
        result: Result<Vec<Quote>, FetchError>,
    },
    History {
        symbol: String,
        period: Period,
        result: Result<Vec<HistoryBar>, FetchError>,
    },
}

/// Spawn the dispatcher thread.
pub fn spawn_worker(
    source: Arc<dyn QuoteSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tickerboard-worker".into())
        .spawn(move || worker_loop(source, rx, tx))
}

fn worker_loop(source: Arc<dyn QuoteSource>, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    info!("worker started (source: {})", source.name());
    while let Ok(first) = rx.recv() {
        let mut batch = vec![first];
        batch.extend(rx.try_iter());
        let Some(jobs) = coalesce(batch) else { break };
        for job in jobs {
            dispatch(&source, job, &tx);
        }
    }
    // Fetch threads still running are left to finish; their sends fail
    // quietly once the UI side is gone.
    info!("worker stopped");
}

/// Merge a burst of queued commands. Only the highest quote sequence is
/// kept; history requests pass through in order. `None` on shutdown.
fn coalesce(batch: Vec<WorkerCommand>) -> Option<Vec<WorkerCommand>> {
    let mut jobs = Vec::with_capacity(batch.len());
    let mut latest: Option<u64> = None;
    for cmd in batch {
        match cmd {
            WorkerCommand::Shutdown => return None,
            WorkerCommand::FetchQuotes { seq } => {
                if let Some(prev) = latest.filter(|prev| *prev < seq) {
                    debug!("fetch #{prev} superseded by #{seq} before it started");
                }
                latest = latest.max(Some(seq));
            }
            other => jobs.push(other),
        }
    }
    jobs.extend(latest.map(|seq| WorkerCommand::FetchQuotes { seq }));
    Some(jobs)
}

fn dispatch(source: &Arc<dyn QuoteSource>, cmd: WorkerCommand, tx: &Sender<WorkerResponse>) {
    let name = match &cmd {
        WorkerCommand::FetchQuotes { seq } => format!("tickerboard-fetch-{seq}"),
        WorkerCommand::FetchHistory { symbol, .. } => format!("tickerboard-history-{symbol}"),
        WorkerCommand::Shutdown => return,
    };
    let source = Arc::clone(source);
    let tx = tx.clone();
    let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
        if let Some(resp) = handle_command(source.as_ref(), cmd) {
            // A failed send means the UI side is gone.
            let _ = tx.send(resp);
        }
    });
    if let Err(e) = spawned {
        error!("failed to start {name}: {e}");
    }
}

fn handle_command(source: &dyn QuoteSource, cmd: WorkerCommand) -> Option<WorkerResponse> {
    match cmd {
        WorkerCommand::FetchQuotes { seq } => {
            debug!("fetch #{seq} started");
            let result = source.fetch();
            debug!(
                "fetch #{seq} finished: {}",
                match &result {
                    Ok(rows) => format!("{} rows", rows.len()),
                    Err(e) => e.label().to_string(),
                }
            );
            Some(WorkerResponse::Quotes { seq, result })
        }
        WorkerCommand::FetchHistory { symbol, period } => {
            debug!("history {symbol} ({period}) started");
            let result = source.fetch_history(&symbol, period);
            Some(WorkerResponse::History {
                symbol,
                period,
                result,
            })
        }
        WorkerCommand::Shutdown => None,
    }
}
