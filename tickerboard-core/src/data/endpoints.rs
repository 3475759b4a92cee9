//! URL builders for the data source.

use reqwest::Url;

use super::history::Period;

/// `{base}/api/stocks`. Sorting is done locally, so no sort query is sent.
pub fn stocks_url(base_url: &str) -> String {
    join_segments(base_url, &["api", "stocks"], &[])
}

/// `{base}/api/stocks/{symbol}/history?period={period}`
pub fn history_url(base_url: &str, symbol: &str, period: Period) -> String {
    join_segments(
        base_url,
        &["api", "stocks", symbol, "history"],
        &[("period", period.as_str())],
    )
}

/// Per-symbol detail page: `{base}/stocks/{symbol}`.
pub fn detail_url(base_url: &str, symbol: &str) -> String {
    join_segments(base_url, &["stocks", symbol], &[])
}

fn join_segments(base_url: &str, segments: &[&str], query: &[(&str, &str)]) -> String {
    match Url::parse(base_url) {
        Ok(mut url) => {
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
            if !query.is_empty() {
                url.query_pairs_mut().extend_pairs(query);
            }
            url.to_string()
        }
        // Unparseable base: fall back to plain concatenation and let the
        // request itself report the error.
        Err(_) => {
            let mut out = format!("{}/{}", base_url.trim_end_matches('/'), segments.join("/"));
            for (i, (k, v)) in query.iter().enumerate() {
                out.push(if i == 0 { '?' } else { '&' });
                out.push_str(&format!("{k}={v}"));
            }
            out
        }
    }
}
