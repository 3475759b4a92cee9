//! Bottom status bar: freshness, sort, pending refresh, error count, hints.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Freshness
    match app.last_updated {
        Some(ts) => spans.push(Span::styled(
            format!(" Updated {}", ts.format("%H:%M:%S")),
            theme::text_secondary(),
        )),
        None => spans.push(Span::styled(" Not updated yet", theme::muted())),
    }
    spans.push(Span::styled(format!(" ({} rows)", app.rows.len()), theme::muted()));

    // Sort
    spans.push(Span::raw(" | "));
    match app.sort.active() {
        Some((column, direction)) => spans.push(Span::styled(
            format!("sort {} {}", column.key(), direction.as_str()),
            theme::accent(),
        )),
        None => spans.push(Span::styled("unsorted", theme::muted())),
    }

    if app.awaiting {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("refreshing", theme::neutral()));
    }

    if !app.error_history.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} errors [e]", app.error_history.len()),
            theme::negative(),
        ));
    }

    // Status message
    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    spans.push(Span::styled("  ?:help q:quit", theme::muted()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
