//! Error history overlay.
//!
//! One entry per failed request, newest first: a header line with the time,
//! the failure tag, and the request that failed, then the message.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, ErrorRecord, ERROR_HISTORY_CAP};
use crate::theme;
use crate::ui::centered_rect;

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Failed requests {}/{ERROR_HISTORY_CAP} ",
            app.error_history.len()
        ))
        .title_style(theme::negative());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let [body, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(Span::styled("j/k scroll   Esc close", theme::muted())),
        footer,
    );

    if app.error_history.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("Every request so far has succeeded.", theme::muted())),
            body,
        );
        return;
    }

    let lines: Vec<Line> = app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .flat_map(|(i, err)| entry_lines(err, i == app.error_scroll))
        .take(usize::from(body.height))
        .collect();
    f.render_widget(Paragraph::new(lines), body);
}

fn entry_lines(err: &ErrorRecord, focused: bool) -> [Line<'_>; 2] {
    let marker = if focused { "> " } else { "  " };
    let request = if err.context.is_empty() {
        "-"
    } else {
        err.context.as_str()
    };
    let message_style = if focused {
        theme::negative().add_modifier(Modifier::BOLD)
    } else {
        theme::text_secondary()
    };
    [
        Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(err.timestamp.format("%H:%M:%S ").to_string(), theme::muted()),
            Span::styled(format!("{:<5}", err.category), theme::warning()),
            Span::styled(request, theme::link()),
        ]),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(err.message.as_str(), message_style),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn record(context: &str) -> ErrorRecord {
        ErrorRecord {
            timestamp: Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap(),
            category: "HTTP",
            message: "HTTP 500: upstream down".into(),
            context: context.into(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn header_names_the_failed_request() {
        let err = record("GET /api/stocks");
        let [header, message] = entry_lines(&err, true);
        assert_eq!(text(&header), "> 09:30:05 HTTP GET /api/stocks");
        assert_eq!(text(&message), "    HTTP 500: upstream down");
    }

    #[test]
    fn missing_context_shows_a_dash() {
        let err = record("");
        let [header, _] = entry_lines(&err, false);
        assert_eq!(text(&header), "  09:30:05 HTTP -");
    }
}
