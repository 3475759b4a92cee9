//! History overlay: closing prices as a line chart.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use tickerboard_core::data::{HistoryBar, Period};

use crate::app::HistoryView;
use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect, symbol: &str, period: Period, view: &HistoryView) {
    let popup = centered_rect(85, 75, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {symbol} | {period} [p]eriod [Esc]close "))
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    match view {
        HistoryView::Loading => message(f, inner, "Loading history...", theme::muted()),
        HistoryView::Failed(err) => message(f, inner, err, theme::negative()),
        HistoryView::Ready(bars) => {
            let points = close_points(bars);
            if points.is_empty() {
                message(f, inner, "No closing prices for this period.", theme::muted());
            } else {
                render_chart(f, inner, symbol, bars, &points);
            }
        }
    }
}

fn message(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let lines = vec![Line::from(""), Line::from(Span::styled(text.to_string(), style))];
    f.render_widget(Paragraph::new(lines), area);
}

/// `(bar index, close)` for every bar that has a close.
pub fn close_points(bars: &[HistoryBar]) -> Vec<(f64, f64)> {
    bars.iter()
        .enumerate()
        .filter_map(|(i, b)| b.close.map(|c| (i as f64, c)))
        .collect()
}

fn date_label(bar: Option<&HistoryBar>) -> String {
    bar.and_then(HistoryBar::day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn render_chart(f: &mut Frame, area: Rect, symbol: &str, bars: &[HistoryBar], points: &[(f64, f64)]) {
    let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let padding = ((max_y - min_y).abs() * 0.05).max(0.01);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = bars.len().saturating_sub(1) as f64;

    let first = points[0].1;
    let last = points[points.len() - 1].1;
    let change = if first != 0.0 { (last / first - 1.0) * 100.0 } else { 0.0 };

    let label = format!("{symbol} {last:.2} ({change:+.2}%)");
    let dataset = Dataset::default()
        .name(label)
        .marker(symbols::Marker::Braille)
        .style(theme::pnl(change))
        .graph_type(GraphType::Line)
        .data(points);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(date_label(bars.first()), theme::muted()),
                    Span::styled(date_label(bars.last()), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Close", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: Option<f64>) -> HistoryBar {
        HistoryBar {
            date: Some(date.into()),
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    #[test]
    fn points_skip_missing_closes_but_keep_positions() {
        let bars = [bar("2024-05-01", Some(1.0)), bar("2024-05-02", None), bar("2024-05-03", Some(3.0))];
        assert_eq!(close_points(&bars), vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn date_labels() {
        assert_eq!(date_label(Some(&bar("2024-05-01T00:00:00-04:00", None))), "2024-05-01");
        assert_eq!(date_label(None), "");
    }
}
