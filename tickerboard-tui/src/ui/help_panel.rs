//! Help overlay: keyboard and mouse shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Board");
    key(&mut lines, "j / k", "Move row selection down / up");
    key(&mut lines, "g / G", "First / last row");
    key(&mut lines, "h / l", "Move column cursor left / right");
    key(&mut lines, "s / Space", "Sort by cursor column (desc, asc, off)");
    key(&mut lines, "Enter / o", "Open the symbol's detail page");
    key(&mut lines, "c", "Price history chart for the selected row");
    key(&mut lines, "r", "Refresh now");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Mouse");
    key(&mut lines, "click header", "Sort by that column (desc, asc, off)");
    key(&mut lines, "click symbol", "Open the symbol's detail page");
    key(&mut lines, "click row", "Select the row");
    lines.push(Line::from(""));

    section(&mut lines, "History chart");
    key(&mut lines, "p", "Cycle period (1d ... max)");
    key(&mut lines, "Esc / c", "Close");
    lines.push(Line::from(""));

    section(&mut lines, "Colors");
    key(&mut lines, "Chg %", "White at 0, full green at +5%, full red at -5%");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>14}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
