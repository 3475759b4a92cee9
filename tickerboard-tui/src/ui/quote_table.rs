//! The quote board: sortable header, one row per quote.
//!
//! Column rects are computed with the same layout the table uses, so a
//! click can be mapped back to a header or a cell.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use tickerboard_core::{Column, RowView};

use crate::app::{AppState, ClickRegions};
use crate::theme;

const COLUMN_SPACING: u16 = 1;

fn column_width(column: Column) -> u16 {
    match column {
        Column::Number => 4,
        Column::Symbol => 8,
        Column::LongName => 24,
        Column::CurrentPrice => 11,
        Column::DailyChangePercent => 9,
        Column::PreviousClose => 12,
        Column::MarketCap => 11,
        Column::Volume => 14,
        Column::SharesOutstanding => 11,
        Column::DayHigh => 11,
        Column::DayLow => 11,
        Column::TrailingPe => 8,
        Column::DividendYield => 11,
        Column::Sector => 22,
        Column::Weight => 8,
    }
}

fn widths() -> [Constraint; Column::COUNT] {
    Column::ALL.map(|c| Constraint::Length(column_width(c)))
}

/// Per-column rects within `area`, matching how `Table` lays them out.
pub fn column_rects(area: Rect) -> Vec<Rect> {
    Layout::horizontal(widths())
        .flex(Flex::Legacy)
        .spacing(COLUMN_SPACING)
        .split(area)
        .to_vec()
}

fn header_row(app: &AppState) -> Row<'static> {
    let sorted = app.sort.active().map(|(c, _)| c);
    Row::new(Column::ALL.map(|c| {
        let mut style = theme::header(sorted == Some(c));
        if c == app.column_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Cell::from(format!("{}{}", c.label(), app.sort.indicator_for(c))).style(style)
    }))
}

fn body_row(row: &RowView) -> Row<'static> {
    Row::new(Column::ALL.map(|c| {
        let cell = Cell::from(row.cell(c).to_string());
        match c {
            Column::DailyChangePercent => cell.style(theme::change_cell(row.change_color)),
            Column::Symbol if row.detail_url.is_some() => cell.style(theme::link()),
            Column::Number | Column::LongName | Column::Sector => cell.style(theme::text_secondary()),
            _ => cell.style(theme::text()),
        }
    }))
}

pub fn render(f: &mut Frame, area: Rect, app: &mut AppState) {
    let table = Table::new(app.rows.iter().map(body_row), widths())
        .header(header_row(app))
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Legacy)
        .row_highlight_style(theme::selected_row())
        .column_highlight_style(theme::cursor_column());

    app.table.select_column(Some(app.column_cursor.index()));
    f.render_stateful_widget(table, area, &mut app.table);

    app.regions = click_regions(area, app.table.offset(), app.rows.len());

    if app.rows.is_empty() && area.height > 2 {
        let msg = if app.last_updated.is_some() {
            "The quote service returned no rows."
        } else if app.awaiting {
            "Loading quotes..."
        } else {
            "No data yet. Press r to refresh, e to see errors."
        };
        let body = Rect::new(area.x, area.y + 2, area.width, 1);
        f.render_widget(Paragraph::new(Span::styled(msg, theme::muted())), body);
    }
}

/// Header cells, visible rows, and symbol cells for a table drawn in
/// `area` scrolled to `offset`.
pub fn click_regions(area: Rect, offset: usize, row_count: usize) -> ClickRegions {
    let cols = column_rects(area);
    let headers = Column::ALL
        .iter()
        .zip(&cols)
        .filter(|(_, rect)| rect.width > 0)
        .map(|(c, rect)| (Rect::new(rect.x, area.y, rect.width, 1), *c))
        .collect();

    let visible = usize::from(area.height.saturating_sub(1));
    let symbol_col = cols[Column::Symbol.index()];
    let mut rows = Vec::new();
    let mut symbol_cells = Vec::new();
    for (slot, index) in (offset..row_count).take(visible).enumerate() {
        // `slot < visible <= u16::MAX`
        let y = area.y + 1 + slot as u16;
        rows.push((Rect::new(area.x, y, area.width, 1), index));
        if symbol_col.width > 0 {
            symbol_cells.push((Rect::new(symbol_col.x, y, symbol_col.width, 1), index));
        }
    }

    ClickRegions {
        headers,
        rows,
        symbol_cells,
    }
}
