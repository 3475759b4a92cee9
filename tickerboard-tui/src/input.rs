//! Keyboard and mouse dispatch: overlays first, then board keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::app::{AppState, Overlay, RefreshTrigger};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::History { .. } => {
            handle_history_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Board keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('h') | KeyCode::Left => app.cursor_left(),
        KeyCode::Char('l') | KeyCode::Right => app.cursor_right(),
        KeyCode::Char('s') | KeyCode::Char(' ') => {
            let column = app.column_cursor;
            app.toggle_sort(column);
        }
        KeyCode::Enter | KeyCode::Char('o') => app.open_selected_link(),
        KeyCode::Char('c') => app.show_history(),
        KeyCode::Char('r') => {
            app.request_refresh(RefreshTrigger::Manual);
            app.set_status("Refreshing...");
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_history_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('p') => app.cycle_history_period(),
        _ => {}
    }
}

fn hit(rect: Rect, x: u16, y: u16) -> bool {
    rect.contains(Position { x, y })
}

/// Left clicks only. Header cells toggle sort, symbol cells open the
/// detail link, any other row cell selects the row. A click anywhere
/// closes an open overlay.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    let (x, y) = (mouse.column, mouse.row);

    if app.overlay != Overlay::None {
        app.overlay = Overlay::None;
        return;
    }

    let header = app
        .regions
        .headers
        .iter()
        .find(|(rect, _)| hit(*rect, x, y))
        .map(|(_, column)| *column);
    if let Some(column) = header {
        app.toggle_sort(column);
        return;
    }

    let symbol_cell = app
        .regions
        .symbol_cells
        .iter()
        .find(|(rect, _)| hit(*rect, x, y))
        .map(|(_, index)| *index);
    if let Some(index) = symbol_cell {
        app.select(index);
        app.open_link(index);
        return;
    }

    let row = app
        .regions
        .rows
        .iter()
        .find(|(rect, _)| hit(*rect, x, y))
        .map(|(_, index)| *index);
    if let Some(index) = row {
        app.select(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyModifiers, MouseEvent};
    use tickerboard_core::data::Period;
    use tickerboard_core::{Column, Quote, SortDirection};

    use crate::worker::WorkerResponse;

    fn app() -> (AppState, mpsc::Receiver<crate::worker::WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel::<WorkerResponse>();
        let app = AppState::new(
            cmd_tx,
            resp_rx,
            "http://127.0.0.1:5000",
            Duration::from_secs(60),
            Period::SixMonths,
            Instant::now(),
        );
        (app, cmd_rx)
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut AppState, x: u16, y: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: x,
                row: y,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn loaded() -> (AppState, mpsc::Receiver<crate::worker::WorkerCommand>) {
        let (mut app, rx) = app();
        app.request_refresh(RefreshTrigger::Startup);
        app.handle_response(WorkerResponse::Quotes {
            seq: 1,
            result: Ok(vec![
                Quote {
                    current_price: Some(1.0),
                    ..Default::default()
                },
                Quote {
                    current_price: Some(2.0),
                    ..Default::default()
                },
            ]),
        });
        (app, rx)
    }

    #[test]
    fn quit_key() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn sort_key_uses_column_cursor() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.column_cursor, Column::LongName);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.sort.column, Some(Column::LongName));
        assert_eq!(app.sort.direction, SortDirection::Descending);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn help_overlay_closes_on_any_key() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn header_click_toggles_sort() {
        let (mut app, _rx) = loaded();
        app.regions.headers = vec![
            (Rect::new(0, 1, 4, 1), Column::Number),
            (Rect::new(5, 1, 10, 1), Column::CurrentPrice),
        ];
        click(&mut app, 7, 1);
        assert_eq!(app.sort.column, Some(Column::CurrentPrice));
        assert_eq!(app.rows[0].cell(Column::CurrentPrice), "$2.00");
        click(&mut app, 7, 1);
        assert_eq!(app.rows[0].cell(Column::CurrentPrice), "$1.00");
    }

    #[test]
    fn row_click_selects_and_misses_are_ignored() {
        let (mut app, _rx) = loaded();
        app.regions.rows = vec![(Rect::new(0, 2, 80, 1), 0), (Rect::new(0, 3, 80, 1), 1)];
        click(&mut app, 40, 3);
        assert_eq!(app.table.selected(), Some(1));
        click(&mut app, 40, 20);
        assert_eq!(app.table.selected(), Some(1));
        assert_eq!(app.sort.direction, SortDirection::None);
    }

    #[test]
    fn refresh_key_sends_fetch() {
        let (mut app, rx) = app();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(
            rx.try_recv().unwrap(),
            crate::worker::WorkerCommand::FetchQuotes { seq: 1 }
        );
    }
}
