//! Keyboard and mouse routing
//!
//! Overlays take input first (alert, help, car dialog), then the search box,
//! then global keys, then the current page.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, InputMode, Page};
use crate::core::{Action, Module};
use crate::modules::ViewHandle;
use crate::ui::layout::{rect_contains, rect_inner, UiAreas};
use crate::ui::tabs;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.current_alert().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_alert();
        }
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    if let Some(dialog) = app.car_dialog.as_mut() {
        let action = dialog.handle_key(key);
        app.apply_action(action);
        return;
    }

    match app.input_mode {
        InputMode::Search => handle_search_mode(app, key),
        InputMode::Normal => handle_normal_mode(app, key),
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => app.exit_search(),
        KeyCode::Backspace => {
            app.search.pop();
        }
        KeyCode::Char(ch) => app.search.push(ch),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char('!') => app.show_notifications(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char(ch) if Page::from_shortcut(ch).is_some() => {
            if let Some(page) = Page::from_shortcut(ch) {
                app.set_page(page);
            }
        }
        _ => {
            let action = handle_page_key(app, key);
            app.apply_action(action);
        }
    }
}

fn handle_page_key(app: &mut App, key: KeyEvent) -> Action {
    match app.page {
        Page::Tasks => app.tasks.handle_key(key),
        Page::Calendar => app.calendar.handle_key(key),
        Page::Fleet => match key.code {
            KeyCode::Char('n') => Action::OpenCarDialog,
            _ => Action::None,
        },
        Page::Overview => Action::None,
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, areas: UiAreas) {
    if app.help_open || app.car_dialog.is_some() {
        return;
    }
    let col = mouse.column;
    let row = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.current_alert().is_some() {
                app.dismiss_alert();
                return;
            }
            handle_click(app, areas, col, row);
        }
        MouseEventKind::ScrollUp if app.page == Page::Tasks => app.tasks.select_prev(),
        MouseEventKind::ScrollDown if app.page == Page::Tasks => app.tasks.select_next(),
        _ => {}
    }
}

fn handle_click(app: &mut App, areas: UiAreas, col: u16, row: u16) {
    if rect_contains(areas.toggle, col, row) {
        app.toggle_sidebar();
        return;
    }
    if rect_contains(areas.notify, col, row) {
        app.show_notifications();
        return;
    }
    if rect_contains(areas.search, col, row) {
        app.enter_search();
        return;
    }
    if app.input_mode == InputMode::Search {
        app.exit_search();
    }

    if rect_contains(areas.sidebar, col, row) {
        let inner = rect_inner(areas.sidebar);
        if !rect_contains(inner, col, row) {
            return;
        }
        let idx = (row - inner.y) as usize;
        if let Some(page) = Page::ALL.get(idx).copied() {
            app.set_page(page);
        }
        return;
    }

    match app.page {
        Page::Tasks => {
            if rect_contains(areas.page_tabs, col, row) {
                if let Some(tab) = tabs::tab_at(areas.page_tabs, col) {
                    app.tasks.activate_tab(tab);
                }
                return;
            }
            let inner = rect_inner(areas.content(true));
            if rect_contains(inner, col, row) {
                let index = app.tasks.index_at_row(row - inner.y, inner.height);
                app.tasks.toggle_visible(index);
            }
        }
        Page::Calendar => {
            let inner = rect_inner(areas.content(false));
            if !rect_contains(inner, col, row) {
                return;
            }
            if let Some(event) = app.calendar.event_at_row(row - inner.y, inner.height) {
                app.calendar.start_drag(event);
            }
        }
        Page::Overview | Page::Fleet => {}
    }
}
