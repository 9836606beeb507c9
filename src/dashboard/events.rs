use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, InputMode};
use crate::form::FormField;

pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal(key, app),
        InputMode::Search => handle_search(key, app),
        InputMode::Form => handle_form(key, app),
    }
}

fn handle_normal(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.start_search();
        }
        KeyCode::Esc => {
            app.clear_query();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.previous_category();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.next_category();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.previous_widget();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.next_widget();
        }
        KeyCode::Char('a') => {
            app.open_form();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.remove_selected_widget();
        }
        KeyCode::Char('w') => {
            app.toggle_catalog();
        }
        KeyCode::Tab if app.catalog_open => {
            app.next_catalog_tab();
        }
        _ => {}
    }
}

fn handle_search(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => {
            app.clear_query();
            app.finish_search();
        }
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Char(c) => app.push_query_char(c),
        _ => {}
    }
}

fn handle_form(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(Utc::now()),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_previous(),
        KeyCode::Left | KeyCode::Right if app.form.focus == FormField::ChartType => {
            app.form.cycle_chart_type();
        }
        KeyCode::Backspace => app.form.delete_char(),
        KeyCode::Char(c) => app.form.insert_char(c),
        _ => {}
    }
}
