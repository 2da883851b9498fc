use crate::app::AppState;
use crate::domain::{Filter, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let now = Instant::now();
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::AddingTask => handle_input_form_mode(app, key, now),
        UiMode::EditingSettings => handle_settings_mode(app, key, now),
        UiMode::ConfirmClear => handle_confirm_clear_mode(app, key, now),
        UiMode::ImportPath => handle_import_path_mode(app, key, now),
        UiMode::Achievements => {
            app.close_modal();
            Ok(false)
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Filter tabs
        KeyCode::Tab | KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Pending),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),

        // Tasks
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Enter | KeyCode::Char('x') => app.toggle_selected(now),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(now),
        KeyCode::Char('C') => app.request_clear_all(),
        KeyCode::Char('e') => app.export_tasks(now),
        KeyCode::Char('i') => app.start_import(),

        // Timer
        KeyCode::Char(' ') => app.toggle_timer(now),
        KeyCode::Char('r') => app.reset_timer(),

        KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char('h') => app.show_achievements(),

        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in input form mode (adding a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(now),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_settings_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_settings(now),
        KeyCode::Esc => app.close_modal(),
        KeyCode::Tab | KeyCode::Down => app.settings_form_next_field(),
        KeyCode::Char(' ') => app.settings_form_toggle(),
        KeyCode::Backspace => app.settings_form_backspace(),
        KeyCode::Char(c) => app.settings_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_clear_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_all(now),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_modal(),
        _ => {}
    }
    Ok(false)
}

fn handle_import_path_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_import(now),
        KeyCode::Esc => app.close_modal(),
        KeyCode::Backspace => app.import_path_backspace(),
        KeyCode::Char(c) => app.import_path_add_char(c),
        _ => {}
    }
    Ok(false)
}
