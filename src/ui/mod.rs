pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod stats_pane;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use input_form::{render_input_form, render_settings_form};
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_achievements_modal, render_confirm_clear_modal, render_import_modal, render_toast};
use ratatui::Frame;
use stats_pane::render_stats_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);

    render_list_pane(f, app, layout.list_area);
    render_timer_pane(f, app, layout.timer_area);
    render_stats_pane(f, app, layout.stats_area);

    match app.ui_mode {
        UiMode::AddingTask => render_input_form(f, app, size),
        UiMode::EditingSettings => render_settings_form(f, app, size),
        UiMode::ConfirmClear => render_confirm_clear_modal(f, app, size),
        UiMode::ImportPath => render_import_modal(f, app, size),
        UiMode::Achievements => render_achievements_modal(f, app, size),
        UiMode::Normal => {}
    }

    // Toasts sit above everything, including modals
    render_toast(f, app, size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ToastKind;
    use crate::notifications::Alerts;
    use crate::persistence::MemoryStorage;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;
    use std::time::Instant;

    fn create_test_app() -> AppState {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let mut app = AppState::new(
            Rc::new(MemoryStorage::new()),
            Alerts::system(),
            std::env::temp_dir(),
            today,
        );
        app.tasks.add("Read chapter 4", "Biology", "2026-10-20").unwrap();
        app
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_main_screen() {
        let app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Read chapter 4"));
        assert!(text.contains("25:00"));
        assert!(text.contains("Dashboard"));
    }

    #[test]
    fn test_render_every_modal() {
        let mut app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        for mode in [
            UiMode::ConfirmClear,
            UiMode::ImportPath,
            UiMode::Achievements,
        ] {
            app.ui_mode = mode;
            terminal.draw(|f| render(f, &app)).unwrap();
        }

        app.start_add_task();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Add Task"));

        app.close_modal();
        app.open_settings();
        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Settings"));
    }

    #[test]
    fn test_render_toast() {
        let mut app = create_test_app();
        app.show_toast(ToastKind::Success, "Task added", Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(screen_text(&terminal).contains("Task added"));
    }

    #[test]
    fn test_render_tiny_terminal() {
        let app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
