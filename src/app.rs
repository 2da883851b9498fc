use crate::domain::{random_quote, Filter, Quote, Task, ToastKind, UiMode, DEADLINE_FORMAT};
use crate::notifications::{Alerts, Delivery, Permission};
use crate::persistence::{read_import, write_export, SharedStorage};
use crate::report::{achievements, Achievement, TaskStats};
use crate::settings::{parse_break_minutes, parse_focus_minutes, Settings, SettingsStore};
use crate::store::TaskStore;
use crate::timer::FocusTimer;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use uuid::Uuid;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
/// How long the focus-complete celebration is shown
pub const CELEBRATION_DURATION: Duration = Duration::from_secs(3);

/// Add-task form state
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub title: String,
    pub subject: String,
    pub deadline: String,
    pub editing_field: usize, // 0 = title, 1 = subject, 2 = deadline
}

/// Settings form state; durations are kept as typed text until saved
#[derive(Debug, Clone)]
pub struct SettingsFormState {
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
    pub focus_minutes: String,
    pub break_minutes: String,
    pub editing_field: usize, // 0 = notifications, 1 = sound, 2 = focus, 3 = break
}

impl SettingsFormState {
    pub const FIELD_COUNT: usize = 4;

    fn from_settings(settings: Settings) -> Self {
        Self {
            notifications_enabled: settings.notifications_enabled,
            sound_enabled: settings.sound_enabled,
            focus_minutes: settings.focus_minutes.to_string(),
            break_minutes: settings.break_minutes.to_string(),
            editing_field: 0,
        }
    }

    fn to_settings(&self) -> Settings {
        Settings {
            notifications_enabled: self.notifications_enabled,
            sound_enabled: self.sound_enabled,
            focus_minutes: parse_focus_minutes(&self.focus_minutes),
            break_minutes: parse_break_minutes(&self.break_minutes),
        }
    }
}

/// Transient message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// Main application state
pub struct AppState {
    pub tasks: TaskStore<SharedStorage>,
    pub settings: SettingsStore<SharedStorage>,
    settings_changes: Receiver<Settings>,
    pub timer: FocusTimer,
    alerts: Alerts,
    pub filter: Filter,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<TaskFormState>,
    pub settings_form: Option<SettingsFormState>,
    pub import_path: String,
    pub toast: Option<Toast>,
    pub celebrate_until: Option<Instant>,
    pub quote: Quote,
    pub export_dir: PathBuf,
    pub today: NaiveDate,
}

impl AppState {
    pub fn new(storage: SharedStorage, alerts: Alerts, export_dir: PathBuf, today: NaiveDate) -> Self {
        let tasks = TaskStore::load(storage.clone());
        let mut settings = SettingsStore::load(storage);
        let settings_changes = settings.subscribe();
        let timer = FocusTimer::from_settings(&settings.current());

        let mut app = Self {
            tasks,
            settings,
            settings_changes,
            timer,
            alerts,
            filter: Filter::All,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            settings_form: None,
            import_path: String::new(),
            toast: None,
            celebrate_until: None,
            quote: random_quote(),
            export_dir,
            today,
        };

        if app.settings.current().notifications_enabled {
            app.alerts.request_permission();
        }
        app
    }

    /// Tasks shown under the active filter
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.filter(self.filter)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<Uuid> {
        self.selected_task().map(|task| task.id)
    }

    pub fn stats(&self) -> TaskStats {
        self.tasks.stats(self.today)
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        achievements(&self.stats())
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrate_until.is_some()
    }

    pub fn notification_permission(&self) -> Permission {
        self.alerts.permission()
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_tasks().len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.selected_index = 0;
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(TaskFormState {
            title: String::new(),
            subject: String::new(),
            deadline: self.today.format(DEADLINE_FORMAT).to_string(),
            editing_field: 0,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Toggle between editing fields in input form (title -> subject -> deadline)
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 3;
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.push(c),
                1 => form.subject.push(c),
                2 => form.deadline.push(c),
                _ => {}
            }
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => { form.title.pop(); }
                1 => { form.subject.pop(); }
                2 => { form.deadline.pop(); }
                _ => {}
            }
        }
    }

    /// Submit input form. On any error the form stays open for another try.
    pub fn submit_input_form(&mut self, now: Instant) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        match self.tasks.add(&form.title, &form.subject, &form.deadline) {
            Ok(_) => {
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                self.selected_index = 0;
                self.show_toast(ToastKind::Success, "Task added", now);
            }
            Err(e) => {
                if !e.is_validation() {
                    error!(error = %e, "failed to persist new task");
                }
                self.show_toast(ToastKind::Error, e.to_string(), now);
            }
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn toggle_selected(&mut self, now: Instant) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.tasks.toggle(id) {
            error!(error = %e, "failed to persist toggle");
            self.show_toast(ToastKind::Error, e.to_string(), now);
        }
        self.clamp_selection();
    }

    pub fn delete_selected(&mut self, now: Instant) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.tasks.delete(id) {
            Ok(_) => self.show_toast(ToastKind::Info, "Task deleted", now),
            Err(e) => {
                error!(error = %e, "failed to persist delete");
                self.show_toast(ToastKind::Error, e.to_string(), now);
            }
        }
        self.clamp_selection();
    }

    /// Ask for confirmation before clearing everything
    pub fn request_clear_all(&mut self) {
        self.ui_mode = UiMode::ConfirmClear;
    }

    pub fn confirm_clear_all(&mut self, now: Instant) {
        self.ui_mode = UiMode::Normal;
        match self.tasks.clear_all() {
            Ok(()) => {
                self.selected_index = 0;
                self.show_toast(ToastKind::Info, "All tasks cleared", now);
            }
            Err(e) => {
                error!(error = %e, "failed to persist clear");
                self.show_toast(ToastKind::Error, e.to_string(), now);
            }
        }
    }

    /// Close any modal without acting
    pub fn close_modal(&mut self) {
        self.input_form = None;
        self.settings_form = None;
        self.import_path.clear();
        self.ui_mode = UiMode::Normal;
    }

    /// Write the current list to a dated file in the export directory
    pub fn export_tasks(&mut self, now: Instant) {
        let result = self
            .tasks
            .export_snapshot()
            .and_then(|snapshot| write_export(&snapshot, None, &self.export_dir, self.today));

        match result {
            Ok(path) => {
                info!(path = %path.display(), "tasks exported");
                self.show_toast(ToastKind::Success, format!("Exported to {}", path.display()), now);
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.show_toast(ToastKind::Error, format!("Export failed: {}", e), now);
            }
        }
    }

    pub fn start_import(&mut self) {
        self.import_path.clear();
        self.ui_mode = UiMode::ImportPath;
    }

    pub fn import_path_add_char(&mut self, c: char) {
        self.import_path.push(c);
    }

    pub fn import_path_backspace(&mut self) {
        self.import_path.pop();
    }

    /// Replace the task list with the file at the typed path
    pub fn submit_import(&mut self, now: Instant) {
        let path = self.import_path.trim().to_string();
        self.import_path.clear();
        self.ui_mode = UiMode::Normal;
        if path.is_empty() {
            return;
        }

        let payload = match read_import(Path::new(&path)) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "could not read import file");
                self.show_toast(ToastKind::Error, format!("Error importing tasks: {}", e), now);
                return;
            }
        };

        match self.tasks.import_replace(&payload) {
            Ok(count) => {
                self.selected_index = 0;
                self.show_toast(ToastKind::Success, format!("Imported {} tasks", count), now);
            }
            Err(e) if e.is_validation() => {
                warn!(error = %e, "rejected import");
                self.show_toast(ToastKind::Error, format!("Invalid file format: {}", e), now);
            }
            Err(e) => {
                error!(error = %e, "failed to persist import");
                self.show_toast(ToastKind::Error, e.to_string(), now);
            }
        }
    }

    pub fn open_settings(&mut self) {
        self.settings_form = Some(SettingsFormState::from_settings(self.settings.current()));
        self.ui_mode = UiMode::EditingSettings;
    }

    pub fn settings_form_next_field(&mut self) {
        if let Some(form) = &mut self.settings_form {
            form.editing_field = (form.editing_field + 1) % SettingsFormState::FIELD_COUNT;
        }
    }

    /// Flip the flag under the cursor
    pub fn settings_form_toggle(&mut self) {
        if let Some(form) = &mut self.settings_form {
            match form.editing_field {
                0 => form.notifications_enabled = !form.notifications_enabled,
                1 => form.sound_enabled = !form.sound_enabled,
                _ => {}
            }
        }
    }

    /// Duration fields only accept digits
    pub fn settings_form_add_char(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if let Some(form) = &mut self.settings_form {
            match form.editing_field {
                2 => form.focus_minutes.push(c),
                3 => form.break_minutes.push(c),
                _ => {}
            }
        }
    }

    pub fn settings_form_backspace(&mut self) {
        if let Some(form) = &mut self.settings_form {
            match form.editing_field {
                2 => { form.focus_minutes.pop(); }
                3 => { form.break_minutes.pop(); }
                _ => {}
            }
        }
    }

    /// Save the form. The running timer hears about it through the settings bus.
    pub fn submit_settings(&mut self, now: Instant) {
        let Some(form) = self.settings_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        let previous = self.settings.current();
        let settings = form.to_settings();
        if settings.notifications_enabled && !previous.notifications_enabled {
            self.alerts.request_permission();
        }

        match self.settings.update(settings) {
            Ok(()) => self.show_toast(ToastKind::Success, "Settings saved", now),
            Err(e) => {
                error!(error = %e, "failed to persist settings");
                self.show_toast(ToastKind::Error, format!("Settings not saved: {}", e), now);
            }
        }
    }

    pub fn show_achievements(&mut self) {
        self.ui_mode = UiMode::Achievements;
    }

    pub fn toggle_timer(&mut self, now: Instant) {
        self.timer.toggle(now);
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// Advance time-driven state: countdown, settings changes, expiries
    pub fn tick(&mut self, now: Instant, today: NaiveDate) {
        self.today = today;

        for settings in self.settings_changes.try_iter() {
            self.timer.apply_settings(&settings);
        }

        if let Some(completion) = self.timer.pump(now) {
            let report = self
                .alerts
                .on_phase_complete(&completion, &self.settings.current());
            if let Delivery::InApp(message) = report.delivery {
                self.show_toast(ToastKind::Info, message, now);
            }
            if report.celebrate {
                self.celebrate_until = Some(now + CELEBRATION_DURATION);
            }
        }

        if self.toast.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.toast = None;
        }
        if self.celebrate_until.is_some_and(|until| now >= until) {
            self.celebrate_until = None;
        }
    }

    /// Release the countdown schedule before exit
    pub fn shutdown(&mut self) {
        self.timer.shutdown();
    }
}
