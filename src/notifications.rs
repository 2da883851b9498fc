/// Phase completion alerts
///
/// Desktop notifications and the audible chime are optional platform
/// capabilities. Both sit behind traits with an explicit availability check so
/// the timer never calls into something that is not there.
use crate::domain::TimerMode;
use crate::settings::Settings;
use crate::timer::PhaseCompletion;
use anyhow::{bail, Context, Result};
use std::io::{IsTerminal, Write};
use std::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet
    Default,
    Granted,
    Denied,
}

pub trait Notifier {
    fn permission(&self) -> Permission;

    /// Resolve the permission if it has not been decided yet
    fn request_permission(&mut self) -> Permission;

    fn send(&self, title: &str, body: &str) -> Result<()>;
}

pub trait Chime {
    fn is_available(&self) -> bool;

    fn play(&self) -> Result<()>;
}

/// Native notifications through the platform's notification command
#[derive(Debug)]
pub struct DesktopNotifier {
    permission: Permission,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            permission: Permission::Default,
        }
    }

    #[cfg(target_os = "macos")]
    fn backend_available() -> bool {
        true
    }

    #[cfg(target_os = "linux")]
    fn backend_available() -> bool {
        std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join("notify-send").is_file()))
            .unwrap_or(false)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    fn backend_available() -> bool {
        false
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        if self.permission == Permission::Default {
            self.permission = if Self::backend_available() {
                Permission::Granted
            } else {
                Permission::Denied
            };
            debug!(permission = ?self.permission, "notification permission resolved");
        }
        self.permission
    }

    fn send(&self, title: &str, body: &str) -> Result<()> {
        if self.permission != Permission::Granted {
            bail!("notification permission not granted");
        }

        #[cfg(target_os = "macos")]
        let output = {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                body.replace('"', "\\\""),
                title.replace('"', "\\\"")
            );
            Command::new("osascript")
                .arg("-e")
                .arg(&script)
                .output()
                .context("Failed to run osascript")?
        };

        #[cfg(not(target_os = "macos"))]
        let output = Command::new("notify-send")
            .arg(title)
            .arg(body)
            .output()
            .context("Failed to run notify-send")?;

        if !output.status.success() {
            bail!("notification command exited with {}", output.status);
        }
        Ok(())
    }
}

/// The terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn is_available(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    fn play(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07").context("Failed to ring bell")?;
        stdout.flush().context("Failed to flush bell")?;
        Ok(())
    }
}

/// How the completion message reached the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Notifications are switched off
    Skipped,
    Desktop,
    /// Shown inside the app instead
    InApp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub chimed: bool,
    pub delivery: Delivery,
    pub celebrate: bool,
}

pub fn completion_message(completion: &PhaseCompletion) -> (&'static str, &'static str) {
    match completion.finished {
        TimerMode::Focus => ("Focus session complete", "Great work! Time for a break."),
        TimerMode::Break => ("Break is over", "Ready to focus again?"),
    }
}

pub struct Alerts {
    notifier: Box<dyn Notifier>,
    chime: Box<dyn Chime>,
}

impl Alerts {
    pub fn new(notifier: Box<dyn Notifier>, chime: Box<dyn Chime>) -> Self {
        Self { notifier, chime }
    }

    /// Platform notifier and terminal bell
    pub fn system() -> Self {
        Self::new(Box::new(DesktopNotifier::new()), Box::new(TerminalBell))
    }

    pub fn permission(&self) -> Permission {
        self.notifier.permission()
    }

    pub fn request_permission(&mut self) -> Permission {
        self.notifier.request_permission()
    }

    /// Fire the side effects of one phase completion
    pub fn on_phase_complete(
        &mut self,
        completion: &PhaseCompletion,
        settings: &Settings,
    ) -> CompletionReport {
        let chimed = settings.sound_enabled && self.ring();
        let delivery = if settings.notifications_enabled {
            self.deliver(completion)
        } else {
            Delivery::Skipped
        };

        CompletionReport {
            chimed,
            delivery,
            celebrate: completion.celebrates(),
        }
    }

    fn ring(&self) -> bool {
        if !self.chime.is_available() {
            debug!("chime unavailable, skipping");
            return false;
        }
        match self.chime.play() {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "chime failed");
                false
            }
        }
    }

    fn deliver(&mut self, completion: &PhaseCompletion) -> Delivery {
        let (title, body) = completion_message(completion);
        let in_app = || Delivery::InApp(format!("{}. {}", title, body));

        if self.notifier.request_permission() != Permission::Granted {
            debug!("notification permission unavailable, showing in-app");
            return in_app();
        }

        match self.notifier.send(title, body) {
            Ok(()) => Delivery::Desktop,
            Err(e) => {
                warn!(error = %e, "desktop notification failed, showing in-app");
                in_app()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeNotifier {
        permission: Permission,
        grant_on_request: bool,
        fail_send: bool,
        sent: Rc<RefCell<Vec<String>>>,
    }

    impl Notifier for FakeNotifier {
        fn permission(&self) -> Permission {
            self.permission
        }

        fn request_permission(&mut self) -> Permission {
            if self.permission == Permission::Default {
                self.permission = if self.grant_on_request {
                    Permission::Granted
                } else {
                    Permission::Denied
                };
            }
            self.permission
        }

        fn send(&self, title: &str, _body: &str) -> Result<()> {
            if self.fail_send {
                bail!("no notification daemon");
            }
            self.sent.borrow_mut().push(title.to_string());
            Ok(())
        }
    }

    struct FakeChime {
        available: bool,
        plays: Rc<RefCell<u32>>,
    }

    impl Chime for FakeChime {
        fn is_available(&self) -> bool {
            self.available
        }

        fn play(&self) -> Result<()> {
            *self.plays.borrow_mut() += 1;
            Ok(())
        }
    }

    struct Recorded {
        sent: Rc<RefCell<Vec<String>>>,
        plays: Rc<RefCell<u32>>,
    }

    fn alerts(grant: bool, fail_send: bool, chime_available: bool) -> (Alerts, Recorded) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let plays = Rc::new(RefCell::new(0));
        let alerts = Alerts::new(
            Box::new(FakeNotifier {
                permission: Permission::Default,
                grant_on_request: grant,
                fail_send,
                sent: sent.clone(),
            }),
            Box::new(FakeChime {
                available: chime_available,
                plays: plays.clone(),
            }),
        );
        (alerts, Recorded { sent, plays })
    }

    fn focus_done() -> PhaseCompletion {
        PhaseCompletion {
            finished: TimerMode::Focus,
            next: TimerMode::Break,
        }
    }

    fn break_done() -> PhaseCompletion {
        PhaseCompletion {
            finished: TimerMode::Break,
            next: TimerMode::Focus,
        }
    }

    #[test]
    fn test_focus_completion_fires_everything() {
        let (mut alerts, recorded) = alerts(true, false, true);
        let report = alerts.on_phase_complete(&focus_done(), &Settings::default());

        assert_eq!(
            report,
            CompletionReport {
                chimed: true,
                delivery: Delivery::Desktop,
                celebrate: true,
            }
        );
        assert_eq!(*recorded.plays.borrow(), 1);
        assert_eq!(*recorded.sent.borrow(), vec!["Focus session complete".to_string()]);
    }

    #[test]
    fn test_break_completion_does_not_celebrate() {
        let (mut alerts, _) = alerts(true, false, true);
        let report = alerts.on_phase_complete(&break_done(), &Settings::default());
        assert!(!report.celebrate);
    }

    #[test]
    fn test_settings_gate_side_effects() {
        let (mut alerts, recorded) = alerts(true, false, true);
        let settings = Settings {
            notifications_enabled: false,
            sound_enabled: false,
            ..Settings::default()
        };
        let report = alerts.on_phase_complete(&focus_done(), &settings);

        assert!(!report.chimed);
        assert_eq!(report.delivery, Delivery::Skipped);
        assert_eq!(*recorded.plays.borrow(), 0);
        assert!(recorded.sent.borrow().is_empty());
        // Not asked while notifications are off
        assert_eq!(alerts.permission(), Permission::Default);
    }

    #[test]
    fn test_denied_permission_falls_back_in_app() {
        let (mut alerts, recorded) = alerts(false, false, true);
        let report = alerts.on_phase_complete(&focus_done(), &Settings::default());

        assert_eq!(
            report.delivery,
            Delivery::InApp("Focus session complete. Great work! Time for a break.".to_string())
        );
        assert!(recorded.sent.borrow().is_empty());
        assert_eq!(alerts.permission(), Permission::Denied);
    }

    #[test]
    fn test_failed_send_falls_back_in_app() {
        let (mut alerts, _) = alerts(true, true, true);
        let report = alerts.on_phase_complete(&break_done(), &Settings::default());
        assert!(matches!(report.delivery, Delivery::InApp(_)));
    }

    #[test]
    fn test_unavailable_chime_is_silent() {
        let (mut alerts, recorded) = alerts(true, false, false);
        let report = alerts.on_phase_complete(&focus_done(), &Settings::default());
        assert!(!report.chimed);
        assert_eq!(*recorded.plays.borrow(), 0);
    }

    #[test]
    fn test_desktop_notifier_refuses_without_permission() {
        let notifier = DesktopNotifier::new();
        assert_eq!(notifier.permission(), Permission::Default);
        assert!(notifier.send("title", "body").is_err());
    }
}
