//! Pomodoro focus timer
//!
//! A countdown that alternates between focus and break phases. The timer is
//! running exactly when it owns a `TickSchedule`; pausing, resetting,
//! finishing a phase or shutting down drops the schedule, so no tick can
//! arrive afterwards.

use crate::domain::TimerMode;
use crate::settings::Settings;
use crate::ticker::TickSchedule;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Emitted once per zero crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompletion {
    pub finished: TimerMode,
    pub next: TimerMode,
}

impl PhaseCompletion {
    /// Celebrations only follow a finished focus session
    pub fn celebrates(&self) -> bool {
        self.finished == TimerMode::Focus
    }
}

#[derive(Debug)]
pub struct FocusTimer {
    mode: TimerMode,
    remaining_seconds: u32,
    focus_seconds: u32,
    break_seconds: u32,
    /// New duration for the running phase, applied on reset or completion
    pending_seconds: Option<u32>,
    schedule: Option<TickSchedule>,
}

impl FocusTimer {
    /// Paused at the start of a focus phase
    pub fn new(focus_seconds: u32, break_seconds: u32) -> Self {
        let focus_seconds = focus_seconds.max(1);
        Self {
            mode: TimerMode::Focus,
            remaining_seconds: focus_seconds,
            focus_seconds,
            break_seconds: break_seconds.max(1),
            pending_seconds: None,
            schedule: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.focus_seconds(), settings.break_seconds())
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// Configured length of a phase
    pub fn duration_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_seconds,
            TimerMode::Break => self.break_seconds,
        }
    }

    /// Share of the current phase already elapsed, 0-100
    pub fn progress_percent(&self) -> u16 {
        let total = self.duration_for(self.mode);
        let elapsed = total.saturating_sub(self.remaining_seconds);
        ((elapsed as u64 * 100) / total as u64) as u16
    }

    /// Time left before the next countdown second, None while paused
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.schedule
            .as_ref()
            .map(|schedule| schedule.time_until_next(now))
    }

    /// Begin counting down; the first tick lands one period after `now`
    pub fn start(&mut self, now: Instant) {
        if self.schedule.is_none() {
            self.schedule = Some(TickSchedule::every_second(now));
            debug!(mode = ?self.mode, remaining = self.remaining_seconds, "timer started");
        }
    }

    pub fn pause(&mut self) {
        if self.schedule.take().is_some() {
            debug!(mode = ?self.mode, remaining = self.remaining_seconds, "timer paused");
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// Stop and rewind the current phase to its full duration
    pub fn reset(&mut self) {
        self.schedule = None;
        self.apply_pending(self.mode);
        self.remaining_seconds = self.duration_for(self.mode);
        debug!(mode = ?self.mode, "timer reset");
    }

    /// Release the schedule for good. The timer stays readable.
    pub fn shutdown(&mut self) {
        self.schedule = None;
    }

    /// Advance by one second. Does nothing unless running.
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if self.schedule.is_none() {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        let finished = self.mode;
        let next = finished.other();
        self.schedule = None;
        self.apply_pending(finished);
        self.mode = next;
        self.remaining_seconds = self.duration_for(next);

        info!(finished = ?finished, next = ?next, "phase complete");
        Some(PhaseCompletion { finished, next })
    }

    /// Apply every tick the schedule says is due by `now`.
    /// Stops at a phase completion; later ticks are discarded with the schedule.
    pub fn pump(&mut self, now: Instant) -> Option<PhaseCompletion> {
        let due = match self.schedule.as_mut() {
            Some(schedule) => schedule.take_due(now),
            None => return None,
        };

        for _ in 0..due {
            if let Some(completion) = self.tick() {
                return Some(completion);
            }
        }
        None
    }

    /// Take on new durations. A paused timer re-syncs immediately; a running
    /// phase keeps its length until reset or completion.
    pub fn set_durations(&mut self, focus_seconds: u32, break_seconds: u32) {
        let focus_seconds = focus_seconds.max(1);
        let break_seconds = break_seconds.max(1);
        let (current, other) = match self.mode {
            TimerMode::Focus => (focus_seconds, break_seconds),
            TimerMode::Break => (break_seconds, focus_seconds),
        };

        self.set_duration(self.mode.other(), other);

        if self.is_running() {
            if current != self.duration_for(self.mode) {
                self.pending_seconds = Some(current);
            } else {
                self.pending_seconds = None;
            }
            return;
        }

        self.pending_seconds = None;
        if current != self.duration_for(self.mode) {
            self.set_duration(self.mode, current);
            self.remaining_seconds = current;
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_durations(settings.focus_seconds(), settings.break_seconds());
    }

    fn set_duration(&mut self, mode: TimerMode, seconds: u32) {
        match mode {
            TimerMode::Focus => self.focus_seconds = seconds,
            TimerMode::Break => self.break_seconds = seconds,
        }
    }

    fn apply_pending(&mut self, mode: TimerMode) {
        if let Some(seconds) = self.pending_seconds.take() {
            self.set_duration(mode, seconds);
        }
    }
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
