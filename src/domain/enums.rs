/// Task list view filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Filter {
    All,
    Pending,
    Completed,
}

impl Filter {
    /// Display name, as shown on the filter tabs
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    /// Whether a task with the given completion flag passes this filter
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !completed,
            Self::Completed => completed,
        }
    }

    /// Next filter in tab order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Pending, Filter::Completed]
    }
}

/// Pomodoro phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    /// The phase that follows this one
    pub fn other(&self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }

    /// Label shown above the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Deep Focus Mode",
            Self::Break => "Recharge Phase",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Focus => "⚡",
            Self::Break => "☕",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingSettings,
    ConfirmClear,
    ImportPath,
    Achievements,
}

/// Kind of transient message shown in the toast area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        assert!(Filter::All.matches(true));
        assert!(Filter::All.matches(false));
        assert!(Filter::Pending.matches(false));
        assert!(!Filter::Pending.matches(true));
        assert!(Filter::Completed.matches(true));
        assert!(!Filter::Completed.matches(false));
    }

    #[test]
    fn test_filter_next_cycles() {
        assert_eq!(Filter::All.next(), Filter::Pending);
        assert_eq!(Filter::Pending.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn test_timer_mode_other() {
        assert_eq!(TimerMode::Focus.other(), TimerMode::Break);
        assert_eq!(TimerMode::Break.other(), TimerMode::Focus);
    }
}
