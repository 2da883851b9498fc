use crate::domain::Task;
use chrono::NaiveDate;

/// Dashboard statistics derived from the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Rounded percentage of completed tasks, 0 for an empty list
    pub completion_rate: u32,
    pub due_today: usize,
    pub due_today_completed: usize,
}

impl TaskStats {
    pub fn productivity(&self) -> Productivity {
        Productivity::from_rate(self.completion_rate)
    }
}

/// Coarse label for the completion rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Productivity {
    Normal,
    Good,
    Elite,
}

impl Productivity {
    pub fn from_rate(rate: u32) -> Self {
        if rate > 75 {
            Self::Elite
        } else if rate > 40 {
            Self::Good
        } else {
            Self::Normal
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Good => "Good",
            Self::Elite => "Elite",
        }
    }
}

/// Calculate dashboard statistics for the given day
pub fn calculate_task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let due_today: Vec<&Task> = tasks.iter().filter(|t| t.is_due_on(today)).collect();
    let due_today_completed = due_today.iter().filter(|t| t.completed).count();

    TaskStats {
        total,
        completed,
        pending: total - completed,
        completion_rate: completion_rate(completed, total),
        due_today: due_today.len(),
        due_today_completed,
    }
}

/// round(completed / total * 100), 0 when total is 0
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// A milestone unlocked by creating or completing tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

/// Achievement list, in display order
pub fn achievements(stats: &TaskStats) -> Vec<Achievement> {
    vec![
        milestone("First Steps", "Create your first task", stats.total >= 1),
        milestone("Task Master", "Complete 5 tasks", stats.completed >= 5),
        milestone("Productivity Pro", "Complete 10 tasks", stats.completed >= 10),
        milestone("Focus Champion", "Create 10 tasks", stats.total >= 10),
        milestone("Elite Scholar", "Complete 20 tasks", stats.completed >= 20),
        milestone("Legendary", "Complete 50 tasks", stats.completed >= 50),
    ]
}

fn milestone(title: &'static str, description: &'static str, unlocked: bool) -> Achievement {
    Achievement {
        title,
        description,
        unlocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn create_test_task(deadline: &str, completed: bool) -> Task {
        let mut task = Task::new("Task", "Subject", deadline).unwrap();
        task.completed = completed;
        task
    }

    #[test]
    fn test_empty_list_stats() {
        let stats = calculate_task_stats(&[], today());
        assert_eq!(
            stats,
            TaskStats {
                total: 0,
                completed: 0,
                pending: 0,
                completion_rate: 0,
                due_today: 0,
                due_today_completed: 0,
            }
        );
        assert_eq!(stats.productivity(), Productivity::Normal);
    }

    #[test]
    fn test_one_of_three_completed() {
        let tasks = vec![
            create_test_task("2026-10-18", true),
            create_test_task("2026-10-18", false),
            create_test_task("2026-10-25", false),
        ];
        let stats = calculate_task_stats(&tasks, today());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.completion_rate, 33);
        assert_eq!(stats.due_today, 2);
        assert_eq!(stats.due_today_completed, 1);
    }

    #[test]
    fn test_completion_rate_rounds() {
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 8), 13);
        assert_eq!(completion_rate(4, 4), 100);
        assert_eq!(completion_rate(0, 0), 0);
    }

    #[test]
    fn test_productivity_thresholds() {
        assert_eq!(Productivity::from_rate(40), Productivity::Normal);
        assert_eq!(Productivity::from_rate(41), Productivity::Good);
        assert_eq!(Productivity::from_rate(75), Productivity::Good);
        assert_eq!(Productivity::from_rate(76), Productivity::Elite);
    }

    #[test]
    fn test_achievements_unlock() {
        let tasks: Vec<Task> = (0..12)
            .map(|i| create_test_task("2026-10-20", i < 6))
            .collect();
        let stats = calculate_task_stats(&tasks, today());
        let unlocked: Vec<&str> = achievements(&stats)
            .into_iter()
            .filter(|a| a.unlocked)
            .map(|a| a.title)
            .collect();

        assert_eq!(unlocked, vec!["First Steps", "Task Master", "Focus Champion"]);
    }
}
