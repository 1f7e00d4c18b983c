//! Pure derivation of the displayed task list: filter, sort, overdue flag
//! and remaining count, computed fresh from the fetched list on every draw.
//! The current instant is an argument so time-dependent output is testable.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::task::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Pending,
    Completed,
}

impl FilterMode {
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Pending,
            FilterMode::Pending => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Pending => "Pending",
            FilterMode::Completed => "Completed",
        }
    }

    fn keeps(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Pending => !task.completed,
            FilterMode::Completed => task.completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayTask {
    pub task: Task,
    pub overdue: bool,
}

#[derive(Debug, Clone)]
pub struct TaskListView {
    pub tasks: Vec<DisplayTask>,
    /// Incomplete tasks in the whole list, ignoring the active filter.
    pub remaining: usize,
}

pub fn derive(tasks: &[Task], filter: FilterMode, now: DateTime<Utc>) -> TaskListView {
    let remaining = tasks.iter().filter(|t| !t.completed).count();
    let mut kept: Vec<&Task> = tasks.iter().filter(|t| filter.keeps(t)).collect();
    kept.sort_by(|a, b| due_order(a.due_date, b.due_date));
    let tasks = kept
        .into_iter()
        .map(|t| DisplayTask { overdue: is_overdue(t, now), task: t.clone() })
        .collect();
    TaskListView { tasks, remaining }
}

/// Earlier due dates first; a dateless task sorts after any dated one.
/// Two dateless tasks compare Equal so the stable sort keeps their list
/// order.
fn due_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A task is overdue once its due date's midnight lies before `now` and it
/// is still incomplete. Completing a task clears the flag immediately.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed
        && task
            .due_date
            .is_some_and(|d| d.and_time(NaiveTime::MIN).and_utc() < now)
}
