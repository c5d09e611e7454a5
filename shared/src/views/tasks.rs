//! Task list filters, sorts and statistics

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{is_overdue, is_today, is_tomorrow, parse_wire_name, sorted_by, UnknownSelector};
use crate::models::{Priority, Task, TaskType};

/// Which tasks a list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
    /// Pending and due today
    Today,
    /// Pending and due tomorrow
    Tomorrow,
    /// Pending and due before today
    Overdue,
    /// Pending and high priority
    HighPriority,
    Priority(Priority),
    Type(TaskType),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
            TaskFilter::Today => !task.completed && is_today(task.due_date, today),
            TaskFilter::Tomorrow => !task.completed && is_tomorrow(task.due_date, today),
            TaskFilter::Overdue => !task.completed && is_overdue(task.due_date, today),
            TaskFilter::HighPriority => !task.completed && task.priority == Priority::High,
            TaskFilter::Priority(priority) => task.priority == *priority,
            TaskFilter::Type(task_type) => task.task_type == *task_type,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = UnknownSelector;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let filter = match value {
            "all" => TaskFilter::All,
            "pending" => TaskFilter::Pending,
            "completed" => TaskFilter::Completed,
            "today" => TaskFilter::Today,
            "tomorrow" => TaskFilter::Tomorrow,
            "overdue" => TaskFilter::Overdue,
            "high" => TaskFilter::HighPriority,
            other => {
                let parsed = match other.split_once(':') {
                    Some(("priority", p)) => parse_wire_name(p).map(TaskFilter::Priority),
                    Some(("type", t)) => parse_wire_name(t).map(TaskFilter::Type),
                    _ => None,
                };
                return parsed.ok_or_else(|| UnknownSelector::new("task filter", value));
            }
        };
        Ok(filter)
    }
}

impl std::fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskFilter::All => write!(f, "all"),
            TaskFilter::Pending => write!(f, "pending"),
            TaskFilter::Completed => write!(f, "completed"),
            TaskFilter::Today => write!(f, "today"),
            TaskFilter::Tomorrow => write!(f, "tomorrow"),
            TaskFilter::Overdue => write!(f, "overdue"),
            TaskFilter::HighPriority => write!(f, "high"),
            TaskFilter::Priority(p) => write!(f, "priority:{}", p.as_str()),
            TaskFilter::Type(t) => write!(f, "type:{}", t.as_str()),
        }
    }
}

impl TryFrom<String> for TaskFilter {
    type Error = UnknownSelector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskFilter> for String {
    fn from(filter: TaskFilter) -> Self {
        filter.to_string()
    }
}

/// Task list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaskSort {
    /// Earliest due first
    #[default]
    DueDate,
    /// High, then medium, then low
    Priority,
    /// Task type name, A to Z
    Type,
    /// Incomplete first
    Completed,
}

impl FromStr for TaskSort {
    type Err = UnknownSelector;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dueDate" => Ok(TaskSort::DueDate),
            "priority" => Ok(TaskSort::Priority),
            "type" => Ok(TaskSort::Type),
            "completed" => Ok(TaskSort::Completed),
            _ => Err(UnknownSelector::new("task sort", value)),
        }
    }
}

impl std::fmt::Display for TaskSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskSort::DueDate => write!(f, "dueDate"),
            TaskSort::Priority => write!(f, "priority"),
            TaskSort::Type => write!(f, "type"),
            TaskSort::Completed => write!(f, "completed"),
        }
    }
}

impl TryFrom<String> for TaskSort {
    type Error = UnknownSelector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskSort> for String {
    fn from(sort: TaskSort) -> Self {
        sort.to_string()
    }
}

/// Tasks matching `filter`, in their original order
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter, today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task, today))
        .cloned()
        .collect()
}

/// A reordered copy of `tasks`. Equal keys keep their relative order.
pub fn sort_tasks(tasks: &[Task], sort: TaskSort) -> Vec<Task> {
    match sort {
        TaskSort::DueDate => sorted_by(tasks, |a, b| a.due_date.cmp(&b.due_date)),
        TaskSort::Priority => sorted_by(tasks, |a, b| b.priority.rank().cmp(&a.priority.rank())),
        TaskSort::Type => sorted_by(tasks, |a, b| a.task_type.as_str().cmp(b.task_type.as_str())),
        TaskSort::Completed => sorted_by(tasks, |a, b| a.completed.cmp(&b.completed)),
    }
}

/// Counts shown above the task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub today: usize,
}

pub fn task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let count = |filter: TaskFilter| tasks.iter().filter(|t| filter.matches(t, today)).count();
    TaskStats {
        total: tasks.len(),
        completed: count(TaskFilter::Completed),
        pending: count(TaskFilter::Pending),
        overdue: count(TaskFilter::Overdue),
        today: count(TaskFilter::Today),
    }
}

/// Number of tasks per priority, high first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

pub fn task_priority_counts(tasks: &[Task]) -> Vec<PriorityCount> {
    [Priority::High, Priority::Medium, Priority::Low]
        .into_iter()
        .map(|priority| PriorityCount {
            priority,
            count: tasks.iter().filter(|t| t.priority == priority).count(),
        })
        .collect()
}

/// A filtered, sorted task list with the numbers around it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub filter: TaskFilter,
    pub sort: TaskSort,
    pub tasks: Vec<Task>,
    /// Tasks in the collection before filtering
    pub total: usize,
    pub stats: TaskStats,
    pub priority_counts: Vec<PriorityCount>,
}

pub fn task_view(tasks: &[Task], filter: TaskFilter, sort: TaskSort, today: NaiveDate) -> TaskView {
    let filtered = filter_tasks(tasks, filter, today);
    TaskView {
        filter,
        sort,
        tasks: sort_tasks(&filtered, sort),
        total: tasks.len(),
        stats: task_stats(tasks, today),
        priority_counts: task_priority_counts(tasks),
    }
}
