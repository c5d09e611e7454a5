//! Dashboard aggregation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{is_this_week, is_today, is_tomorrow, monthly_total, sorted_by};
use crate::models::{CurrentWeather, Crop, Expense, Farm, Task};
use crate::types::RecordId;

pub const UPCOMING_TASK_LIMIT: usize = 5;
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
const RECENT_COMPLETED_TASKS: usize = 3;
const RECENT_EXPENSES: usize = 2;

/// Headline numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_farms: usize,
    pub active_crops: usize,
    pub pending_tasks: usize,
    pub monthly_expenses: Decimal,
}

pub fn dashboard_stats(
    farms: &[Farm],
    crops: &[Crop],
    tasks: &[Task],
    expenses: &[Expense],
    today: NaiveDate,
) -> DashboardStats {
    DashboardStats {
        total_farms: farms.len(),
        active_crops: crops.iter().filter(|c| c.status.is_active()).count(),
        pending_tasks: tasks.iter().filter(|t| !t.completed).count(),
        monthly_expenses: monthly_total(expenses, today),
    }
}

/// Pending tasks due today
pub fn todays_tasks(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| !t.completed && is_today(t.due_date, today))
        .cloned()
        .collect()
}

/// Pending tasks due tomorrow or anywhere in the current week, in stored order.
/// The week includes today and the days before it.
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate, limit: usize) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| !t.completed && (is_tomorrow(t.due_date, today) || is_this_week(t.due_date, today)))
        .take(limit)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Task,
    Expense,
}

/// One line in the recent activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub date: NaiveDate,
}

/// The latest completed tasks and expenses, newest first
pub fn recent_activity(tasks: &[Task], expenses: &[Expense], limit: usize) -> Vec<Activity> {
    let completed: Vec<Task> = tasks.iter().filter(|t| t.completed).cloned().collect();
    let task_items = sorted_by(&completed, |a, b| b.due_date.cmp(&a.due_date))
        .into_iter()
        .take(RECENT_COMPLETED_TASKS)
        .map(|task| Activity {
            id: task.id,
            kind: ActivityKind::Task,
            title: format!("Completed: {}", task.title),
            date: task.due_date,
        });
    let expense_items = sorted_by(expenses, |a, b| b.date.cmp(&a.date))
        .into_iter()
        .take(RECENT_EXPENSES)
        .map(|expense| Activity {
            id: expense.id,
            kind: ActivityKind::Expense,
            title: format!("{}: ${:.2}", expense.category.as_str(), expense.amount),
            date: expense.date,
        });

    let merged: Vec<Activity> = task_items.chain(expense_items).collect();
    let mut feed = sorted_by(&merged, |a, b| b.date.cmp(&a.date));
    feed.truncate(limit);
    feed
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub todays_tasks: Vec<Task>,
    pub upcoming_tasks: Vec<Task>,
    pub recent_activity: Vec<Activity>,
    pub weather: Option<CurrentWeather>,
}

pub fn dashboard_view(
    farms: &[Farm],
    crops: &[Crop],
    tasks: &[Task],
    expenses: &[Expense],
    weather: Option<CurrentWeather>,
    today: NaiveDate,
) -> DashboardView {
    DashboardView {
        stats: dashboard_stats(farms, crops, tasks, expenses, today),
        todays_tasks: todays_tasks(tasks, today),
        upcoming_tasks: upcoming_tasks(tasks, today, UPCOMING_TASK_LIMIT),
        recent_activity: recent_activity(tasks, expenses, RECENT_ACTIVITY_LIMIT),
        weather,
    }
}
