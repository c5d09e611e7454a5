//! Farm task models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Record, RecordId};

/// A scheduled piece of farm work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub due_date: NaiveDate,
    pub priority: Priority,
    /// Weak reference to a crop
    #[serde(default)]
    pub crop_id: Option<RecordId>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record for Task {
    const KIND: &'static str = "Task";

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Watering,
    Fertilizing,
    Harvesting,
    Planting,
    Weeding,
    Inspection,
    Maintenance,
    Other,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Watering => "watering",
            TaskType::Fertilizing => "fertilizing",
            TaskType::Harvesting => "harvesting",
            TaskType::Planting => "planting",
            TaskType::Weeding => "weeding",
            TaskType::Inspection => "inspection",
            TaskType::Maintenance => "maintenance",
            TaskType::Other => "other",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::Watering => write!(f, "Watering"),
            TaskType::Fertilizing => write!(f, "Fertilizing"),
            TaskType::Harvesting => write!(f, "Harvesting"),
            TaskType::Planting => write!(f, "Planting"),
            TaskType::Weeding => write!(f, "Weeding"),
            TaskType::Inspection => write!(f, "Inspection"),
            TaskType::Maintenance => write!(f, "Maintenance"),
            TaskType::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort rank: high 3, medium 2, low 1
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low Priority"),
            Priority::Medium => write!(f, "Medium Priority"),
            Priority::High => write!(f, "High Priority"),
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    pub crop_id: Option<RecordId>,
    #[serde(default)]
    pub completed: bool,
    pub description: Option<String>,
}

impl CreateTaskInput {
    /// Build the stored record. Callers validate first.
    pub fn into_record(self, id: RecordId, today: NaiveDate) -> Task {
        Task {
            id,
            title: self.title,
            task_type: self.task_type.unwrap_or(TaskType::Other),
            due_date: self.due_date.unwrap_or(today),
            priority: self.priority,
            crop_id: self.crop_id,
            completed: self.completed,
            description: self.description,
        }
    }
}

/// Input for updating a task. Omitted fields keep their stored value; an
/// explicit `null` clears `cropId` or `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "crate::types::double_option", skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<Option<RecordId>>,
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "crate::types::double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl UpdateTaskInput {
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(task_type) = self.task_type {
            task.task_type = task_type;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(crop_id) = self.crop_id {
            task.crop_id = crop_id;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
    }
}
