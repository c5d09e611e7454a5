//! Task management service

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    task_view, validate_task, validate_task_form, CreateTaskInput, RecordId, Task, TaskFilter,
    TaskSort, TaskView, UpdateTaskInput,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Task service for scheduling farm work
#[derive(Clone)]
pub struct TaskService {
    store: Arc<Store>,
}

impl TaskService {
    /// Create a new TaskService instance
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Filtered and sorted task list with counts over every task
    pub async fn get_task_view(
        &self,
        filter: TaskFilter,
        sort: TaskSort,
        today: NaiveDate,
    ) -> AppResult<TaskView> {
        let tasks = self.store.tasks.get_all().await;
        Ok(task_view(&tasks, filter, sort, today))
    }

    pub async fn get_task(&self, task_id: RecordId) -> AppResult<Task> {
        Ok(self.store.tasks.get_by_id(task_id).await?)
    }

    pub async fn create_task(&self, input: CreateTaskInput, today: NaiveDate) -> AppResult<Task> {
        validate_task_form(&input).into_result()?;

        let task = self.store.tasks.create(|id| input.into_record(id, today)).await?;
        tracing::info!(task_id = task.id, due = %task.due_date, "Task scheduled");
        Ok(task)
    }

    pub async fn update_task(&self, task_id: RecordId, input: UpdateTaskInput) -> AppResult<Task> {
        self.store
            .tasks
            .update(task_id, |task| {
                input.apply_to(task);
                validate_task(task).into_result().map_err(AppError::from)
            })
            .await
    }

    /// Flip the completed flag and return the task as stored
    pub async fn toggle_completed(&self, task_id: RecordId) -> AppResult<Task> {
        let task = self
            .store
            .tasks
            .update(task_id, |task| {
                task.completed = !task.completed;
                Ok::<_, AppError>(())
            })
            .await?;
        tracing::info!(task_id, completed = task.completed, "Task toggled");
        Ok(task)
    }

    pub async fn delete_task(&self, task_id: RecordId) -> AppResult<()> {
        self.store.tasks.delete(task_id).await?;
        tracing::info!(task_id, "Task deleted");
        Ok(())
    }
}
