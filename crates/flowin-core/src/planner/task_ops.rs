//! Task operations for the Planner.

use log::{debug, info};

use super::Planner;
use crate::{
    display::Tasks,
    error::Result,
    models::{Task, TaskChanges, TaskFilter, TaskStatus, TaskSummary, User},
    params::{CompleteTask, CreateTask, Id, ListTasks, UpdateTask},
};

impl Planner {
    /// Creates a new pending task.
    pub async fn create_task(&self, user: &User, params: &CreateTask) -> Result<Task> {
        params.validate()?;

        let user_id = user.id;
        let params = params.clone();
        self.with_db(move |db| db.create_task(user_id, &params)).await
    }

    /// Retrieves a task by its ID.
    pub async fn get_task(&self, user: &User, params: &Id) -> Result<Task> {
        let (user_id, task_id) = (user.id, params.id);
        self.with_db(move |db| db.get_task(user_id, task_id)).await
    }

    /// Applies a partial update. Status changes must follow the task
    /// lifecycle.
    pub async fn update_task(&self, user: &User, params: &UpdateTask) -> Result<Task> {
        let changes = TaskChanges::try_from(params)?;
        self.apply_task_changes(user, params.id, changes).await
    }

    /// Moves a pending task to in progress.
    pub async fn start_task(&self, user: &User, params: &Id) -> Result<Task> {
        self.apply_task_changes(user, params.id, TaskChanges::status(TaskStatus::InProgress))
            .await
    }

    /// Completes an in-progress task, optionally recording how long it took.
    pub async fn complete_task(&self, user: &User, params: &CompleteTask) -> Result<Task> {
        self.apply_task_changes(user, params.id, TaskChanges::from(params))
            .await
    }

    async fn apply_task_changes(&self, user: &User, task_id: u64, changes: TaskChanges) -> Result<Task> {
        debug!("Updating task {task_id}: {changes:?}");
        let user_id = user.id;
        let task = self
            .with_db(move |db| db.update_task(user_id, task_id, &changes))
            .await?;

        if task.status == TaskStatus::Completed {
            info!("Task {task_id} completed");
        }
        Ok(task)
    }

    /// Soft-deletes a task by cancelling it.
    pub async fn delete_task(&self, user: &User, params: &Id) -> Result<Task> {
        let (user_id, task_id) = (user.id, params.id);
        let task = self.with_db(move |db| db.cancel_task(user_id, task_id)).await?;
        info!("Task {task_id} cancelled");
        Ok(task)
    }

    /// Lists the user's tasks with filtering, ordering and paging.
    pub async fn list_tasks(&self, user: &User, params: &ListTasks) -> Result<Tasks> {
        params.validate()?;

        let user_id = user.id;
        let filter = TaskFilter::from(params);
        let tasks = self
            .with_db(move |db| db.list_tasks(user_id, &filter))
            .await?;
        Ok(Tasks(tasks))
    }

    /// Counts the user's tasks per status.
    pub async fn task_summary(&self, user: &User) -> Result<TaskSummary> {
        let user_id = user.id;
        self.with_db(move |db| db.task_summary(user_id)).await
    }
}
