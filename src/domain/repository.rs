use async_trait::async_trait;

use super::task::{CreateTask, Task, TaskId};

#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateTask) -> anyhow::Result<Task>;
    /// All rows, newest first (id descending).
    async fn list(&self) -> anyhow::Result<Vec<Task>>;
    /// Returns false when no row matched; that is not an error.
    async fn set_completed(&self, id: TaskId, completed: bool) -> anyhow::Result<bool>;
    async fn delete(&self, id: TaskId) -> anyhow::Result<bool>;
}
