use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};

use crate::domain::{
    repository::TaskRepository,
    task::{CreateTask, Priority, Task, TaskId},
};

#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTaskRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // Each `:memory:` connection is its own database, so those URLs must
        // not be spread across a pool.
        let max_connections = if database_url.starts_with("sqlite::memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todo (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                priority TEXT NOT NULL DEFAULT 'medium',
                due_date TEXT
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, input: CreateTask) -> Result<Task> {
        let result = sqlx::query(
            "INSERT INTO todo (title, completed, priority, due_date) VALUES (?1, 0, ?2, ?3)",
        )
        .bind(&input.title)
        .bind(input.priority.as_str())
        .bind(input.due_date)
        .execute(&*self.pool)
        .await?;
        Ok(Task {
            id: TaskId(result.last_insert_rowid()),
            title: input.title,
            completed: false,
            priority: input.priority,
            due_date: input.due_date,
        })
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query(
            "SELECT id, title, completed, priority, due_date FROM todo ORDER BY id DESC",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows.into_iter().map(row_to_task).collect())
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE todo SET completed = ?1 WHERE id = ?2")
            .bind(completed)
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TaskId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_task(row: SqliteRow) -> Task {
    let priority: String = row.get("priority");
    let due_date: Option<NaiveDate> = row.get("due_date");
    Task {
        id: TaskId(row.get("id")),
        title: row.get("title"),
        completed: row.get("completed"),
        priority: Priority::from_db(&priority),
        due_date,
    }
}

/// Ensure a file-backed SQLite URL points at something sqlx can open.
pub fn prepare_sqlite_file(database_url: &str) -> Result<()> {
    if database_url.starts_with("sqlite::memory:") {
        return Ok(());
    }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        // On Windows, absolute paths may look like /C:/path; strip the leading slash
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
            &path[1..]
        } else {
            path
        };
        use std::{fs, fs::OpenOptions, path::Path};
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !p.exists() {
            let _ = OpenOptions::new().create(true).append(true).open(p)?;
        }
    }
    Ok(())
}
