use anyhow::Result;

use crate::domain::task::{CreateTask, Task, UpdateTask};

/// Thin REST client over the task service. Callers that want the original
/// fire-and-forget behavior ignore the returned error and keep their last
/// known list.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        let tasks = self
            .http
            .get(self.url("/todo"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(tasks)
    }

    pub async fn create(&self, input: &CreateTask) -> Result<Task> {
        let task = self
            .http
            .post(self.url("/todo"))
            .json(input)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(task)
    }

    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<()> {
        self.http
            .put(self.url(&format!("/todo/{id}")))
            .json(&UpdateTask { completed })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http
            .delete(self.url(&format!("/todo/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
