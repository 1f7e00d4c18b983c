#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::{Arc, Mutex};

    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::super::task_service::{TaskService, TaskServiceImpl};
    use crate::domain::{
        repository::TaskRepository,
        task::{CreateTask, Priority, Task, TaskId},
    };

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        next_id: Arc<AtomicI64>,
        items: Arc<Mutex<BTreeMap<i64, Task>>>,
    }

    #[async_trait]
    impl TaskRepository for InMemoryRepo {
        async fn init(&self) -> Result<()> { Ok(()) }
        async fn create(&self, input: CreateTask) -> Result<Task> {
            // Monotonic counter; ids are never reused even after deletes.
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let task = Task {
                id: TaskId(id),
                title: input.title,
                completed: false,
                priority: input.priority,
                due_date: input.due_date,
            };
            self.items.lock().unwrap().insert(id, task.clone());
            Ok(task)
        }
        async fn list(&self) -> Result<Vec<Task>> {
            Ok(self.items.lock().unwrap().values().rev().cloned().collect())
        }
        async fn set_completed(&self, id: TaskId, completed: bool) -> Result<bool> {
            let mut map = self.items.lock().unwrap();
            match map.get_mut(&id.0) {
                Some(task) => {
                    task.completed = completed;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        async fn delete(&self, id: TaskId) -> Result<bool> {
            Ok(self.items.lock().unwrap().remove(&id.0).is_some())
        }
    }

    fn service() -> TaskServiceImpl<InMemoryRepo> {
        TaskServiceImpl::new(InMemoryRepo::default())
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let service = service();
        let created = service
            .create(CreateTask { title: "Buy milk".into(), priority: Priority::default(), due_date: None })
            .await
            .unwrap();
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.priority, Priority::Medium);
        assert!(!created.completed);
        assert!(created.due_date.is_none());
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let service = service();
        let first = service.create(CreateTask { title: "a".into(), priority: Priority::Low, due_date: None }).await.unwrap();
        let second = service.create(CreateTask { title: "b".into(), priority: Priority::High, due_date: None }).await.unwrap();
        assert!(second.id > first.id);
        let listed = service.list().await.unwrap();
        assert_eq!(listed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn toggling_twice_restores_original_state() {
        let service = service();
        let created = service.create(CreateTask { title: "x".into(), priority: Priority::Medium, due_date: None }).await.unwrap();
        assert!(service.set_completed(created.id, true).await.unwrap());
        assert!(service.set_completed(created.id, false).await.unwrap());
        let listed = service.list().await.unwrap();
        assert!(!listed[0].completed);
    }

    #[tokio::test]
    async fn mutations_on_missing_id_are_noops() {
        let service = service();
        assert!(!service.set_completed(TaskId(42), true).await.unwrap());
        assert!(!service.delete(TaskId(42)).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_only_the_target_row() {
        let service = service();
        let keep = service
            .create(CreateTask {
                title: "keep".into(),
                priority: Priority::High,
                due_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            })
            .await
            .unwrap();
        let gone = service.create(CreateTask { title: "gone".into(), priority: Priority::Medium, due_date: None }).await.unwrap();
        assert!(service.delete(gone.id).await.unwrap());
        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
        assert_eq!(listed[0].due_date, NaiveDate::from_ymd_opt(2030, 1, 1));
    }
}
