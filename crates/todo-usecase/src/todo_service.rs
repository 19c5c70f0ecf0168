//! TodoService - The business rules of the todo service
//!
//! The service sits between the HTTP controller and the repository port:
//!
//! ```text
//! handler ──▶ TodoService ──▶ TodoRepository (memory | postgres)
//!               │
//!               └──▶ IdGenerator
//! ```
//!
//! Every mutation is read-modify-write at this layer. Two concurrent
//! updates of the same todo race and the later `save` wins; there is no
//! version token.

use todo_domain::{IdGenerator, RequestContext, Todo, TodoId, TodoRepository};

use crate::error::{ServiceError, ServiceResult};

/// Application service for todos
///
/// Generic over the repository and id generator so the concrete backend
/// is picked at composition time, never in here.
#[derive(Debug)]
pub struct TodoService<R, G> {
    repository: R,
    ids: G,
}

impl<R, G> TodoService<R, G>
where
    R: TodoRepository,
    G: IdGenerator,
{
    pub fn new(repository: R, ids: G) -> Self {
        Self { repository, ids }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a new, not yet completed todo
    pub async fn create(&self, ctx: &RequestContext, title: &str) -> ServiceResult<Todo> {
        ensure_title(title)?;

        let todo = Todo::new(self.ids.generate(), title);
        self.repository.save(ctx, &todo).await?;

        tracing::debug!(todo_id = %todo.id(), "todo created");
        Ok(todo)
    }

    pub async fn get(&self, ctx: &RequestContext, id: &TodoId) -> ServiceResult<Todo> {
        Ok(self.repository.find_by_id(ctx, id).await?)
    }

    /// All todos, unfiltered and in no particular order
    pub async fn list(&self, ctx: &RequestContext) -> ServiceResult<Vec<Todo>> {
        Ok(self.repository.find_all(ctx).await?)
    }

    /// Replace the title of an existing todo
    ///
    /// The lookup happens first, so an unknown id reports `NotFound`
    /// even when the new title is also invalid.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &TodoId,
        title: &str,
    ) -> ServiceResult<Todo> {
        let mut todo = self.repository.find_by_id(ctx, id).await?;
        ensure_title(title)?;

        todo.rename(title);
        self.repository.save(ctx, &todo).await?;

        tracing::debug!(todo_id = %todo.id(), "todo renamed");
        Ok(todo)
    }

    pub async fn set_completed(
        &self,
        ctx: &RequestContext,
        id: &TodoId,
        completed: bool,
    ) -> ServiceResult<Todo> {
        let mut todo = self.repository.find_by_id(ctx, id).await?;

        todo.set_completed(completed);
        self.repository.save(ctx, &todo).await?;

        tracing::debug!(todo_id = %todo.id(), completed, "todo completion changed");
        Ok(todo)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &TodoId) -> ServiceResult<()> {
        self.repository.delete(ctx, id).await?;

        tracing::debug!(todo_id = %id, "todo deleted");
        Ok(())
    }
}

fn ensure_title(title: &str) -> ServiceResult<()> {
    if title.is_empty() {
        return Err(ServiceError::validation("title cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use todo_domain::RepositoryError;
    use tokio::sync::Barrier;

    // ============== Test doubles ==============

    struct SequentialIds(AtomicU64);

    impl SequentialIds {
        fn new() -> Self {
            Self(AtomicU64::new(1))
        }
    }

    impl IdGenerator for SequentialIds {
        fn generate(&self) -> TodoId {
            TodoId::new(format!("t-{:03}", self.0.fetch_add(1, Ordering::SeqCst)))
        }
    }

    /// HashMap repository with switchable failures
    #[derive(Default)]
    struct MockRepository {
        todos: Mutex<HashMap<String, Todo>>,
        save_error: Mutex<Option<RepositoryError>>,
        find_all_error: Mutex<Option<RepositoryError>>,
        /// When set, every lookup waits here before returning
        find_gate: Option<Arc<Barrier>>,
    }

    impl MockRepository {
        fn fail_saves(&self, error: RepositoryError) {
            *self.save_error.lock().unwrap() = Some(error);
        }

        fn fail_find_all(&self, error: RepositoryError) {
            *self.find_all_error.lock().unwrap() = Some(error);
        }

        fn stored(&self, id: &TodoId) -> Option<Todo> {
            self.todos.lock().unwrap().get(id.as_str()).cloned()
        }

        fn len(&self) -> usize {
            self.todos.lock().unwrap().len()
        }
    }

    impl TodoRepository for MockRepository {
        async fn save(&self, _ctx: &RequestContext, todo: &Todo) -> Result<(), RepositoryError> {
            if let Some(error) = self.save_error.lock().unwrap().clone() {
                return Err(error);
            }
            self.todos
                .lock()
                .unwrap()
                .insert(todo.id().as_str().to_string(), todo.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            _ctx: &RequestContext,
            id: &TodoId,
        ) -> Result<Todo, RepositoryError> {
            let found = self.stored(id);
            if let Some(gate) = &self.find_gate {
                gate.wait().await;
            }
            found.ok_or_else(|| RepositoryError::not_found(id))
        }

        async fn find_all(&self, _ctx: &RequestContext) -> Result<Vec<Todo>, RepositoryError> {
            if let Some(error) = self.find_all_error.lock().unwrap().clone() {
                return Err(error);
            }
            Ok(self.todos.lock().unwrap().values().cloned().collect())
        }

        async fn delete(&self, _ctx: &RequestContext, id: &TodoId) -> Result<(), RepositoryError> {
            self.todos
                .lock()
                .unwrap()
                .remove(id.as_str())
                .map(|_| ())
                .ok_or_else(|| RepositoryError::not_found(id))
        }
    }

    fn service() -> TodoService<MockRepository, SequentialIds> {
        TodoService::new(MockRepository::default(), SequentialIds::new())
    }

    fn ctx() -> RequestContext {
        RequestContext::background()
    }

    // ============== Create ==============

    #[tokio::test]
    async fn test_create_returns_fresh_incomplete_todo() {
        let service = service();

        let created = service.create(&ctx(), "Test Todo").await.unwrap();

        assert_eq!(created.title(), "Test Todo");
        assert!(!created.completed());
        assert!(!created.id().as_str().is_empty());
        assert_eq!(service.repository().stored(created.id()), Some(created));
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let service = service();

        let first = service.create(&ctx(), "First").await.unwrap();
        let second = service.create(&ctx(), "Second").await.unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title_before_saving() {
        let service = service();

        let error = service.create(&ctx(), "").await.unwrap_err();

        assert!(error.is_validation());
        assert_eq!(service.repository().len(), 0);
    }

    #[tokio::test]
    async fn test_create_propagates_repository_error() {
        let service = service();
        service
            .repository()
            .fail_saves(RepositoryError::backend("disk full"));

        let error = service.create(&ctx(), "Another Todo").await.unwrap_err();

        assert_eq!(
            error,
            ServiceError::Repository(RepositoryError::backend("disk full"))
        );
    }

    // ============== Get / List ==============

    #[tokio::test]
    async fn test_get_returns_what_create_returned() {
        let service = service();
        let created = service.create(&ctx(), "My Todo").await.unwrap();

        let found = service.get(&ctx(), created.id()).await.unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = service();

        let error = service
            .get(&ctx(), &TodoId::new("non-existent-id"))
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    #[tokio::test]
    async fn test_list_returns_every_created_todo(#[case] count: usize) {
        let service = service();
        let mut created = Vec::new();
        for n in 0..count {
            created.push(service.create(&ctx(), &format!("todo {n}")).await.unwrap());
        }

        let mut listed = service.list(&ctx()).await.unwrap();

        listed.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        created.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn test_list_propagates_repository_error() {
        let service = service();
        service
            .repository()
            .fail_find_all(RepositoryError::backend("connection reset"));

        let error = service.list(&ctx()).await.unwrap_err();

        assert!(!error.is_not_found());
        assert!(!error.is_validation());
    }

    // ============== Update ==============

    #[tokio::test]
    async fn test_update_replaces_title_only() {
        let service = service();
        let created = service.create(&ctx(), "Original Title").await.unwrap();
        service
            .set_completed(&ctx(), created.id(), true)
            .await
            .unwrap();

        let updated = service
            .update(&ctx(), created.id(), "Updated Title")
            .await
            .unwrap();

        assert_eq!(updated.title(), "Updated Title");
        assert!(updated.completed());
        assert_eq!(service.repository().stored(created.id()), Some(updated));
    }

    #[tokio::test]
    async fn test_update_empty_title_leaves_todo_unchanged() {
        let service = service();
        let created = service.create(&ctx(), "Original Title").await.unwrap();

        let error = service.update(&ctx(), created.id(), "").await.unwrap_err();

        assert!(error.is_validation());
        assert_eq!(service.repository().stored(created.id()), Some(created));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let service = service();

        let error = service
            .update(&ctx(), &TodoId::new("non-existent-id"), "Title")
            .await
            .unwrap_err();
        assert!(error.is_not_found());

        // lookup happens before validation
        let error = service
            .update(&ctx(), &TodoId::new("non-existent-id"), "")
            .await
            .unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_update_propagates_save_error() {
        let service = service();
        let created = service.create(&ctx(), "Original Title").await.unwrap();
        service
            .repository()
            .fail_saves(RepositoryError::backend("read only"));

        let error = service
            .update(&ctx(), created.id(), "Final Title")
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ServiceError::Repository(RepositoryError::Backend { .. })
        ));
    }

    // ============== SetCompleted ==============

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn test_set_completed_keeps_title(#[case] completed: bool) {
        let service = service();
        let created = service.create(&ctx(), "Original Title").await.unwrap();

        let updated = service
            .set_completed(&ctx(), created.id(), completed)
            .await
            .unwrap();

        assert_eq!(updated.completed(), completed);
        assert_eq!(updated.title(), created.title());
        assert_eq!(service.repository().stored(created.id()), Some(updated));
    }

    #[tokio::test]
    async fn test_set_completed_unknown_id_is_not_found() {
        let service = service();

        let error = service
            .set_completed(&ctx(), &TodoId::new("non-existent-id"), true)
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    // ============== Delete ==============

    #[tokio::test]
    async fn test_delete_then_get_and_delete_are_not_found() {
        let service = service();
        let created = service.create(&ctx(), "To Be Deleted").await.unwrap();

        service.delete(&ctx(), created.id()).await.unwrap();

        assert!(service
            .get(&ctx(), created.id())
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service
            .delete(&ctx(), created.id())
            .await
            .unwrap_err()
            .is_not_found());
    }

    // ============== Concurrency ==============

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_updates_last_write_wins() {
        let gate = Arc::new(Barrier::new(2));
        let repository = MockRepository {
            find_gate: Some(gate),
            ..MockRepository::default()
        };
        let id = TodoId::new("t-race");
        repository
            .todos
            .lock()
            .unwrap()
            .insert(id.as_str().to_string(), Todo::new(id.clone(), "original"));
        let service = Arc::new(TodoService::new(repository, SequentialIds::new()));

        // Both updates read the original before either writes.
        let first = tokio::spawn({
            let service = Arc::clone(&service);
            let id = id.clone();
            async move { service.update(&ctx(), &id, "first").await }
        });
        let second = tokio::spawn({
            let service = Arc::clone(&service);
            let id = id.clone();
            async move { service.update(&ctx(), &id, "second").await }
        });

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        let stored = service.repository().stored(&id).unwrap();

        // Neither update fails and exactly one of them survives.
        assert_eq!(first.title(), "first");
        assert_eq!(second.title(), "second");
        assert!(stored.title() == "first" || stored.title() == "second");
    }
}
