//! Repository Implementations
//!
//! Adapters for the `TodoRepository` port, plus `TodoStore`, the variant
//! the application picks at startup.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryTodoRepository;
pub use postgres::PostgresTodoRepository;

use todo_domain::{RepositoryError, RequestContext, Todo, TodoId, TodoRepository};

/// Whichever backend the process was configured with
///
/// The port uses `impl Future` returns, so it cannot be a trait object;
/// this enum is the runtime switch instead.
#[derive(Debug, Clone)]
pub enum TodoStore {
    InMemory(InMemoryTodoRepository),
    Postgres(PostgresTodoRepository),
}

impl TodoStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            TodoStore::InMemory(_) => "memory",
            TodoStore::Postgres(_) => "postgres",
        }
    }
}

impl From<InMemoryTodoRepository> for TodoStore {
    fn from(repository: InMemoryTodoRepository) -> Self {
        TodoStore::InMemory(repository)
    }
}

impl From<PostgresTodoRepository> for TodoStore {
    fn from(repository: PostgresTodoRepository) -> Self {
        TodoStore::Postgres(repository)
    }
}

impl TodoRepository for TodoStore {
    async fn save(&self, ctx: &RequestContext, todo: &Todo) -> Result<(), RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.save(ctx, todo).await,
            TodoStore::Postgres(repo) => repo.save(ctx, todo).await,
        }
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &TodoId,
    ) -> Result<Todo, RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.find_by_id(ctx, id).await,
            TodoStore::Postgres(repo) => repo.find_by_id(ctx, id).await,
        }
    }

    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<Todo>, RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.find_all(ctx).await,
            TodoStore::Postgres(repo) => repo.find_all(ctx).await,
        }
    }

    async fn delete(&self, ctx: &RequestContext, id: &TodoId) -> Result<(), RepositoryError> {
        match self {
            TodoStore::InMemory(repo) => repo.delete(ctx, id).await,
            TodoStore::Postgres(repo) => repo.delete(ctx, id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_delegates_to_in_memory() {
        let inner = InMemoryTodoRepository::new();
        let store = TodoStore::from(inner.clone());
        let ctx = RequestContext::background();
        let todo = Todo::new(TodoId::new("t-1"), "delegated");

        store.save(&ctx, &todo).await.unwrap();

        assert_eq!(store.backend_name(), "memory");
        assert_eq!(inner.len().unwrap(), 1);
        assert_eq!(store.find_by_id(&ctx, todo.id()).await.unwrap(), todo);
        assert_eq!(store.find_all(&ctx).await.unwrap(), vec![todo.clone()]);
        store.delete(&ctx, todo.id()).await.unwrap();
        assert!(inner.is_empty().unwrap());
    }
}
