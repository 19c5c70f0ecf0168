//! In-Memory Repository Implementation
//!
//! Process-local storage for todos. Used when no database is configured,
//! and by the tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use todo_domain::{RepositoryError, RequestContext, Todo, TodoId, TodoRepository};

/// In-memory Todo Repository
///
/// Thread-safe implementation using RwLock. Clones share the same table.
/// The lock is only held for the duration of a map operation, never across
/// an `.await`, and the request context is ignored since nothing here blocks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<String, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            todos: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        let todos = self
            .todos
            .read()
            .map_err(|_| RepositoryError::backend("Failed to acquire read lock"))?;
        Ok(todos.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

impl TodoRepository for InMemoryTodoRepository {
    async fn save(&self, _ctx: &RequestContext, todo: &Todo) -> Result<(), RepositoryError> {
        let mut todos = self
            .todos
            .write()
            .map_err(|_| RepositoryError::backend("Failed to acquire write lock"))?;
        todos.insert(todo.id().as_str().to_string(), todo.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        _ctx: &RequestContext,
        id: &TodoId,
    ) -> Result<Todo, RepositoryError> {
        let todos = self
            .todos
            .read()
            .map_err(|_| RepositoryError::backend("Failed to acquire read lock"))?;
        todos
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn find_all(&self, _ctx: &RequestContext) -> Result<Vec<Todo>, RepositoryError> {
        let todos = self
            .todos
            .read()
            .map_err(|_| RepositoryError::backend("Failed to acquire read lock"))?;
        Ok(todos.values().cloned().collect())
    }

    async fn delete(&self, _ctx: &RequestContext, id: &TodoId) -> Result<(), RepositoryError> {
        let mut todos = self
            .todos
            .write()
            .map_err(|_| RepositoryError::backend("Failed to acquire write lock"))?;
        todos
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(id))
    }
}
