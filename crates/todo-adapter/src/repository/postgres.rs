//! `PostgreSQL` Repository Implementation
//!
//! Durable storage for todos through a `sqlx::PgPool`.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS todos (
//!     id TEXT PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     completed BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```
//!
//! Every query is raced against the request's cancellation signal. When the
//! request goes away the query future is dropped, which releases the pooled
//! connection, and the call reports `RepositoryError::cancelled()`.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use todo_domain::{RepositoryError, RequestContext, Todo, TodoId, TodoRepository};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT FALSE
)";

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

type TodoRow = (String, String, bool);

fn row_to_todo((id, title, completed): TodoRow) -> Todo {
    Todo::restore(TodoId::new(id), title, completed)
}

fn database_error(error: sqlx::Error) -> RepositoryError {
    RepositoryError::backend(error.to_string())
}

/// Run `query` unless the request is (or becomes) cancelled first
async fn cancellable<T, F>(ctx: &RequestContext, query: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    if ctx.is_cancelled() {
        return Err(RepositoryError::cancelled());
    }
    tokio::select! {
        biased;
        () = ctx.cancelled() => Err(RepositoryError::cancelled()),
        result = query => result.map_err(database_error),
    }
}

/// `PostgreSQL` Todo Repository
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url` and verify it with a round trip
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(database_error)?;
        Ok(Self::new(pool))
    }

    /// Create the `todos` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoRepository for PostgresTodoRepository {
    async fn save(&self, ctx: &RequestContext, todo: &Todo) -> Result<(), RepositoryError> {
        let query = sqlx::query(
            "INSERT INTO todos (id, title, completed) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET title = EXCLUDED.title, completed = EXCLUDED.completed",
        )
        .bind(todo.id().as_str())
        .bind(todo.title())
        .bind(todo.completed())
        .execute(&self.pool);

        cancellable(ctx, query).await?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &TodoId,
    ) -> Result<Todo, RepositoryError> {
        let query = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, completed FROM todos WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool);

        cancellable(ctx, query)
            .await?
            .map(row_to_todo)
            .ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<Todo>, RepositoryError> {
        let query = sqlx::query_as::<_, TodoRow>("SELECT id, title, completed FROM todos")
            .fetch_all(&self.pool);

        let rows = cancellable(ctx, query).await?;
        Ok(rows.into_iter().map(row_to_todo).collect())
    }

    async fn delete(&self, ctx: &RequestContext, id: &TodoId) -> Result<(), RepositoryError> {
        let query = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool);

        let result = cancellable(ctx, query).await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(id));
        }
        Ok(())
    }
}
