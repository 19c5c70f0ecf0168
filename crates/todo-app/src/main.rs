//! # Todo Service
//!
//! Entry point: configuration, logging, and dependency wiring.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: TodoStore (memory or PostgreSQL adapter)       │
//! │    ├── Creates: TodoService (use case)                         │
//! │    ├── Creates: axum Router (HTTP adapter)                     │
//! │    └── Runs: Server until SIGINT/SIGTERM                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod logging;
mod server;

use anyhow::Context as _;
use clap::Parser;

use todo_adapter::controller::http::{create_router, AppState};
use todo_adapter::gateway::RandomIdGenerator;
use todo_adapter::repository::{InMemoryTodoRepository, PostgresTodoRepository, TodoStore};
use todo_usecase::TodoService;

use crate::config::{AppConfig, StorageBackend};
use crate::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = AppConfig::parse();
    logging::init(&config)?;

    let result = run(config).await;
    if let Err(error) = &result {
        tracing::error!("todo service stopped: {error:#}");
    }
    result
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let store = open_store(&config.storage_backend()).await?;

    tracing::info!(
        service = %config.service_name,
        backend = store.backend_name(),
        "starting todo service"
    );

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let service = TodoService::new(store, RandomIdGenerator::new());
    let router = create_router(AppState::new(service, config.http_settings()));

    Server::new(config.server_config()).run(router).await
}

async fn open_store(backend: &StorageBackend) -> anyhow::Result<TodoStore> {
    match backend {
        StorageBackend::InMemory => Ok(InMemoryTodoRepository::new().into()),
        StorageBackend::Postgres { url } => {
            let repository = PostgresTodoRepository::connect(url)
                .await
                .context("failed to connect to database")?;
            repository
                .ensure_schema()
                .await
                .context("failed to create todos table")?;
            Ok(repository.into())
        }
    }
}
