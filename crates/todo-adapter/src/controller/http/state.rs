//! Shared handler state

use std::sync::Arc;

use todo_domain::{IdGenerator, TodoRepository};
use todo_usecase::TodoService;

/// Settings the HTTP layer needs besides the service itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    service_name: String,
    advertised_addr: String,
}

impl HttpSettings {
    pub fn new(service_name: impl Into<String>, advertised_addr: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            advertised_addr: advertised_addr.into(),
        }
    }

    /// Tagged on every request span as `component`
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// `host:port` as configured, reported by the hello endpoint
    pub fn advertised_addr(&self) -> &str {
        &self.advertised_addr
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::new("todo-service", "localhost:8080")
    }
}

pub struct AppState<R, G> {
    service: Arc<TodoService<R, G>>,
    settings: Arc<HttpSettings>,
}

impl<R, G> AppState<R, G>
where
    R: TodoRepository,
    G: IdGenerator,
{
    pub fn new(service: TodoService<R, G>, settings: HttpSettings) -> Self {
        Self {
            service: Arc::new(service),
            settings: Arc::new(settings),
        }
    }

    pub fn service(&self) -> &TodoService<R, G> {
        &self.service
    }

    pub fn settings(&self) -> &HttpSettings {
        &self.settings
    }
}

// Derive would require `R: Clone, G: Clone`.
impl<R, G> Clone for AppState<R, G> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            settings: Arc::clone(&self.settings),
        }
    }
}
