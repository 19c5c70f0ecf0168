//! Todo - The single entity of the service
//!
//! A Todo is an Entity (has identity that persists through changes).
//! Renaming it or ticking it off doesn't make it a different todo.

/// Unique identifier for a Todo
///
/// Opaque to the domain. The service assigns it once at creation time
/// through an [`IdGenerator`](crate::identity::IdGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Display for TodoId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Todo - A task someone wants to get done
///
/// Fields are private so that the only ways to change a stored todo are
/// [`Todo::rename`] and [`Todo::set_completed`], both driven by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    /// Unique identifier (Entity identity)
    id: TodoId,
    /// What needs doing
    title: String,
    /// Whether it's done
    completed: bool,
}

impl Todo {
    /// Create a fresh, not yet completed Todo
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Rebuild a Todo from stored state
    ///
    /// Used by repositories when reading rows back; it is not a creation path.
    pub fn restore(id: TodoId, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    // ========== Mutations ==========

    /// Replace the title, leaving `completed` alone
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Flip the completion flag, leaving `title` alone
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
