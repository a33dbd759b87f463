//! Typed change notifications for employee mutations
//!
//! The persistence layer publishes an [`EmployeeEvent`] after each committed
//! mutation. Listeners are invoked synchronously, in registration order,
//! in-process. There is no retry and no history of past events.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::info;

/// A committed employee mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeEvent {
    Added { id: i64, name: String },
    Updated { id: i64 },
    Deleted { id: i64 },
}

impl fmt::Display for EmployeeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeEvent::Added { name, .. } => write!(f, "Added employee: {}", name),
            EmployeeEvent::Updated { id } => write!(f, "Updated employee with ID: {}", id),
            EmployeeEvent::Deleted { id } => write!(f, "Deleted employee with ID: {}", id),
        }
    }
}

/// Receives employee change events
pub trait ChangeListener: Send + Sync {
    fn update(&self, event: &EmployeeEvent);
}

/// Registry of change listeners
///
/// Cloning shares the underlying listener list.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Arc<Mutex<Vec<Arc<dyn ChangeListener>>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Arc<dyn ChangeListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    /// Deliver an event to every listener, in registration order.
    pub fn publish(&self, event: &EmployeeEvent) {
        for listener in self.listeners.lock().unwrap().iter() {
            listener.update(event);
        }
    }
}

/// Listener that writes each event to the log
pub struct LogListener;

impl ChangeListener for LogListener {
    fn update(&self, event: &EmployeeEvent) {
        info!("{}", event);
    }
}
