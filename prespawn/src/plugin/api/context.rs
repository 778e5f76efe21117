use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::plugin::{EventHandler, EventManager, HandlerId};

use super::{EventPriority, Payload};

/// The `Context` struct is what a plugin sees of the host: its own name and
/// the event manager it registers handlers with.
///
/// Every registration made through a context is remembered, so the whole
/// set can be removed when the plugin is disabled.
pub struct Context {
    name: String,
    pub event_manager: Arc<EventManager>,
    registrations: Mutex<Vec<HandlerId>>,
}

impl Context {
    /// Creates a new instance of `Context`.
    ///
    /// # Arguments
    /// - `name`: The name of the plugin.
    /// - `event_manager`: The manager the plugin's handlers go to.
    #[must_use]
    pub fn new(name: impl Into<String>, event_manager: Arc<EventManager>) -> Self {
        Self {
            name: name.into(),
            event_manager,
            registrations: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers an event handler with a specified priority and blocking status.
    ///
    /// # Arguments
    /// - `handler`: A reference to the event handler.
    /// - `priority`: The priority of the event handler.
    /// - `blocking`: Whether the handler may change the event.
    ///
    /// # Constraints
    /// The handler must implement the `EventHandler<E>` trait.
    pub fn register_event<E, H>(&self, handler: Arc<H>, priority: EventPriority, blocking: bool) -> HandlerId
    where
        E: Payload + Send + Sync + 'static,
        H: EventHandler<E> + 'static,
    {
        let id = self
            .event_manager
            .register::<E, H>(handler, priority, blocking);
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
        id
    }

    /// Number of handlers this plugin still has registered.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Removes every handler registered through this context.
    pub fn unregister_all(&self) {
        let ids = std::mem::take(
            &mut *self
                .registrations
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        let removed = ids
            .into_iter()
            .filter(|id| self.event_manager.unregister(*id))
            .count();
        info!("Unregistered {removed} handler(s) of {}", self.name);
    }
}
