use arc_swap::ArcSwap;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tracing::{error, trace};

pub mod api;

pub use api::*;

/// A trait for handling events dynamically.
///
/// This trait allows for handling events of any type that implements the `Payload` trait.
pub trait DynEventHandler: Send + Sync {
    /// Handles a dynamic event without being able to change it.
    ///
    /// # Arguments
    /// - `event`: A reference to the event to handle.
    fn handle_dyn(&self, event: &(dyn Payload + Send + Sync));

    /// Handles a blocking dynamic event.
    ///
    /// # Arguments
    /// - `event`: A mutable reference to the event to handle.
    fn handle_blocking_dyn(&self, event: &mut (dyn Payload + Send + Sync));

    /// Checks if the event handler is blocking.
    ///
    /// # Returns
    /// A boolean indicating whether the handler is blocking.
    fn is_blocking(&self) -> bool;

    /// Retrieves the priority of the event handler.
    ///
    /// # Returns
    /// The priority of the event handler.
    fn get_priority(&self) -> &EventPriority;
}

/// A trait for handling specific events.
///
/// Blocking handlers get `handle_blocking` and may change the event, the
/// others get `handle` once every blocking handler is done.
pub trait EventHandler<E: Payload>: Send + Sync {
    /// Handles an event of type `E`.
    ///
    /// # Arguments
    /// - `event`: A reference to the event to handle.
    fn handle(&self, _event: &E) {}

    /// Handles a blocking event of type `E`.
    ///
    /// # Arguments
    /// - `event`: A mutable reference to the event to handle.
    fn handle_blocking(&self, _event: &mut E) {}
}

/// A struct representing a typed event handler.
///
/// This struct holds a reference to an event handler, its priority, and whether it is blocking.
struct TypedEventHandler<E, H>
where
    E: Payload + Send + Sync + 'static,
    H: EventHandler<E> + Send + Sync,
{
    handler: Arc<H>,
    priority: EventPriority,
    blocking: bool,
    _phantom: std::marker::PhantomData<fn(E)>,
}

impl<E, H> DynEventHandler for TypedEventHandler<E, H>
where
    E: Payload + Send + Sync + 'static,
    H: EventHandler<E> + Send + Sync,
{
    fn handle_blocking_dyn(&self, event: &mut (dyn Payload + Send + Sync)) {
        if let Some(typed_event) = <dyn Payload>::downcast_mut(event) {
            self.handler.handle_blocking(typed_event);
        }
    }

    fn handle_dyn(&self, event: &(dyn Payload + Send + Sync)) {
        if let Some(typed_event) = <dyn Payload>::downcast_ref(event) {
            self.handler.handle(typed_event);
        }
    }

    fn is_blocking(&self) -> bool {
        self.blocking
    }

    fn get_priority(&self) -> &EventPriority {
        &self.priority
    }
}

/// Identifies one registration, so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone)]
struct HandlerEntry {
    id: HandlerId,
    handler: Arc<dyn DynEventHandler>,
}

/// A type alias for a map of event handlers, where the key is the payload type
/// and the value is the handler list kept in execution order.
type HandlerMap = HashMap<TypeId, Vec<HandlerEntry>>;

/// Owns the handler registry and dispatches events to it.
///
/// Dispatch is synchronous: [`EventManager::fire`] returns once every handler
/// has run on the calling thread. Handlers run by ascending [`EventPriority`],
/// ties in registration order. Each dispatch works on a snapshot of the
/// registry, so registering from inside a handler only affects later events.
pub struct EventManager {
    handlers: ArcSwap<HandlerMap>,
    next_id: AtomicU64,
    failed_invocations: AtomicU64,
}

impl Default for EventManager {
    fn default() -> Self {
        Self {
            handlers: ArcSwap::from_pointee(HashMap::new()),
            next_id: AtomicU64::new(0),
            failed_invocations: AtomicU64::new(0),
        }
    }
}

impl EventManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler
    pub fn register<E, H>(&self, handler: Arc<H>, priority: EventPriority, blocking: bool) -> HandlerId
    where
        E: Payload + Send + Sync + 'static,
        H: EventHandler<E> + 'static,
    {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = HandlerEntry {
            id,
            handler: Arc::new(TypedEventHandler {
                handler,
                priority,
                blocking,
                _phantom: std::marker::PhantomData,
            }),
        };

        self.handlers.rcu(|current| {
            let mut handlers = (**current).clone();
            let list = handlers.entry(TypeId::of::<E>()).or_default();
            let index = list.partition_point(|h| *h.handler.get_priority() <= priority);
            list.insert(index, entry.clone());
            handlers
        });
        trace!(
            "Registered handler {id} for {} at {priority:?}",
            E::get_name_static()
        );
        id
    }

    /// Remove a previously registered handler.
    ///
    /// Returns `false` if no handler with this id is registered.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut removed = false;
        self.handlers.rcu(|current| {
            let mut handlers = (**current).clone();
            removed = false;
            for list in handlers.values_mut() {
                if let Some(index) = list.iter().position(|h| h.id == id) {
                    list.remove(index);
                    removed = true;
                    break;
                }
            }
            handlers.retain(|_, list| !list.is_empty());
            handlers
        });
        removed
    }

    /// Number of handlers currently registered for `E`.
    #[must_use]
    pub fn handler_count<E: Payload + 'static>(&self) -> usize {
        self.handlers
            .load()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.handlers.store(Arc::new(HashMap::new()));
    }

    /// How many handler invocations have panicked so far.
    #[must_use]
    pub fn failed_invocations(&self) -> u64 {
        self.failed_invocations.load(Ordering::Relaxed)
    }

    /// Fire an event to all registered handlers
    ///
    /// A handler that panics is reported and skipped. Whatever it changed on
    /// the event before panicking is rolled back, so the decisions of earlier
    /// handlers survive. After a handler returns normally, the fields the
    /// event declares fixed are put back.
    pub fn fire<E: Payload + Clone + Send + Sync + 'static>(&self, mut event: E) -> E {
        let handlers = self.handlers.load_full();
        let Some(handlers) = handlers.get(&TypeId::of::<E>()) else {
            return event;
        };
        let (blocking, non_blocking): (Vec<_>, Vec<_>) =
            handlers.iter().partition(|h| h.handler.is_blocking());

        // Process blocking handlers first
        for entry in blocking {
            let snapshot = event.clone();
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                entry.handler.handle_blocking_dyn(&mut event);
            }));
            match result {
                Ok(()) => event.restore_fixed(&snapshot),
                Err(cause) => {
                    event = snapshot;
                    self.report_failure(E::get_name_static(), entry, cause.as_ref());
                }
            }
        }

        // Then let the observers see the final state
        for entry in non_blocking {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                entry.handler.handle_dyn(&event);
            }));
            if let Err(cause) = result {
                self.report_failure(E::get_name_static(), entry, cause.as_ref());
            }
        }
        event
    }

    fn report_failure(&self, event: &str, entry: &HandlerEntry, cause: &(dyn Any + Send)) {
        self.failed_invocations.fetch_add(1, Ordering::Relaxed);
        let message = cause
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| cause.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic");
        error!(
            "Handler {} ({:?}) panicked while handling {event}: {message}",
            entry.id,
            entry.handler.get_priority()
        );
    }
}
