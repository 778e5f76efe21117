use std::any::Any;

pub mod entity;

/// A trait representing an event in the system.
///
/// This trait provides methods for retrieving the event's name and for type-safe downcasting.
pub trait Payload: Send + Sync {
    /// Returns the static name of the event type.
    ///
    /// # Returns
    /// A static string slice representing the name of the payload type.
    fn get_name_static() -> &'static str
    where
        Self: Sized;

    /// Returns the name of the payload instance.
    ///
    /// # Returns
    /// A static string slice representing the name of the payload instance.
    fn get_name(&self) -> &'static str;

    /// Provides an immutable reference to the payload as a trait object.
    ///
    /// # Returns
    /// An immutable reference to the payload as a `dyn Any` trait object.
    fn as_any(&self) -> &dyn Any;

    /// Provides a mutable reference to the payload as a trait object.
    ///
    /// # Returns
    /// A mutable reference to the payload as a `dyn Any` trait object.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Copies the fields handlers must not change back from `before`.
    ///
    /// The event manager calls this after every blocking handler. Events
    /// name these fields with `#[event(fixed(...))]`; the default keeps
    /// everything as the handler left it.
    fn restore_fixed(&mut self, _before: &dyn Payload) {}
}

/// Helper functions for safe downcasting of Payload implementations.
impl dyn Payload + '_ {
    /// Attempts to downcast a &mut dyn Payload to &mut T.
    ///
    /// # Returns
    /// Some(&mut T) if the downcast succeeds, None otherwise.
    pub fn downcast_mut<T: Payload + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Attempts to downcast a &dyn Payload to &T.
    ///
    /// # Returns
    /// Some(&T) if the downcast succeeds, None otherwise.
    pub fn downcast_ref<T: Payload + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A trait for cancellable events.
///
/// This trait provides methods to check and set the cancellation state of an event.
pub trait Cancellable: Send + Sync {
    /// Checks if the event has been cancelled.
    ///
    /// # Returns
    /// A boolean indicating whether the event is cancelled.
    fn cancelled(&self) -> bool;

    /// Sets the cancellation state of the event.
    ///
    /// # Arguments
    /// - `cancelled`: A boolean indicating the new cancellation state.
    fn set_cancelled(&mut self, cancelled: bool);
}

/// An enumeration representing the priority levels of event handlers.
///
/// Handlers run from `Lowest` to `Monitor`, so a handler with a higher
/// priority sees, and can override, what lower ones decided. `Monitor` is
/// meant for non-blocking handlers that only observe the outcome.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash)]
pub enum EventPriority {
    /// Runs first.
    Lowest,

    Low,

    Normal,

    High,

    /// Last priority allowed to change the event.
    Highest,

    /// Runs after everything else; should not change the event.
    Monitor,
}
