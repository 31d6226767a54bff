//=========================================================================
// Emitter
//=========================================================================
//
// Per-event-type handler registry with synchronous fan-out.
//
// Pattern: on/on_filtered → emit (N handlers) → off / clear
//
// Handlers of one event type run in registration order. `emit` borrows
// the emitter exclusively, so the handler set cannot be mutated while a
// delivery pass is running.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::trace;

//=== Internal Dependencies ===============================================

use super::handler_set::{Handler, HandlerSet};
use super::Event;

//=== HandlerId ===========================================================

/// Sequence number of one registration, unique per [`Emitter`].
///
/// [`Emitter::off`] also compares the handle's flag, so a handle from one
/// emitter never removes a handler of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub(super) u64);

//=== HandlerHandle =======================================================

/// Handle returned by [`Emitter::on`], used to toggle or cancel a handler.
///
/// Clones share the same `active` flag, so a clone moved into another
/// callback can pause this handler mid-frame.
pub struct HandlerHandle<E: Event> {
    id: HandlerId,
    active: Arc<AtomicBool>,
    _event: PhantomData<fn(&E)>,
}

impl<E: Event> HandlerHandle<E> {
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Returns whether the handler currently receives events.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Enables or disables the handler without unregistering it.
    ///
    /// Inactive handlers are skipped before their filter is evaluated.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }
}

impl<E: Event> Clone for HandlerHandle<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            _event: PhantomData,
        }
    }
}

impl<E: Event> PartialEq for HandlerHandle<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E: Event> Eq for HandlerHandle<E> {}

impl<E: Event> fmt::Debug for HandlerHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerHandle")
            .field("event", &type_name::<E>())
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

//=== Emitter =============================================================

/// Typed event dispatcher.
///
/// Handlers are grouped by event type. Emitting an event invokes every
/// active handler of that type whose filter (if any) accepts the payload.
///
/// # Example
///
/// ```
/// use kami_engine::core::emitter::Emitter;
/// use std::sync::{Arc, Mutex};
///
/// struct Ping(i32);
///
/// let hits = Arc::new(Mutex::new(Vec::new()));
/// let sink = hits.clone();
///
/// let mut emitter = Emitter::new();
/// emitter.on_filtered(
///     move |ping: &Ping| sink.lock().unwrap().push(ping.0),
///     |ping: &Ping| ping.0 == 5,
/// );
///
/// emitter.emit(&Ping(3));
/// emitter.emit(&Ping(5));
/// assert_eq!(*hits.lock().unwrap(), vec![5]);
/// ```
pub struct Emitter {
    handlers: HashMap<TypeId, Box<dyn HandlerSet>>,
    next_id: u64,
}

impl Emitter {
    /// Creates an emitter with no registrations.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `callback` for every emitted `E`.
    pub fn on<E, C>(&mut self, callback: C) -> HandlerHandle<E>
    where
        E: Event,
        C: FnMut(&E) + Send + 'static,
    {
        self.register(Box::new(callback), None)
    }

    /// Registers `callback` for emitted `E` values accepted by `filter`.
    pub fn on_filtered<E, C, F>(&mut self, callback: C, filter: F) -> HandlerHandle<E>
    where
        E: Event,
        C: FnMut(&E) + Send + 'static,
        F: Fn(&E) -> bool + Send + 'static,
    {
        self.register(Box::new(callback), Some(Box::new(filter)))
    }

    /// Removes the handler identified by `handle`.
    ///
    /// Unknown or already removed handles are ignored. Returns whether a
    /// handler was actually removed.
    pub fn off<E: Event>(&mut self, handle: &HandlerHandle<E>) -> bool {
        let Some(set) = self.set_mut::<E>() else {
            return false;
        };

        // Ids restart at zero in every emitter; the shared flag pins the
        // handle to the registration that created it.
        match set
            .iter()
            .position(|h| h.id == handle.id && Arc::ptr_eq(&h.active, &handle.active))
        {
            Some(pos) => {
                set.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes every handler of every event type.
    pub fn clear(&mut self) {
        for set in self.handlers.values_mut() {
            set.clear_handlers();
        }
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers `event` to every matching handler of type `E`, synchronously.
    ///
    /// A panic inside a callback is not caught and unwinds through the
    /// caller of `emit`.
    pub fn emit<E: Event>(&mut self, event: &E) {
        let Some(set) = self.set_mut::<E>() else {
            return;
        };

        let delivered = set
            .iter_mut()
            .fold(0usize, |n, handler| n + handler.deliver(event) as usize);

        trace!(
            target: "emitter",
            "Emitted {} to {}/{} handlers",
            type_name::<E>(),
            delivered,
            set.len()
        );
    }

    //--- Query API --------------------------------------------------------

    /// Returns the number of handlers registered for `E`, active or not.
    pub fn handler_count<E: Event>(&self) -> usize {
        self.handlers
            .get(&TypeId::of::<E>())
            .map(|set| set.len())
            .unwrap_or(0)
    }

    /// Returns true if at least one handler is registered for `E`.
    pub fn has_handlers<E: Event>(&self) -> bool {
        self.handler_count::<E>() > 0
    }

    /// Returns the total number of handlers across all event types.
    pub fn len(&self) -> usize {
        self.handlers.values().map(|set| set.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(|set| set.is_empty())
    }

    //--- Internal Helpers -------------------------------------------------

    fn register<E: Event>(
        &mut self,
        callback: Box<dyn FnMut(&E) + Send>,
        filter: Option<Box<dyn Fn(&E) -> bool + Send>>,
    ) -> HandlerHandle<E> {
        let id = HandlerId(self.next_id);
        self.next_id += 1;

        let active = Arc::new(AtomicBool::new(true));

        let set = self
            .handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Vec::<Handler<E>>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<Handler<E>>>();

        // The entry for TypeId::of::<E>() is only ever created as Vec<Handler<E>>.
        if let Some(set) = set {
            set.push(Handler {
                id,
                callback,
                filter,
                active: Arc::clone(&active),
            });
        }

        HandlerHandle {
            id,
            active,
            _event: PhantomData,
        }
    }

    fn set_mut<E: Event>(&mut self) -> Option<&mut Vec<Handler<E>>> {
        self.handlers
            .get_mut(&TypeId::of::<E>())
            .and_then(|set| set.as_any_mut().downcast_mut::<Vec<Handler<E>>>())
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("event_types", &self.handlers.len())
            .field("handlers", &self.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
