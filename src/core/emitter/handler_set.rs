//=========================================================================
// Handler Set Trait
//=========================================================================
//
// Type-erased trait for per-event handler collections, so the emitter can
// keep every event type's handlers in one HashMap without knowing the
// concrete event type.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::{Event, HandlerId};

//=== Handler =============================================================

pub(super) type Callback<E> = Box<dyn FnMut(&E) + Send>;
pub(super) type Filter<E> = Box<dyn Fn(&E) -> bool + Send>;

/// One registration: callback, optional filter and the shared active flag.
pub(super) struct Handler<E: Event> {
    pub(super) id: HandlerId,
    pub(super) callback: Callback<E>,
    pub(super) filter: Option<Filter<E>>,
    pub(super) active: Arc<AtomicBool>,
}

impl<E: Event> Handler<E> {
    /// Invokes the callback if the handler is active and the filter passes.
    ///
    /// The filter is not evaluated for inactive handlers.
    /// Returns whether the callback ran.
    pub(super) fn deliver(&mut self, event: &E) -> bool {
        if !self.active.load(Ordering::Acquire) {
            return false;
        }

        if let Some(filter) = &self.filter {
            if !filter(event) {
                return false;
            }
        }

        (self.callback)(event);
        true
    }
}

//=== HandlerSet ==========================================================

/// Type-erased view over a `Vec<Handler<E>>`.
pub(super) trait HandlerSet: Send {
    /// Drops every handler while preserving allocated capacity.
    fn clear_handlers(&mut self);

    /// Returns the number of registered handlers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> HandlerSet for Vec<Handler<E>> {
    fn clear_handlers(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Ping(i32);

    fn handler(id: u64, seen: Arc<Mutex<Vec<i32>>>, filter: Option<Filter<Ping>>) -> Handler<Ping> {
        Handler {
            id: HandlerId(id),
            callback: Box::new(move |ping: &Ping| seen.lock().unwrap().push(ping.0)),
            filter,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    #[test]
    fn deliver_runs_callback_when_active() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut h = handler(0, seen.clone(), None);

        assert!(h.deliver(&Ping(1)));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn inactive_handler_skips_filter() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let filter_calls = Arc::new(Mutex::new(0));
        let calls = filter_calls.clone();

        let mut h = handler(
            0,
            seen.clone(),
            Some(Box::new(move |_: &Ping| {
                *calls.lock().unwrap() += 1;
                true
            })),
        );
        h.active.store(false, Ordering::Release);

        assert!(!h.deliver(&Ping(1)));
        assert_eq!(*filter_calls.lock().unwrap(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn clear_through_trait_object() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut set: Vec<Handler<Ping>> = vec![handler(0, seen.clone(), None), handler(1, seen, None)];

        let erased: &mut dyn HandlerSet = &mut set;
        assert_eq!(erased.len(), 2);
        erased.clear_handlers();
        assert!(erased.is_empty());
    }

    #[test]
    fn downcast_recovers_concrete_set() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut set: Vec<Handler<Ping>> = vec![handler(7, seen, None)];

        let erased: &mut dyn HandlerSet = &mut set;
        let concrete = erased.as_any().downcast_ref::<Vec<Handler<Ping>>>();
        assert_eq!(concrete.map(|v| v[0].id), Some(HandlerId(7)));
    }
}
