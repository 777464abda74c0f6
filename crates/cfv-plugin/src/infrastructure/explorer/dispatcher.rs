//! Document-level click signal.
//!
//! Listeners registered for the capture phase run before bubble-phase
//! listeners; within a phase they run in registration order.  A listener that
//! calls [`ClickEvent::stop_immediate_propagation`] ends delivery.
//!
//! The listener list is snapshotted before delivery, so a listener may
//! register or remove listeners without deadlocking the dispatcher.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError,
};

use tracing::trace;

use super::ClickEvent;

/// A click callback.
pub type ClickListener = Arc<dyn Fn(&mut ClickEvent) + Send + Sync>;

/// Handle returned by [`ClickDispatcher::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Phase in which a listener receives clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerPhase {
    Capture,
    Bubble,
}

struct Registration {
    id: ListenerId,
    phase: ListenerPhase,
    listener: ClickListener,
}

/// The host's document-level click signal.
#[derive(Default)]
pub struct ClickDispatcher {
    listeners: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
}

impl ClickDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `phase` and returns its handle.
    pub fn add_listener(&self, phase: ListenerPhase, listener: ClickListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push(Registration { id, phase, listener });
        trace!(?id, ?phase, "click listener registered");
        id
    }

    /// Removes a listener.  Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|reg| reg.id != id);
        before != listeners.len()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    /// Delivers `event` to every listener until one stops propagation.
    pub fn dispatch(&self, event: &mut ClickEvent) {
        let ordered: Vec<ClickListener> = {
            let listeners = self.lock();
            let capture = listeners
                .iter()
                .filter(|reg| reg.phase == ListenerPhase::Capture);
            let bubble = listeners
                .iter()
                .filter(|reg| reg.phase == ListenerPhase::Bubble);
            capture
                .chain(bubble)
                .map(|reg| Arc::clone(&reg.listener))
                .collect()
        };

        for listener in ordered {
            listener(event);
            if event.propagation_stopped() {
                break;
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Registration>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
