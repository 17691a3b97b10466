//! Host event hub
//!
//! The host fires window and page notifications into a [`HostEvents`] hub;
//! listeners registered with [`HostEvents::subscribe`] stay registered
//! exactly as long as the returned [`Subscription`] lives. Single-threaded:
//! everything runs on the host's event-loop thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use rustc_hash::{FxHashMap, FxHashSet};
use winit::dpi::PhysicalSize;

/// Notification from the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The output window (canvas) changed size
    WindowResized(PhysicalSize<u32>),
    /// The content element was laid out again and may have new pixel size
    ContentResized,
    /// The page became visible (true) or hidden (false)
    VisibilityChanged(bool),
}

type Listener = Box<dyn FnMut(&HostEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    slots: FxHashMap<u64, Listener>,
    /// Listeners unsubscribed while they were being called
    cancelled: FxHashSet<u64>,
}

/// Event hub owned by the host.
#[derive(Clone, Default)]
pub struct HostEvents {
    inner: Rc<RefCell<Listeners>>,
}

impl HostEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. It is called for every emitted event until the
    /// returned subscription is dropped.
    pub fn subscribe(&self, listener: impl FnMut(&HostEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.slots.insert(id, Box::new(listener));
        Subscription { id, hub: Rc::downgrade(&self.inner) }
    }

    /// Deliver `event` to every listener, oldest subscription first.
    ///
    /// Listeners may subscribe, unsubscribe, or emit from inside the
    /// callback; a listener subscribed during delivery first hears the
    /// next event.
    pub fn emit(&self, event: HostEvent) {
        let mut ids: Vec<u64> = self.inner.borrow().slots.keys().copied().collect();
        ids.sort_unstable();

        for id in ids {
            let Some(mut listener) = self.inner.borrow_mut().slots.remove(&id) else {
                continue;
            };
            listener(&event);

            let mut inner = self.inner.borrow_mut();
            if !inner.cancelled.remove(&id) {
                inner.slots.insert(id, listener);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}

impl std::fmt::Debug for HostEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Registration handle; dropping it removes the listener.
#[must_use = "dropping a Subscription immediately unregisters its listener"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    hub: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Whether the hub this listener belongs to still exists.
    pub fn is_active(&self) -> bool {
        self.hub.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else { return };
        let Ok(mut hub) = hub.try_borrow_mut() else { return };
        if hub.slots.remove(&self.id).is_none() {
            // being called right now; `emit` drops it afterwards
            hub.cancelled.insert(self.id);
        }
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
