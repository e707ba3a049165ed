//! Geometry event dispatch with explicit, disposable subscriptions.
//!
//! The host owns the wiring: it subscribes handlers and forwards the
//! page-level notifications (load, viewport resize, transition completion)
//! it receives from its rendering environment. Nothing here registers
//! ambient global hooks; dropping the returned [`Subscription`] detaches
//! the handler.

use log::warn;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A geometry-affecting page notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryEvent {
    /// The page finished loading; initial geometry is established.
    Loaded,
    /// The viewport changed size.
    ViewportResized { width_px: u32, height_px: u32 },
    /// An animated style change on an element ran to completion.
    TransitionEnded {
        element_id: String,
        property: String,
    },
}

type Handler = Rc<RefCell<dyn FnMut(&GeometryEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Single-threaded dispatch registry for [`GeometryEvent`]s.
///
/// Handlers run synchronously, in subscription order, on the dispatching
/// thread. Dispatch walks a snapshot of the handler list, so a handler may
/// subscribe or detach (including itself) while events are being delivered.
#[derive(Clone, Default)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. The handler stays attached until the returned
    /// [`Subscription`] is dropped or detached.
    pub fn subscribe(&self, handler: impl FnMut(&GeometryEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        registry.handlers.push((id, handler));
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Deliver an event to every currently subscribed handler.
    pub fn dispatch(&self, event: &GeometryEvent) {
        let snapshot: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in snapshot {
            // A handler that re-enters itself through a nested dispatch is
            // skipped rather than aborted mid-delivery.
            match handler.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(event),
                Err(_) => warn!("geometry event handler re-entered itself; skipping"),
            }
        }
    }

    /// Number of currently attached handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

/// Disposable handle for one registered handler.
///
/// Dropping the subscription detaches the handler; detaching after the hub
/// itself is gone is a no-op.
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// Detach the handler now. Equivalent to dropping the subscription.
    pub fn detach(self) {}

    fn remove(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}
