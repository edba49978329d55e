use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::Subscription;
use crate::geometry::{DimensionType, ViewportSize};

/// Receives `(window, screen)` on every viewport change.
pub type ChangeHandler = Box<dyn FnMut(ViewportSize, ViewportSize)>;

/// Platform collaborator that reports viewport sizes and change events.
pub trait ViewportSource {
    fn size(&self, kind: DimensionType) -> ViewportSize;
    fn subscribe(&self, handler: ChangeHandler) -> Subscription;
}

type SharedHandler = Rc<RefCell<ChangeHandler>>;

struct ManualSourceInner {
    window: Cell<ViewportSize>,
    screen: Cell<ViewportSize>,
    handlers: RefCell<Vec<(u64, SharedHandler)>>,
    next_handler_id: Cell<u64>,
    emission: Cell<u64>,
}

/// In-memory source for hosts that push viewport sizes themselves.
#[derive(Clone)]
pub struct ManualViewportSource {
    inner: Rc<ManualSourceInner>,
}

impl ManualViewportSource {
    pub fn new(window: ViewportSize, screen: ViewportSize) -> Self {
        Self {
            inner: Rc::new(ManualSourceInner {
                window: Cell::new(window),
                screen: Cell::new(screen),
                handlers: RefCell::new(Vec::new()),
                next_handler_id: Cell::new(0),
                emission: Cell::new(0),
            }),
        }
    }

    /// Stores the new sizes and emits one change event to every live handler.
    pub fn set_sizes(&self, window: ViewportSize, screen: ViewportSize) {
        self.inner.window.set(window);
        self.inner.screen.set(screen);
        let emission = self.inner.emission.get().wrapping_add(1);
        self.inner.emission.set(emission);

        let handlers: Vec<SharedHandler> = self
            .inner
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        tracing::debug!(
            ?window,
            ?screen,
            handlers = handlers.len(),
            "emit viewport change"
        );

        for handler in handlers {
            // A handler that set newer sizes has already delivered them to the rest.
            if self.inner.emission.get() != emission {
                tracing::debug!("viewport change superseded mid-emit");
                break;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (&mut **handler)(window, screen),
                Err(_) => tracing::warn!("re-entrant viewport change ignored for a busy handler"),
            }
        }
    }

    pub fn handler_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }
}

impl ViewportSource for ManualViewportSource {
    fn size(&self, kind: DimensionType) -> ViewportSize {
        match kind {
            DimensionType::Window => self.inner.window.get(),
            DimensionType::Screen => self.inner.screen.get(),
        }
    }

    fn subscribe(&self, handler: ChangeHandler) -> Subscription {
        let id = self.inner.next_handler_id.get();
        self.inner.next_handler_id.set(id + 1);
        self.inner
            .handlers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(handler))));

        let inner: Weak<ManualSourceInner> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .handlers
                    .borrow_mut()
                    .retain(|(handler_id, _)| *handler_id != id);
                tracing::debug!(handler_id = id, "viewport change handler removed");
            }
        })
    }
}
