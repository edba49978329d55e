use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::{Subscription, ViewportSource};
use crate::config::{try_load_base_reference, BaseReference};
use crate::error::{DimensionsError, DimensionsResult};
use crate::geometry::{DimensionSnapshot, DimensionType, ViewportSize};
use crate::scale::DimensionFunctions;

type SnapshotListener = Rc<RefCell<dyn FnMut(&DimensionSnapshot)>>;

struct ProviderShared {
    snapshot: RefCell<Rc<DimensionSnapshot>>,
    listeners: RefCell<Vec<(u64, SnapshotListener)>>,
    next_listener_id: Cell<u64>,
}

impl ProviderShared {
    fn current(&self) -> Rc<DimensionSnapshot> {
        Rc::clone(&self.snapshot.borrow())
    }

    fn replace(&self, window: ViewportSize, screen: ViewportSize) {
        let next = Rc::new(self.snapshot.borrow().with_sizes(window, screen));
        *self.snapshot.borrow_mut() = Rc::clone(&next);
        tracing::debug!(?window, ?screen, "viewport snapshot replaced");

        let listeners: Vec<SnapshotListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            // A listener may have published a newer snapshot; the rest already saw it.
            if !Rc::ptr_eq(&next, &self.snapshot.borrow()) {
                tracing::debug!("snapshot superseded mid-publish");
                break;
            }
            match listener.try_borrow_mut() {
                Ok(mut listener) => (&mut *listener)(&*next),
                Err(_) => tracing::warn!("skipped re-entrant snapshot publish"),
            }
        }
    }
}

/// Holds the latest [`DimensionSnapshot`] and keeps it in step with a [`ViewportSource`].
///
/// The platform subscription lives as long as the provider; dropping the provider
/// unsubscribes and detaches every [`DimensionsContext`] it handed out.
pub struct DimensionsProvider {
    shared: Rc<ProviderShared>,
    base: BaseReference,
    _platform: Subscription,
}

impl DimensionsProvider {
    pub fn new<S: ViewportSource + ?Sized>(source: &S, base: BaseReference) -> Self {
        let window = source.size(DimensionType::Window);
        let screen = source.size(DimensionType::Screen);
        let snapshot = DimensionSnapshot::new(window, screen, base);

        let shared = Rc::new(ProviderShared {
            snapshot: RefCell::new(Rc::new(snapshot)),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
        });

        let weak: Weak<ProviderShared> = Rc::downgrade(&shared);
        let platform = source.subscribe(Box::new(move |window, screen| {
            if let Some(shared) = weak.upgrade() {
                shared.replace(window, screen);
            }
        }));

        tracing::info!(
            ?window,
            ?screen,
            base_width = base.base_width,
            base_height = base.base_height,
            "dimensions provider initialized"
        );

        Self {
            shared,
            base,
            _platform: platform,
        }
    }

    /// Uses the 393x852 default base.
    pub fn with_default_base<S: ViewportSource + ?Sized>(source: &S) -> Self {
        Self::new(source, BaseReference::default())
    }

    /// Reads the base from `dimensions.json` in the app's config directory.
    pub fn from_app_config<S: ViewportSource + ?Sized>(
        source: &S,
        app_dir: &str,
    ) -> DimensionsResult<Self> {
        let base = try_load_base_reference(app_dir)?;
        Ok(Self::new(source, base))
    }

    pub fn base(&self) -> BaseReference {
        self.base
    }

    pub fn snapshot(&self) -> Rc<DimensionSnapshot> {
        self.shared.current()
    }

    pub fn functions(&self) -> DimensionFunctions {
        DimensionFunctions::new(*self.shared.current())
    }

    /// Replaces the snapshot with new viewport sizes and publishes it. The base is kept.
    pub fn on_change(&self, window: ViewportSize, screen: ViewportSize) {
        self.shared.replace(window, screen);
    }

    /// Registers a consumer that is called with every published snapshot.
    pub fn watch(&self, listener: impl FnMut(&DimensionSnapshot) + 'static) -> Subscription {
        let id = self.shared.next_listener_id.get();
        self.shared.next_listener_id.set(id + 1);
        let listener: SnapshotListener = Rc::new(RefCell::new(listener));
        self.shared.listeners.borrow_mut().push((id, listener));

        let weak = Rc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared
                    .listeners
                    .borrow_mut()
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    pub fn context(&self) -> DimensionsContext {
        DimensionsContext {
            provider: Some(Rc::downgrade(&self.shared)),
        }
    }
}

impl Drop for DimensionsProvider {
    fn drop(&mut self) {
        tracing::debug!("dimensions provider torn down");
    }
}

impl fmt::Debug for DimensionsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionsProvider")
            .field("snapshot", &*self.shared.current())
            .field("listeners", &self.shared.listeners.borrow().len())
            .finish()
    }
}

/// Handle through which consumers reach the provider that owns them.
///
/// A default context is bound to nothing; reading through it, or through a context whose
/// provider has been dropped, fails with [`DimensionsError::NotInitialized`].
#[derive(Clone, Default)]
pub struct DimensionsContext {
    provider: Option<Weak<ProviderShared>>,
}

impl DimensionsContext {
    pub fn current(&self) -> DimensionsResult<Rc<DimensionSnapshot>> {
        self.provider
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|shared| shared.current())
            .ok_or(DimensionsError::NotInitialized)
    }

    pub fn is_bound(&self) -> bool {
        self.provider
            .as_ref()
            .is_some_and(|provider| provider.strong_count() > 0)
    }
}

impl fmt::Debug for DimensionsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionsContext")
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Calculation set for the context's current snapshot.
pub fn use_dimensions(context: &DimensionsContext) -> DimensionsResult<DimensionFunctions> {
    let snapshot = context.current()?;
    Ok(DimensionFunctions::new(*snapshot))
}
