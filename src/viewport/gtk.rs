use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::gdk;
use gtk4::glib::SignalHandlerId;
use gtk4::prelude::*;
use gtk4::ApplicationWindow;

use super::{ChangeHandler, Subscription, ViewportSource};
use crate::geometry::{DimensionType, ViewportSize};

/// Reads the window from an `ApplicationWindow` and the screen from the monitor
/// currently showing it.
///
/// Changes are picked up from the window's default size and maximized/fullscreened
/// state, from surface layouts (which also cover compositor tiling), from the surface
/// entering another monitor, and from monitor hotplug or geometry changes.
#[derive(Debug, Clone)]
pub struct GtkViewportSource {
    window: ApplicationWindow,
}

impl GtkViewportSource {
    pub fn new(window: &ApplicationWindow) -> Self {
        Self {
            window: window.clone(),
        }
    }
}

impl ViewportSource for GtkViewportSource {
    fn size(&self, kind: DimensionType) -> ViewportSize {
        match kind {
            DimensionType::Window => window_size(&self.window),
            DimensionType::Screen => screen_size(&self.window),
        }
    }

    fn subscribe(&self, handler: ChangeHandler) -> Subscription {
        let gate = SizeGate::new(window_size(&self.window), screen_size(&self.window));
        let handler = RefCell::new(handler);
        let weak_window = self.window.downgrade();
        let emit: Rc<dyn Fn()> = Rc::new(move || {
            let Some(window) = weak_window.upgrade() else {
                return;
            };
            let window_size = window_size(&window);
            let screen_size = screen_size(&window);
            if !gate.admit(window_size, screen_size) {
                return;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (&mut **handler)(window_size, screen_size),
                Err(_) => tracing::warn!("re-entrant window resize notification ignored"),
            }
        });

        let surface_handlers: SharedHandlers<gdk::Surface> = Rc::default();
        if let Some(surface) = self.window.surface() {
            watch_surface(&surface, &emit, &surface_handlers);
        }

        let monitor_handlers: SharedHandlers<gdk::Monitor> = Rc::default();
        let monitors = WidgetExt::display(&self.window).monitors();
        watch_monitors(&monitors, &emit, &monitor_handlers);

        let window_handlers = vec![
            self.window.connect_default_width_notify(forward(&emit)),
            self.window.connect_default_height_notify(forward(&emit)),
            self.window.connect_maximized_notify(forward(&emit)),
            self.window.connect_fullscreened_notify(forward(&emit)),
            {
                let emit = Rc::clone(&emit);
                let surface_handlers = Rc::clone(&surface_handlers);
                self.window.connect_realize(move |window| {
                    if let Some(surface) = window.surface() {
                        watch_surface(&surface, &emit, &surface_handlers);
                    }
                    emit();
                })
            },
        ];
        let items_changed = {
            let emit = Rc::clone(&emit);
            let monitor_handlers = Rc::clone(&monitor_handlers);
            monitors.connect_items_changed(move |monitors, _, _, _| {
                watch_monitors(monitors, &emit, &monitor_handlers);
                emit();
            })
        };

        let window = self.window.downgrade();
        Subscription::new(move || {
            if let Some(window) = window.upgrade() {
                for handler_id in window_handlers {
                    window.disconnect(handler_id);
                }
            }
            monitors.disconnect(items_changed);
            disconnect_all(&surface_handlers);
            disconnect_all(&monitor_handlers);
            tracing::debug!("window resize handlers disconnected");
        })
    }
}

type SharedHandlers<T> = Rc<RefCell<Vec<(T, SignalHandlerId)>>>;

/// Drops notifications that leave both sizes unchanged; surface layouts fire far more
/// often than the size actually moves.
struct SizeGate {
    last: Cell<(ViewportSize, ViewportSize)>,
}

impl SizeGate {
    fn new(window: ViewportSize, screen: ViewportSize) -> Self {
        Self {
            last: Cell::new((window, screen)),
        }
    }

    fn admit(&self, window: ViewportSize, screen: ViewportSize) -> bool {
        if self.last.get() == (window, screen) {
            return false;
        }
        self.last.set((window, screen));
        true
    }
}

fn forward<T>(emit: &Rc<dyn Fn()>) -> impl Fn(&T) + 'static {
    let emit = Rc::clone(emit);
    move |_| emit()
}

fn watch_surface(
    surface: &gdk::Surface,
    emit: &Rc<dyn Fn()>,
    handlers: &SharedHandlers<gdk::Surface>,
) {
    disconnect_all(handlers);
    let layout = {
        let emit = Rc::clone(emit);
        surface.connect_layout(move |_, _, _| emit())
    };
    let enter_monitor = {
        let emit = Rc::clone(emit);
        surface.connect_enter_monitor(move |_, _| emit())
    };
    handlers.borrow_mut().extend([
        (surface.clone(), layout),
        (surface.clone(), enter_monitor),
    ]);
}

fn watch_monitors(
    monitors: &gtk4::gio::ListModel,
    emit: &Rc<dyn Fn()>,
    handlers: &SharedHandlers<gdk::Monitor>,
) {
    disconnect_all(handlers);
    let mut watched = Vec::new();
    for index in 0..monitors.n_items() {
        let Some(item) = monitors.item(index) else {
            continue;
        };
        let Ok(monitor) = item.downcast::<gdk::Monitor>() else {
            continue;
        };
        let handler_id = monitor.connect_geometry_notify(forward(emit));
        watched.push((monitor, handler_id));
    }
    handlers.borrow_mut().extend(watched);
}

fn disconnect_all<T: IsA<gtk4::glib::Object>>(handlers: &SharedHandlers<T>) {
    for (object, handler_id) in handlers.borrow_mut().drain(..) {
        object.disconnect(handler_id);
    }
}

fn window_size(window: &ApplicationWindow) -> ViewportSize {
    let width = if window.width() > 0 {
        window.width()
    } else {
        window.default_width()
    };
    let height = if window.height() > 0 {
        window.height()
    } else {
        window.default_height()
    };
    ViewportSize::new(f64::from(width.max(1)), f64::from(height.max(1)))
}

fn screen_size(window: &ApplicationWindow) -> ViewportSize {
    let display = WidgetExt::display(window);
    let monitor = window
        .surface()
        .and_then(|surface| display.monitor_at_surface(&surface))
        .or_else(|| {
            display
                .monitors()
                .item(0)
                .and_then(|item| item.downcast::<gdk::Monitor>().ok())
        });

    match monitor {
        Some(monitor) => {
            let geometry = monitor.geometry();
            ViewportSize::new(
                f64::from(geometry.width().max(1)),
                f64::from(geometry.height().max(1)),
            )
        }
        None => {
            tracing::warn!("no monitor available; reporting window size as screen size");
            window_size(window)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_gate_admits_only_real_changes() {
        let portrait = ViewportSize::new(393.0, 852.0);
        let tiled = ViewportSize::new(1280.0, 1400.0);
        let screen = ViewportSize::new(2560.0, 1440.0);
        let gate = SizeGate::new(portrait, screen);

        assert!(!gate.admit(portrait, screen));
        assert!(gate.admit(tiled, screen));
        assert!(!gate.admit(tiled, screen));
        assert!(gate.admit(tiled, ViewportSize::new(1440.0, 2560.0)));
        assert!(gate.admit(portrait, screen));
    }
}
