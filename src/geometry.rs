//! Viewport measurements and the snapshot threaded through the scaling helpers.

use serde::{Deserialize, Serialize};

use crate::config::BaseReference;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which viewport a calculation reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionType {
    /// The app's visible drawing area.
    #[default]
    Window,
    /// The full physical display.
    Screen,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionSnapshot {
    pub window: ViewportSize,
    pub screen: ViewportSize,
    pub base_width: f64,
    pub base_height: f64,
}

impl DimensionSnapshot {
    pub const fn new(window: ViewportSize, screen: ViewportSize, base: BaseReference) -> Self {
        Self {
            window,
            screen,
            base_width: base.base_width,
            base_height: base.base_height,
        }
    }

    pub const fn base(&self) -> BaseReference {
        BaseReference::new(self.base_width, self.base_height)
    }

    pub const fn size_for(&self, kind: DimensionType) -> ViewportSize {
        match kind {
            DimensionType::Window => self.window,
            DimensionType::Screen => self.screen,
        }
    }

    /// Same base, new viewport sizes.
    pub const fn with_sizes(&self, window: ViewportSize, screen: ViewportSize) -> Self {
        Self {
            window,
            screen,
            base_width: self.base_width,
            base_height: self.base_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_for_selects_window_or_screen() {
        let snapshot = DimensionSnapshot::new(
            ViewportSize::new(393.0, 800.0),
            ViewportSize::new(393.0, 852.0),
            BaseReference::default(),
        );

        assert_eq!(
            snapshot.size_for(DimensionType::Window),
            ViewportSize::new(393.0, 800.0)
        );
        assert_eq!(
            snapshot.size_for(DimensionType::Screen),
            ViewportSize::new(393.0, 852.0)
        );
        assert_eq!(DimensionType::default(), DimensionType::Window);
    }

    #[test]
    fn with_sizes_carries_base_over() {
        let snapshot = DimensionSnapshot::new(
            ViewportSize::new(393.0, 852.0),
            ViewportSize::new(393.0, 852.0),
            BaseReference::new(375.0, 812.0),
        );

        let rotated = snapshot.with_sizes(
            ViewportSize::new(852.0, 393.0),
            ViewportSize::new(852.0, 393.0),
        );

        assert_eq!(rotated.base(), BaseReference::new(375.0, 812.0));
        assert_eq!(rotated.window, ViewportSize::new(852.0, 393.0));
        assert_eq!(snapshot.window, ViewportSize::new(393.0, 852.0));
    }

    #[test]
    fn dimension_type_serializes_lowercase() {
        let json = serde_json::to_string(&DimensionType::Screen).expect("serialize kind");
        assert_eq!(json, "\"screen\"");

        let kind: DimensionType = serde_json::from_str("\"window\"").expect("parse kind");
        assert_eq!(kind, DimensionType::Window);
    }
}
