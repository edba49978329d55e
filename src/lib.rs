//! Viewport-relative measurements and design-reference scaling for responsive layouts.
//!
//! A [`DimensionsProvider`] tracks the current `window` and `screen` sizes reported by a
//! [`ViewportSource`]. Consumers reach it through a [`DimensionsContext`] and call
//! [`use_dimensions`] to get a [`DimensionFunctions`] set bound to the latest snapshot.

pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod scale;
pub mod viewport;

pub use config::{load_base_reference, try_load_base_reference, BaseReference, ConfigError};
pub use error::{DimensionsError, DimensionsResult};
pub use geometry::{DimensionSnapshot, DimensionType, ViewportSize};
pub use scale::{percentage_of_diagonal, DimensionFunctions, ScaleOptions};
pub use viewport::{
    use_dimensions, ChangeHandler, DimensionsContext, DimensionsProvider, ManualViewportSource,
    Subscription, ViewportSource,
};
#[cfg(feature = "gtk")]
pub use viewport::GtkViewportSource;
