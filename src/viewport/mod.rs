#[cfg(feature = "gtk")]
mod gtk;
mod provider;
mod source;
mod subscription;

#[cfg(feature = "gtk")]
pub use gtk::GtkViewportSource;
pub use provider::{use_dimensions, DimensionsContext, DimensionsProvider};
pub use source::{ChangeHandler, ManualViewportSource, ViewportSource};
pub use subscription::Subscription;
