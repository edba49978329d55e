//! Calculation set bound to a single [`DimensionSnapshot`].
//!
//! Every operation is plain `f64` arithmetic on the captured snapshot. Inputs are not
//! range-checked: negative or oversized percentages scale proportionally, and NaN or
//! infinite inputs (including a zero base dimension) propagate per IEEE-754.

use crate::geometry::{DimensionSnapshot, DimensionType, ViewportSize};

mod diagonal;

pub use diagonal::percentage_of_diagonal;

/// Overrides for the responsive helpers. Unset bases fall back to the snapshot's.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleOptions {
    pub base_width: Option<f64>,
    pub base_height: Option<f64>,
    pub dimension_type: DimensionType,
}

impl ScaleOptions {
    pub const fn new() -> Self {
        Self {
            base_width: None,
            base_height: None,
            dimension_type: DimensionType::Window,
        }
    }

    pub const fn with_base_width(mut self, base_width: f64) -> Self {
        self.base_width = Some(base_width);
        self
    }

    pub const fn with_base_height(mut self, base_height: f64) -> Self {
        self.base_height = Some(base_height);
        self
    }

    pub const fn with_dimension_type(mut self, dimension_type: DimensionType) -> Self {
        self.dimension_type = dimension_type;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionFunctions {
    snapshot: DimensionSnapshot,
}

impl DimensionFunctions {
    pub const fn new(snapshot: DimensionSnapshot) -> Self {
        Self { snapshot }
    }

    pub const fn snapshot(&self) -> &DimensionSnapshot {
        &self.snapshot
    }

    pub const fn window(&self) -> ViewportSize {
        self.snapshot.window
    }

    pub const fn screen(&self) -> ViewportSize {
        self.snapshot.screen
    }

    /// `percentage` of the chosen viewport's width.
    pub fn viewport_width(&self, percentage: f64, dimension_type: DimensionType) -> f64 {
        let chosen = self.snapshot.size_for(dimension_type);
        (chosen.width * percentage) / 100.0
    }

    /// `percentage` of the chosen viewport's height.
    pub fn viewport_height(&self, percentage: f64, dimension_type: DimensionType) -> f64 {
        let chosen = self.snapshot.size_for(dimension_type);
        (chosen.height * percentage) / 100.0
    }

    pub fn screen_width(&self, percentage: f64) -> f64 {
        self.viewport_width(percentage, DimensionType::Screen)
    }

    pub fn screen_height(&self, percentage: f64) -> f64 {
        self.viewport_height(percentage, DimensionType::Screen)
    }

    pub fn diagonal_percentage(&self, percentage: f64, dimension_type: DimensionType) -> f64 {
        let chosen = self.snapshot.size_for(dimension_type);
        percentage_of_diagonal(chosen.width, chosen.height, percentage)
    }

    /// Scales `value` by the ratio of the chosen viewport width to the base width.
    pub fn responsive_width(&self, value: f64, options: ScaleOptions) -> f64 {
        let chosen = self.snapshot.size_for(options.dimension_type);
        let base_width = options.base_width.unwrap_or(self.snapshot.base_width);
        (chosen.width / base_width) * value
    }

    /// Scales `value` by the ratio of the chosen viewport height to the base height.
    pub fn responsive_height(&self, value: f64, options: ScaleOptions) -> f64 {
        let chosen = self.snapshot.size_for(options.dimension_type);
        let base_height = options.base_height.unwrap_or(self.snapshot.base_height);
        (chosen.height / base_height) * value
    }

    /// Width-based scaling when the base canvas is proportionally wider than the
    /// device, height-based otherwise. Equal ratios take the height path.
    pub fn responsive_aspect_ratio(&self, value: f64, options: ScaleOptions) -> f64 {
        let chosen = self.snapshot.size_for(options.dimension_type);
        let base_width = options.base_width.unwrap_or(self.snapshot.base_width);
        let base_height = options.base_height.unwrap_or(self.snapshot.base_height);

        let device_ratio = chosen.width / chosen.height;
        let base_ratio = base_width / base_height;
        let resolved = options
            .with_base_width(base_width)
            .with_base_height(base_height);

        if base_ratio > device_ratio {
            self.responsive_width(value, resolved)
        } else {
            self.responsive_height(value, resolved)
        }
    }

    pub fn vw(&self, percentage: f64) -> f64 {
        self.viewport_width(percentage, DimensionType::Window)
    }

    pub fn vh(&self, percentage: f64) -> f64 {
        self.viewport_height(percentage, DimensionType::Window)
    }

    pub fn sw(&self, percentage: f64) -> f64 {
        self.screen_width(percentage)
    }

    pub fn sh(&self, percentage: f64) -> f64 {
        self.screen_height(percentage)
    }

    pub fn dg(&self, percentage: f64) -> f64 {
        self.diagonal_percentage(percentage, DimensionType::Window)
    }

    pub fn rw(&self, value: f64) -> f64 {
        self.responsive_width(value, ScaleOptions::new())
    }

    pub fn rh(&self, value: f64) -> f64 {
        self.responsive_height(value, ScaleOptions::new())
    }

    pub fn ra(&self, value: f64) -> f64 {
        self.responsive_aspect_ratio(value, ScaleOptions::new())
    }
}

impl From<DimensionSnapshot> for DimensionFunctions {
    fn from(snapshot: DimensionSnapshot) -> Self {
        Self::new(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseReference;

    fn functions(window: (f64, f64), screen: (f64, f64)) -> DimensionFunctions {
        DimensionFunctions::new(DimensionSnapshot::new(
            ViewportSize::new(window.0, window.1),
            ViewportSize::new(screen.0, screen.1),
            BaseReference::default(),
        ))
    }

    #[test]
    fn viewport_width_and_height_are_percentages_of_the_chosen_viewport() {
        let dims = functions((390.0, 800.0), (400.0, 860.0));

        assert_eq!(dims.viewport_width(50.0, DimensionType::Window), 195.0);
        assert_eq!(dims.viewport_height(25.0, DimensionType::Window), 200.0);
        assert_eq!(dims.viewport_width(50.0, DimensionType::Screen), 200.0);
        assert_eq!(dims.viewport_height(50.0, DimensionType::Screen), 430.0);
        assert_eq!(dims.vw(10.0), 39.0);
        assert_eq!(dims.vh(10.0), 80.0);
    }

    #[test]
    fn viewport_width_is_monotonic_in_percentage() {
        let dims = functions((393.0, 852.0), (393.0, 852.0));
        let mut previous = dims.viewport_width(0.0, DimensionType::Window);
        for step in 1..=100_u32 {
            let percentage = f64::from(step);
            let current = dims.viewport_width(percentage, DimensionType::Window);
            assert_eq!(current, (393.0 * percentage) / 100.0);
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn screen_helpers_are_fixed_to_screen() {
        let dims = functions((390.0, 800.0), (400.0, 860.0));
        for percentage in [0.0, 12.5, 33.0, 100.0, 150.0] {
            assert_eq!(
                dims.screen_width(percentage),
                dims.viewport_width(percentage, DimensionType::Screen)
            );
            assert_eq!(
                dims.screen_height(percentage),
                dims.viewport_height(percentage, DimensionType::Screen)
            );
            assert_eq!(dims.sw(percentage), dims.screen_width(percentage));
            assert_eq!(dims.sh(percentage), dims.screen_height(percentage));
        }
    }

    #[test]
    fn diagonal_percentage_at_one_hundred_is_the_diagonal() {
        let dims = functions((160.0, 300.0), (400.0, 300.0));

        assert_eq!(dims.diagonal_percentage(100.0, DimensionType::Window), 340.0);
        assert_eq!(dims.diagonal_percentage(100.0, DimensionType::Screen), 375.0);
        assert_eq!(dims.dg(100.0), 340.0);
        assert_eq!(dims.dg(25.0), 85.0);
    }

    #[test]
    fn responsive_width_scales_linearly() {
        let dims = functions((430.0, 932.0), (430.0, 932.0));
        let options = ScaleOptions::new().with_base_width(215.0);

        for value in [1.0, 8.0, 16.0, 24.5] {
            assert_eq!(
                dims.responsive_width(2.0 * value, options),
                2.0 * dims.responsive_width(value, options)
            );
        }
        assert_eq!(dims.responsive_width(375.0, options), 750.0);
    }

    #[test]
    fn responsive_helpers_default_to_snapshot_base() {
        let dims = functions((393.0, 852.0), (786.0, 1704.0));

        assert_eq!(dims.rw(16.0), 16.0);
        assert_eq!(dims.rh(16.0), 16.0);
        assert_eq!(
            dims.responsive_width(
                16.0,
                ScaleOptions::new().with_dimension_type(DimensionType::Screen)
            ),
            32.0
        );
        assert_eq!(
            dims.responsive_height(
                16.0,
                ScaleOptions::new()
                    .with_base_height(426.0)
                    .with_dimension_type(DimensionType::Screen)
            ),
            64.0
        );
    }

    #[test]
    fn aspect_ratio_uses_height_when_device_is_wider_than_base() {
        let tall = functions((400.0, 800.0), (400.0, 800.0));
        assert_eq!(
            tall.responsive_aspect_ratio(20.0, ScaleOptions::new()),
            tall.responsive_height(20.0, ScaleOptions::new())
        );

        let landscape = functions((200.0, 100.0), (200.0, 100.0));
        assert_eq!(
            landscape.ra(20.0),
            landscape.responsive_height(20.0, ScaleOptions::new())
        );
    }

    #[test]
    fn aspect_ratio_uses_width_when_base_is_wider_than_device() {
        let narrow = functions((100.0, 300.0), (100.0, 300.0));
        let expected = narrow.responsive_width(20.0, ScaleOptions::new());

        assert_eq!(narrow.ra(20.0), expected);
        assert_ne!(expected, narrow.rh(20.0));
    }

    #[test]
    fn aspect_ratio_tie_goes_to_height() {
        let dims = functions((786.0, 1704.0), (786.0, 1704.0));
        let options = ScaleOptions::new()
            .with_base_width(393.0)
            .with_base_height(852.0);

        assert_eq!(
            dims.responsive_aspect_ratio(10.0, options),
            dims.responsive_height(10.0, options)
        );
    }

    #[test]
    fn aspect_ratio_honours_overrides_and_dimension_type() {
        let dims = functions((100.0, 300.0), (400.0, 800.0));
        let options = ScaleOptions::new()
            .with_base_width(200.0)
            .with_base_height(300.0)
            .with_dimension_type(DimensionType::Screen);

        // base 0.667 > device 0.5
        assert_eq!(dims.responsive_aspect_ratio(30.0, options), 60.0);
    }

    #[test]
    fn out_of_range_and_non_finite_inputs_are_plain_arithmetic() {
        let dims = functions((393.0, 852.0), (393.0, 852.0));

        assert_eq!(dims.vw(-50.0), -196.5);
        assert_eq!(dims.vw(200.0), 786.0);
        assert!(dims.vh(f64::NAN).is_nan());
        assert_eq!(dims.rw(f64::INFINITY), f64::INFINITY);
        assert_eq!(
            dims.responsive_width(10.0, ScaleOptions::new().with_base_width(0.0)),
            f64::INFINITY
        );
    }

    #[test]
    fn pass_through_exposes_raw_viewports() {
        let dims = functions((390.0, 800.0), (400.0, 860.0));
        assert_eq!(dims.window(), ViewportSize::new(390.0, 800.0));
        assert_eq!(dims.screen(), ViewportSize::new(400.0, 860.0));
    }
}
