//! Bounding engine
//!
//! Turns a raw handle offset into the offset that is actually rendered, given
//! the effective radius of the base and the configured [`BoundingModel`].
//!
//! ```text
//! raw offset ──► axis filter ──► distance/angle ──► clamp? ──► BoundedOffset
//!                (disable_x/y)                     (radius)
//! ```

use super::trig;
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// How the handle's own size takes part in the travel radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundingModel {
    /// The far edge of the handle stays inside the base
    Inner,
    /// The handle center stays inside the base
    #[default]
    Center,
    /// The near edge of the handle stays inside the base
    Outer,
    /// No clamping at all
    None,
}

impl Display for BoundingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundingModel::Inner => write!(f, "inner"),
            BoundingModel::Center => write!(f, "center"),
            BoundingModel::Outer => write!(f, "outer"),
            BoundingModel::None => write!(f, "none"),
        }
    }
}

/// Measured sizes of the base and the handle, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub base: Size,
    pub handle: Size,
}

impl Layout {
    pub fn new(base: Size, handle: Size) -> Self {
        Self { base, handle }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            base: Size::new(200.0, 200.0),
            handle: Size::new(60.0, 60.0),
        }
    }
}

/// Effective travel radius for a measured layout.
///
/// `base.width / 2 + boundary_modifier`, minus half the larger handle
/// dimension for [`BoundingModel::Inner`] and plus it for
/// [`BoundingModel::Outer`]. Never negative: a handle too large for its base
/// under [`BoundingModel::Inner`] leaves no travel at all.
pub fn effective_radius(layout: &Layout, model: BoundingModel, boundary_modifier: f64) -> f64 {
    let handle_edge = layout.handle.width.max(layout.handle.height) / 2.0;
    let edge_adjustment = match model {
        BoundingModel::Inner => -handle_edge,
        BoundingModel::Outer => handle_edge,
        BoundingModel::Center | BoundingModel::None => 0.0,
    };
    (layout.base.width / 2.0 + boundary_modifier + edge_adjustment).max(0.0)
}

/// Per-call options for [`bound_offset`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingOptions {
    pub model: BoundingModel,
    pub disable_x: bool,
    pub disable_y: bool,
}

/// Distance of the handle from the base center
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pressure {
    pub pixels: f64,
    pub percentage: f64,
}

/// Result of bounding a raw offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedOffset {
    pub offset: Vec2,
    pub angle_radians: f64,
    pub pressure: Pressure,
    /// The raw offset reached or passed the radius and was pulled back
    pub clamped: bool,
}

/// Clamps `raw` to `radius` under the given options.
pub fn bound_offset(raw: Vec2, radius: f64, options: &BoundingOptions) -> BoundedOffset {
    let x = if options.disable_x { 0.0 } else { raw.x };
    let y = if options.disable_y { 0.0 } else { raw.y };

    let distance = trig::hypotenuse(x, y);
    let angle_radians = trig::angle_radians(x, y);
    let unbounded = options.model == BoundingModel::None;

    let clamped = !unbounded && distance >= radius;
    let offset = if clamped {
        Vec2::new(
            if options.disable_x {
                0.0
            } else {
                trig::max_x_at_radius(angle_radians, radius)
            },
            if options.disable_y {
                0.0
            } else {
                trig::max_y_at_radius(angle_radians, radius)
            },
        )
    } else {
        Vec2::new(x, y)
    };

    let over = !unbounded && distance > radius;
    let pressure = if over {
        Pressure {
            pixels: radius,
            percentage: 100.0,
        }
    } else {
        Pressure {
            pixels: distance,
            percentage: percentage_of(distance, radius).abs(),
        }
    };

    BoundedOffset {
        offset,
        angle_radians,
        pressure,
        clamped,
    }
}

/// `value / radius * 100`, 0 for a degenerate radius.
pub(crate) fn percentage_of(value: f64, radius: f64) -> f64 {
    if radius == 0.0 {
        0.0
    } else {
        value / radius * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn options(model: BoundingModel) -> BoundingOptions {
        BoundingOptions {
            model,
            ..Default::default()
        }
    }

    #[test]
    fn test_center_clamps_to_radius() {
        let bounded = bound_offset(Vec2::new(150.0, 0.0), 100.0, &options(BoundingModel::Center));

        assert!((bounded.offset.x - 100.0).abs() < EPSILON);
        assert!(bounded.offset.y.abs() < EPSILON);
        assert_eq!(bounded.angle_radians, 0.0);
        assert_eq!(bounded.pressure.pixels, 100.0);
        assert_eq!(bounded.pressure.percentage, 100.0);
        assert!(bounded.clamped);
    }

    #[test]
    fn test_none_never_clamps() {
        let bounded = bound_offset(Vec2::new(150.0, 0.0), 100.0, &options(BoundingModel::None));

        assert_eq!(bounded.offset, Vec2::new(150.0, 0.0));
        assert_eq!(bounded.pressure.pixels, 150.0);
        assert!((bounded.pressure.percentage - 150.0).abs() < EPSILON);
        assert!(!bounded.clamped);
    }

    #[test]
    fn test_inside_radius_passes_through() {
        for model in [
            BoundingModel::Inner,
            BoundingModel::Center,
            BoundingModel::Outer,
        ] {
            let bounded = bound_offset(Vec2::new(30.0, -40.0), 100.0, &options(model));
            assert_eq!(bounded.offset, Vec2::new(30.0, -40.0));
            assert!((bounded.pressure.pixels - 50.0).abs() < EPSILON);
            assert!((bounded.pressure.percentage - 50.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_outside_radius_lands_on_circle() {
        let raws = [
            Vec2::new(300.0, 400.0),
            Vec2::new(-120.0, 5.0),
            Vec2::new(0.0, -101.0),
            Vec2::new(-80.0, -80.0),
        ];
        for raw in raws {
            let bounded = bound_offset(raw, 100.0, &options(BoundingModel::Center));
            assert!((bounded.offset.hypot() - 100.0).abs() < 1e-6);
            assert_eq!(bounded.pressure.percentage, 100.0);
            // still pointing the same way
            assert!(bounded.offset.dot(raw) > 0.0);
        }
    }

    #[test]
    fn test_disabled_x_is_zeroed_before_measuring() {
        let options = BoundingOptions {
            model: BoundingModel::Center,
            disable_x: true,
            disable_y: false,
        };

        // (80, 60) is outside 90 but (0, 60) is not
        let bounded = bound_offset(Vec2::new(80.0, 60.0), 90.0, &options);
        assert_eq!(bounded.offset, Vec2::new(0.0, 60.0));
        assert!(!bounded.clamped);

        let bounded = bound_offset(Vec2::new(80.0, 160.0), 90.0, &options);
        assert_eq!(bounded.offset.x, 0.0);
        assert!((bounded.offset.y - 90.0).abs() < 1e-6);
        assert!((bounded.angle_radians - 3.0 * PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_disabled_y() {
        let options = BoundingOptions {
            model: BoundingModel::Inner,
            disable_x: false,
            disable_y: true,
        };
        let bounded = bound_offset(Vec2::new(-250.0, 42.0), 100.0, &options);
        assert!((bounded.offset.x + 100.0).abs() < 1e-6);
        assert_eq!(bounded.offset.y, 0.0);
    }

    #[test]
    fn test_exact_radius_counts_as_full_pressure() {
        let bounded = bound_offset(Vec2::new(0.0, 100.0), 100.0, &options(BoundingModel::Center));
        assert!((bounded.offset.hypot() - 100.0).abs() < 1e-6);
        assert_eq!(bounded.pressure.pixels, 100.0);
        assert_eq!(bounded.pressure.percentage, 100.0);
    }

    #[test]
    fn test_zero_radius_does_not_produce_nan() {
        let bounded = bound_offset(Vec2::ZERO, 0.0, &options(BoundingModel::None));
        assert_eq!(bounded.pressure.percentage, 0.0);
        assert_eq!(bounded.offset, Vec2::ZERO);
    }

    #[test]
    fn test_effective_radius_per_model() {
        let layout = Layout::new(Size::new(200.0, 180.0), Size::new(40.0, 60.0));

        assert_eq!(effective_radius(&layout, BoundingModel::Center, 0.0), 100.0);
        assert_eq!(effective_radius(&layout, BoundingModel::None, 0.0), 100.0);
        assert_eq!(effective_radius(&layout, BoundingModel::Inner, 0.0), 70.0);
        assert_eq!(effective_radius(&layout, BoundingModel::Outer, 0.0), 130.0);
        assert_eq!(effective_radius(&layout, BoundingModel::Inner, 5.0), 75.0);
        assert_eq!(effective_radius(&layout, BoundingModel::Center, -20.0), 80.0);
    }

    #[test]
    fn test_oversized_handle_leaves_no_travel() {
        let layout = Layout::new(Size::new(40.0, 40.0), Size::new(60.0, 60.0));
        let radius = effective_radius(&layout, BoundingModel::Inner, 0.0);
        assert_eq!(radius, 0.0);
        assert_eq!(effective_radius(&Layout::default(), BoundingModel::Center, -500.0), 0.0);

        let bounded = bound_offset(Vec2::new(5.0, 0.0), radius, &options(BoundingModel::Inner));
        assert!(bounded.offset.x.abs() < 1e-9);
        assert!(bounded.offset.y.abs() < 1e-9);
        assert!(bounded.pressure.pixels >= 0.0);
    }

    #[test]
    fn test_bounding_model_names() {
        assert_eq!(BoundingModel::default(), BoundingModel::Center);
        assert_eq!(BoundingModel::Outer.to_string(), "outer");
    }
}
