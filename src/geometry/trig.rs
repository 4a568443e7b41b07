//! Trigonometry helpers for the handle geometry
//!
//! All angles follow screen coordinates: Y grows downward, so the Y component
//! is negated before `atan2` and "up" reads as 90°.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Length of the vector `(x, y)`.
pub fn hypotenuse(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

/// Angle of `(x, y)` in radians, normalized into `[0, 2π)`.
pub fn angle_radians(x: f64, y: f64) -> f64 {
    // adding +0.0 turns the -0.0 of atan2(-0.0, x) into +0.0
    let inverse_tan = (-y).atan2(x) + 0.0;
    if inverse_tan >= 0.0 {
        return inverse_tan;
    }

    // tiny negative angles round up to exactly 2π
    let wrapped = inverse_tan + TAU;
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// X coordinate on the circle of `radius` along the ray at `angle_radians`.
pub fn max_x_at_radius(angle_radians: f64, radius: f64) -> f64 {
    (angle_radians + FRAC_PI_2).sin() * radius
}

/// Y coordinate on the circle of `radius` along the ray at `angle_radians`.
pub fn max_y_at_radius(angle_radians: f64, radius: f64) -> f64 {
    (angle_radians + FRAC_PI_2).cos() * radius
}
