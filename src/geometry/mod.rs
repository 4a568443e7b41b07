//! Handle geometry
//!
//! 1. [`trig`] - stateless angle and distance helpers
//! 2. [`bounding`] - clamping of raw offsets and the effective radius

pub mod bounding;
pub mod trig;

pub use bounding::{
    bound_offset, effective_radius, BoundedOffset, BoundingModel, BoundingOptions, Layout,
    Pressure,
};
