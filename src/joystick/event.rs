//! Events flowing into and out of the joystick

use crate::geometry::{bounding, trig, BoundedOffset, Pressure};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Handle offset in pixels and relative to the radius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OffsetReport {
    pub pixels: Vec2,
    /// Each axis divided by the radius
    pub percentage: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Angle {
    pub radians: f64,
    pub degrees: f64,
}

impl Angle {
    pub fn from_radians(radians: f64) -> Self {
        Self {
            radians,
            degrees: trig::radians_to_degrees(radians),
        }
    }
}

/// The data forwarded to the consumer whenever the handle moves
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveEvent {
    pub offset: OffsetReport,
    pub angle: Angle,
    pub pressure: Pressure,
}

impl MoveEvent {
    /// Canonical event for a centered handle
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_bounded(bounded: &BoundedOffset, radius: f64) -> Self {
        Self {
            offset: OffsetReport {
                pixels: bounded.offset,
                percentage: Vec2::new(
                    ratio(bounded.offset.x, radius),
                    ratio(bounded.offset.y, radius),
                ),
            },
            angle: Angle::from_radians(bounded.angle_radians),
            pressure: bounded.pressure,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

fn ratio(value: f64, radius: f64) -> f64 {
    bounding::percentage_of(value, radius) / 100.0
}

impl Display for MoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "offset:({:.1},{:.1}) angle:{:.1}° pressure:{:.1}px/{:.0}%",
            self.offset.pixels.x,
            self.offset.pixels.y,
            self.angle.degrees,
            self.pressure.pixels,
            self.pressure.percentage
        )
    }
}

/// Press / move / release phase of a pointer-like device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Down,
    Move,
    Up,
}

/// Pointer-lock state changes and relative motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LockEvent {
    Engaged,
    Released,
    Movement(Vec2),
}

/// Key identifier, e.g. `KeyW` or `ArrowUp`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub String);

impl KeyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw device input delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Unified pointer (mouse or single touch) in client coordinates
    Pointer { phase: Phase, position: Point },
    Mouse { phase: Phase, position: Point },
    /// Touches currently on the handle, first one drives the drag
    Touch { phase: Phase, touches: Vec<Point> },
    Key { pressed: bool, code: KeyCode },
    PointerLock(LockEvent),
    GamepadConnected { index: usize },
    /// Animation-frame heartbeat
    Frame,
}

impl InputEvent {
    pub fn channel(&self) -> Channel {
        match self {
            InputEvent::Pointer { phase, .. } => match phase {
                Phase::Down => Channel::PointerDown,
                Phase::Move => Channel::PointerMove,
                Phase::Up => Channel::PointerUp,
            },
            InputEvent::Mouse { phase, .. } => match phase {
                Phase::Down => Channel::MouseDown,
                Phase::Move => Channel::MouseMove,
                Phase::Up => Channel::MouseUp,
            },
            InputEvent::Touch { phase, .. } => match phase {
                Phase::Down => Channel::TouchStart,
                Phase::Move => Channel::TouchMove,
                Phase::Up => Channel::TouchEnd,
            },
            InputEvent::Key { pressed: true, .. } => Channel::KeyDown,
            InputEvent::Key { pressed: false, .. } => Channel::KeyUp,
            InputEvent::PointerLock(_) => Channel::PointerLock,
            InputEvent::GamepadConnected { .. } => Channel::GamepadConnected,
            InputEvent::Frame => Channel::Frame,
        }
    }
}

/// Input class a plugin can listen on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    PointerDown,
    PointerMove,
    PointerUp,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    KeyDown,
    KeyUp,
    PointerLock,
    GamepadConnected,
    Frame,
}
