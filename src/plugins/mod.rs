//! Input plugins
//!
//! A plugin owns one class of input device. It translates raw device events
//! into handle deltas and keeps its own drag slot up to date, talking to the
//! joystick only through the [`JoystickContext`] it receives on every call.
//!
//! # Lifecycle
//!
//! ```text
//! Joystick::start ──► start(ctx)          attach initial listeners
//!        │
//! handle_input ─────► handle_input(ev, ctx)  only for channels it listens on
//!        │
//! Joystick::stop ───► stop(ctx)           release resources, listeners swept
//! ```

pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod pointer;
pub mod pointer_lock;
mod press_drag;
pub mod touch;

pub use gamepad::GamepadPlugin;
pub use keyboard::KeyboardPlugin;
pub use mouse::MousePlugin;
pub use pointer::PointerPlugin;
pub use pointer_lock::PointerLockPlugin;
pub use touch::MultiTouchPlugin;

use crate::joystick::{InputEvent, JoystickContext, JoystickError};

pub trait JoystickPlugin: Send + 'static {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Called once when the joystick starts; attach the listeners the plugin
    /// needs from the beginning.
    fn start(&mut self, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError>;

    /// Called for every event on a channel this plugin listens on.
    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut JoystickContext<'_>,
    ) -> Result<(), JoystickError>;

    /// Called once when the joystick stops. Listeners are detached by the
    /// joystick afterwards.
    fn stop(&mut self, _ctx: &mut JoystickContext<'_>) {}
}
