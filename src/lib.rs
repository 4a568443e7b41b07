//! Headless on-screen joystick
//!
//! The crate turns pointer, mouse, touch, keyboard, gamepad and pointer-lock
//! input into a bounded handle offset plus a stream of [`MoveEvent`]s. It does
//! no rendering itself: a host measures the base and handle, feeds raw device
//! input into [`Joystick::handle_input`] and draws the handle at
//! [`Joystick::offset`].

pub mod config;
pub mod geometry;
pub mod joystick;
pub mod plugins;
pub mod runner;

pub use config::{AppConfig, ConfigError, JoystickSettings, RunnerSettings};
pub use geometry::{BoundingModel, Layout};
pub use joystick::{InputEvent, Joystick, JoystickError, LockEvent, MoveEvent, Phase};
pub use runner::{JoystickCommand, JoystickHandle};
