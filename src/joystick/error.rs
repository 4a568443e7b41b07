use crate::config::ConfigError;
use crate::plugins::gamepad::GamepadError;

/// Errors raised by the joystick shell, its plugins and the runner
#[derive(Debug, thiserror::Error)]
pub enum JoystickError {
    /// The radius was requested before the base and handle were measured
    ///
    /// Call [`Joystick::set_layout`](crate::Joystick::set_layout) once the host
    /// knows both sizes. Inputs that need the radius are dropped until then.
    #[error("Layout not measured: base and handle sizes are required to compute the radius")]
    LayoutNotMeasured,

    #[error("Gamepad error: {0}")]
    Gamepad(#[from] GamepadError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Runner error: {0}")]
    Runner(String),
}
