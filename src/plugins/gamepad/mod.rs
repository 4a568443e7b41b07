//! Hardware gamepad input
//!
//! The gamepad is polled on frame ticks. A stick reading inside the deadzone
//! on both axes counts as neutral; any live axis drives the handle to
//! `reading × radius`. Polling stops while the gamepad is missing and resumes
//! once it connects again.

pub mod scheduler;
pub mod source;

pub use scheduler::{PollScheduler, PollingModel};
pub use source::{GamepadSource, ScriptedGamepad};

#[cfg(feature = "gilrs")]
pub use source::GilrsSource;

use super::JoystickPlugin;
use crate::joystick::{Channel, InputEvent, JoystickContext, JoystickError};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum GamepadError {
    #[error("Failed to initialize gamepad backend: {0}")]
    Initialization(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GamepadOptions {
    /// Axis forwarded as X, 0 is usually the left stick
    pub x_index: usize,
    /// Axis forwarded as Y, 1 is usually the left stick
    pub y_index: usize,
    /// Which connected gamepad to read
    pub index: usize,
    pub polling_model: PollingModel,
    /// Axis magnitude below which the stick is neutral
    pub deadzone_percent: f64,
}

impl Default for GamepadOptions {
    fn default() -> Self {
        Self {
            x_index: 0,
            y_index: 1,
            index: 0,
            polling_model: PollingModel::Frame,
            deadzone_percent: 0.05,
        }
    }
}

pub struct GamepadPlugin<S: GamepadSource> {
    options: GamepadOptions,
    source: S,
    scheduler: PollScheduler,
}

impl<S: GamepadSource> GamepadPlugin<S> {
    pub fn new(source: S, options: GamepadOptions) -> Self {
        let scheduler = PollScheduler::new(options.polling_model);
        Self {
            options,
            source,
            scheduler,
        }
    }

    pub fn options(&self) -> &GamepadOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_polling(&self) -> bool {
        self.scheduler.is_running()
    }

    fn on_connected(&mut self, index: usize) {
        if index == self.options.index && !self.scheduler.is_running() {
            info!("Gamepad {} connected, resuming polling", index);
            self.scheduler.start();
        }
    }

    fn poll(&mut self, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        for index in self.source.drain_connected() {
            self.on_connected(index);
        }

        if !self.scheduler.due(ctx.now_ms()) {
            return Ok(());
        }

        let Some(axes) = self.source.axes(self.options.index) else {
            info!("Gamepad {} not connected, polling stopped", self.options.index);
            self.scheduler.stop();
            return Ok(());
        };

        let axis = |i: usize| axes.get(i).copied().map(f64::from).unwrap_or(0.0);
        let reading = Point::new(axis(self.options.x_index), axis(self.options.y_index));
        self.apply(reading, ctx)
    }

    fn apply(&self, reading: Point, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        if !ctx.is_interactive() {
            return Ok(());
        }
        let deadzone = self.options.deadzone_percent;
        let dead_x = reading.x.abs() < deadzone;
        let dead_y = reading.y.abs() < deadzone;

        if !dead_x || !dead_y {
            if reading == ctx.anchor() && ctx.is_dragging() {
                return Ok(());
            }

            let radius = ctx.radius()?;
            debug!("Gamepad reading ({:.3}, {:.3})", reading.x, reading.y);
            ctx.begin_drag(reading);
            ctx.set_should_transition(false);
            ctx.request_move(Vec2::new(reading.x * radius, reading.y * radius))
        } else {
            if ctx.is_dragging() {
                ctx.end_drag();
            }
            Ok(())
        }
    }
}

impl<S: GamepadSource> JoystickPlugin for GamepadPlugin<S> {
    fn name(&self) -> &'static str {
        "gamepad"
    }

    fn start(&mut self, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        info!(
            "Starting gamepad polling for gamepad {} ({:?})",
            self.options.index, self.options.polling_model
        );
        self.scheduler.start();
        ctx.listen(Channel::Frame);
        ctx.listen(Channel::GamepadConnected);
        Ok(())
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut JoystickContext<'_>,
    ) -> Result<(), JoystickError> {
        match event {
            InputEvent::Frame => self.poll(ctx),
            InputEvent::GamepadConnected { index } => {
                self.on_connected(*index);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn stop(&mut self, _ctx: &mut JoystickContext<'_>) {
        self.scheduler.stop();
    }
}
