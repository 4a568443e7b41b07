//! Relative mouse input while the pointer is locked
//!
//! Suited to first-person style look controls: every movement report pushes
//! the handle by `movement × radius × 0.1`, and the handle drops back to the
//! center on the first frame tick without movement.

use super::JoystickPlugin;
use crate::joystick::{Channel, InputEvent, JoystickContext, JoystickError, LockEvent};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const MOVEMENT_SCALE: f64 = 0.1;

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PointerLockOptions {
    /// Hide the widget while the pointer is locked
    pub hide_on_lock: bool,
}

pub struct PointerLockPlugin {
    options: PointerLockOptions,
    locked: bool,
    moved_since_frame: bool,
}

impl PointerLockPlugin {
    pub fn new(options: PointerLockOptions) -> Self {
        Self {
            options,
            locked: false,
            moved_since_frame: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn engage(&mut self, ctx: &mut JoystickContext<'_>) {
        if self.locked || !ctx.is_interactive() {
            return;
        }
        info!("Pointer locked");
        self.locked = true;
        self.moved_since_frame = false;
        if self.options.hide_on_lock {
            ctx.set_hidden(true);
        }
        ctx.listen(Channel::Frame);
        ctx.set_should_transition(false);
        ctx.begin_drag(Point::ORIGIN);
    }

    fn release(&mut self, ctx: &mut JoystickContext<'_>) {
        if !self.locked {
            return;
        }
        info!("Pointer lock released");
        self.locked = false;
        if self.options.hide_on_lock {
            ctx.set_hidden(false);
        }
        ctx.unlisten(Channel::Frame);
        ctx.end_drag();
    }

    fn movement(&mut self, movement: Vec2, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        if !self.locked {
            return Ok(());
        }
        let radius = ctx.radius()?;
        self.moved_since_frame = true;
        ctx.set_should_transition(false);
        ctx.request_move(movement * (radius * MOVEMENT_SCALE))
    }

    fn frame(&mut self, ctx: &mut JoystickContext<'_>) {
        if !self.locked {
            return;
        }
        if self.moved_since_frame {
            self.moved_since_frame = false;
        } else if ctx.offset() != Vec2::ZERO {
            debug!("No pointer movement since last frame, re-centering");
            ctx.reset_to_center();
        }
    }
}

impl Default for PointerLockPlugin {
    fn default() -> Self {
        Self::new(PointerLockOptions::default())
    }
}

impl JoystickPlugin for PointerLockPlugin {
    fn name(&self) -> &'static str {
        "pointer-lock"
    }

    fn start(&mut self, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        ctx.listen(Channel::PointerLock);
        Ok(())
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut JoystickContext<'_>,
    ) -> Result<(), JoystickError> {
        match event {
            InputEvent::PointerLock(LockEvent::Engaged) => self.engage(ctx),
            InputEvent::PointerLock(LockEvent::Released) => self.release(ctx),
            InputEvent::PointerLock(LockEvent::Movement(movement)) => {
                self.movement(*movement, ctx)?
            }
            InputEvent::Frame => self.frame(ctx),
            _ => {}
        }
        Ok(())
    }

    fn stop(&mut self, ctx: &mut JoystickContext<'_>) {
        if self.locked && self.options.hide_on_lock {
            ctx.set_hidden(false);
        }
        self.locked = false;
    }
}
