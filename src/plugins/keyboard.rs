//! Four-key directional input
//!
//! Each held key pushes the handle a full radius in its direction. Holding
//! two perpendicular keys gives a diagonal, which the bounding engine pulls
//! back onto the circle.

use super::JoystickPlugin;
use crate::joystick::{Channel, InputEvent, JoystickContext, JoystickError, KeyCode};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct KeyboardOptions {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl KeyboardOptions {
    pub fn wasd() -> Self {
        Self {
            up: KeyCode::from("KeyW"),
            down: KeyCode::from("KeyS"),
            left: KeyCode::from("KeyA"),
            right: KeyCode::from("KeyD"),
        }
    }

    pub fn arrows() -> Self {
        Self {
            up: KeyCode::from("ArrowUp"),
            down: KeyCode::from("ArrowDown"),
            left: KeyCode::from("ArrowLeft"),
            right: KeyCode::from("ArrowRight"),
        }
    }
}

impl Default for KeyboardOptions {
    fn default() -> Self {
        Self::wasd()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ActiveKeys {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl ActiveKeys {
    /// Unit direction in screen coordinates, opposite keys cancel out
    fn direction(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        direction
    }
}

pub struct KeyboardPlugin {
    options: KeyboardOptions,
    active: ActiveKeys,
}

impl KeyboardPlugin {
    pub fn new(options: KeyboardOptions) -> Self {
        Self {
            options,
            active: ActiveKeys::default(),
        }
    }

    pub fn options(&self) -> &KeyboardOptions {
        &self.options
    }

    /// Applies a key transition, returns whether a mapped key changed state.
    fn set_key(&mut self, code: &KeyCode, pressed: bool) -> bool {
        let slot = if *code == self.options.up {
            &mut self.active.up
        } else if *code == self.options.down {
            &mut self.active.down
        } else if *code == self.options.left {
            &mut self.active.left
        } else if *code == self.options.right {
            &mut self.active.right
        } else {
            return false;
        };

        let changed = *slot != pressed;
        *slot = pressed;
        changed
    }

    fn apply(&self, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        if !ctx.is_interactive() {
            return Ok(());
        }
        let radius = ctx.radius()?;
        ctx.set_should_transition(true);

        let offset = self.active.direction() * radius;
        if offset == Vec2::ZERO {
            if ctx.is_dragging() {
                ctx.end_drag();
            }
            return Ok(());
        }

        ctx.set_dragging(true);
        ctx.request_move(offset)
    }
}

impl Default for KeyboardPlugin {
    fn default() -> Self {
        Self::new(KeyboardOptions::default())
    }
}

impl JoystickPlugin for KeyboardPlugin {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn start(&mut self, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        ctx.listen(Channel::KeyDown);
        ctx.listen(Channel::KeyUp);
        Ok(())
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut JoystickContext<'_>,
    ) -> Result<(), JoystickError> {
        let InputEvent::Key { pressed, code } = event else {
            return Ok(());
        };

        if !self.set_key(code, *pressed) {
            return Ok(());
        }
        debug!("Key {} {}", code, if *pressed { "down" } else { "up" });
        self.apply(ctx)
    }

    fn stop(&mut self, _ctx: &mut JoystickContext<'_>) {
        self.active = ActiveKeys::default();
    }
}
