//! Unified pointer input (mouse, pen or single touch)

use super::press_drag::{PressChannels, PressDrag};
use super::JoystickPlugin;
use crate::joystick::{Channel, InputEvent, JoystickContext, JoystickError};

#[derive(Debug, Clone, Copy)]
pub struct PointerPlugin {
    drag: PressDrag,
}

impl PointerPlugin {
    pub fn new() -> Self {
        Self {
            drag: PressDrag::new(PressChannels {
                down: Channel::PointerDown,
                moved: Channel::PointerMove,
                up: Channel::PointerUp,
            }),
        }
    }
}

impl Default for PointerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickPlugin for PointerPlugin {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn start(&mut self, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        self.drag.start(ctx);
        Ok(())
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut JoystickContext<'_>,
    ) -> Result<(), JoystickError> {
        match event {
            InputEvent::Pointer { phase, position } => self.drag.handle(*phase, *position, ctx),
            _ => Ok(()),
        }
    }
}
