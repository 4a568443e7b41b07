//! Press, drag and release handling shared by the pointer-like plugins

use crate::joystick::{Channel, JoystickContext, JoystickError, Phase};
use kurbo::Point;

/// Channels one pointer-like device reports on
#[derive(Debug, Clone, Copy)]
pub(crate) struct PressChannels {
    pub(crate) down: Channel,
    pub(crate) moved: Channel,
    pub(crate) up: Channel,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PressDrag {
    channels: PressChannels,
}

impl PressDrag {
    pub(crate) fn new(channels: PressChannels) -> Self {
        Self { channels }
    }

    pub(crate) fn start(&self, ctx: &mut JoystickContext<'_>) {
        ctx.listen(self.channels.down);
    }

    pub(crate) fn handle(
        &self,
        phase: Phase,
        position: Point,
        ctx: &mut JoystickContext<'_>,
    ) -> Result<(), JoystickError> {
        match phase {
            Phase::Down => {
                self.press(position, ctx);
                Ok(())
            }
            Phase::Move => self.drag(position, ctx),
            Phase::Up => {
                self.release(ctx);
                Ok(())
            }
        }
    }

    fn press(&self, position: Point, ctx: &mut JoystickContext<'_>) {
        if !ctx.is_interactive() {
            return;
        }

        ctx.listen(self.channels.moved);
        ctx.listen(self.channels.up);
        ctx.set_should_transition(false);

        // a handle left off-center keeps its place when the drag resumes
        let anchor = if ctx.settings().disable_reset {
            position - ctx.offset()
        } else {
            position
        };
        ctx.begin_drag(anchor);
    }

    fn drag(&self, position: Point, ctx: &mut JoystickContext<'_>) -> Result<(), JoystickError> {
        if !ctx.is_dragging() {
            return Ok(());
        }
        let delta = position - ctx.anchor();
        ctx.request_move(delta)
    }

    fn release(&self, ctx: &mut JoystickContext<'_>) {
        ctx.unlisten(self.channels.moved);
        ctx.unlisten(self.channels.up);
        if ctx.is_dragging() {
            ctx.end_drag();
        }
    }
}
