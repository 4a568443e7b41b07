//! Touch input; the first touch on the handle drives the drag

use super::press_drag::{PressChannels, PressDrag};
use super::JoystickPlugin;
use crate::joystick::{Channel, InputEvent, JoystickContext, JoystickError, Phase};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct MultiTouchPlugin {
    drag: PressDrag,
}

impl MultiTouchPlugin {
    pub fn new() -> Self {
        Self {
            drag: PressDrag::new(PressChannels {
                down: Channel::TouchStart,
                moved: Channel::TouchMove,
                up: Channel::TouchEnd,
            }),
        }
    }
}

impl Default for MultiTouchPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickPlugin for MultiTouchPlugin {
    fn name(&self) -> &'static str {
        "multitouch"
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
        let InputEvent::Touch { phase, touches } = event else {
            return Ok(());
        };

        // touchend carries no remaining touches on the handle
        if *phase == Phase::Up {
            return self.drag.handle(Phase::Up, kurbo::Point::ORIGIN, ctx);
        }

        match touches.first() {
            Some(position) => self.drag.handle(*phase, *position, ctx),
            None => {
                debug!("Touch {:?} without touch points ignored", phase);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JoystickSettings;
    use crate::joystick::ManualClock;
    use crate::plugins::test_support::recording_joystick;
    use kurbo::{Point, Vec2};
    use std::sync::Arc;

    fn touch(phase: Phase, touches: &[(f64, f64)]) -> InputEvent {
        InputEvent::Touch {
            phase,
            touches: touches.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    #[test]
    fn test_first_touch_drives_drag() {
        let clock = Arc::new(ManualClock::new(0));
        let (mut joystick, _events) = recording_joystick(JoystickSettings::default(), clock);
        joystick.add_plugin(Box::new(MultiTouchPlugin::new()));
        joystick.start();

        joystick.handle_input(&touch(Phase::Down, &[(10.0, 10.0), (500.0, 500.0)]));
        joystick.handle_input(&touch(Phase::Move, &[(20.0, 30.0), (600.0, 600.0)]));
        assert_eq!(joystick.offset(), Vec2::new(10.0, 20.0));

        joystick.handle_input(&touch(Phase::Up, &[]));
        assert_eq!(joystick.offset(), Vec2::ZERO);
        assert!(!joystick.drag_state().any_dragging());
    }

    #[test]
    fn test_touch_without_points_is_ignored() {
        let clock = Arc::new(ManualClock::new(0));
        let (mut joystick, _events) = recording_joystick(JoystickSettings::default(), clock);
        joystick.add_plugin(Box::new(MultiTouchPlugin::new()));
        joystick.start();

        joystick.handle_input(&touch(Phase::Down, &[]));
        assert!(!joystick.drag_state().any_dragging());
        assert_eq!(joystick.listener_count(0), 1);
    }
}
