//! Mouse input for hosts that report mouse events separately from pointers

use super::press_drag::{PressChannels, PressDrag};
use super::JoystickPlugin;
use crate::joystick::{Channel, InputEvent, JoystickContext, JoystickError};

#[derive(Debug, Clone, Copy)]
pub struct MousePlugin {
    drag: PressDrag,
}

impl MousePlugin {
    pub fn new() -> Self {
        Self {
            drag: PressDrag::new(PressChannels {
                down: Channel::MouseDown,
                moved: Channel::MouseMove,
                up: Channel::MouseUp,
            }),
        }
    }
}

impl Default for MousePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickPlugin for MousePlugin {
    fn name(&self) -> &'static str {
        "mouse"
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
        if let InputEvent::Mouse { phase, position } = event {
            self.drag.handle(*phase, *position, ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JoystickSettings;
    use crate::geometry::BoundingModel;
    use crate::joystick::{ManualClock, Phase};
    use crate::plugins::test_support::{recorded, recording_joystick};
    use kurbo::{Point, Vec2};
    use std::sync::Arc;

    fn mouse(phase: Phase, x: f64, y: f64) -> InputEvent {
        InputEvent::Mouse {
            phase,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_drag_past_radius_is_clamped() {
        let clock = Arc::new(ManualClock::new(0));
        let (mut joystick, events) = recording_joystick(JoystickSettings::default(), clock);
        joystick.add_plugin(Box::new(MousePlugin::new()));
        joystick.start();

        joystick.handle_input(&mouse(Phase::Down, 0.0, 0.0));
        joystick.handle_input(&mouse(Phase::Move, 300.0, 0.0));

        let offset = joystick.offset();
        assert!((offset.x - 100.0).abs() < 1e-9);
        assert!(offset.y.abs() < 1e-9);

        let last = *recorded(&events).last().expect("move emitted");
        assert_eq!(last.pressure.pixels, 100.0);
        assert_eq!(last.pressure.percentage, 100.0);
    }

    #[test]
    fn test_unbounded_model_passes_offset_through() {
        let settings = JoystickSettings {
            bounding_model: BoundingModel::None,
            ..JoystickSettings::default()
        };
        let clock = Arc::new(ManualClock::new(0));
        let (mut joystick, _events) = recording_joystick(settings, clock);
        joystick.add_plugin(Box::new(MousePlugin::new()));
        joystick.start();

        joystick.handle_input(&mouse(Phase::Down, 0.0, 0.0));
        joystick.handle_input(&mouse(Phase::Move, 300.0, 0.0));
        assert_eq!(joystick.offset(), Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_pointer_events_are_ignored() {
        let clock = Arc::new(ManualClock::new(0));
        let (mut joystick, _events) = recording_joystick(JoystickSettings::default(), clock);
        joystick.add_plugin(Box::new(MousePlugin::new()));
        joystick.start();

        joystick.handle_input(&InputEvent::Pointer {
            phase: Phase::Down,
            position: Point::ORIGIN,
        });
        assert!(!joystick.drag_state().any_dragging());
    }
}
