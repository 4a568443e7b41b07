use kurbo::{Point, Vec2};
use std::sync::{Arc, Mutex};
use touchstick::joystick::ManualClock;
use touchstick::plugins::gamepad::{GamepadOptions, GamepadPlugin, ScriptedGamepad};
use touchstick::plugins::{KeyboardPlugin, PointerPlugin};
use touchstick::{BoundingModel, InputEvent, Joystick, JoystickSettings, Layout, MoveEvent, Phase};

const EPSILON: f64 = 1e-9;

struct Harness {
    joystick: Joystick,
    clock: Arc<ManualClock>,
    events: Arc<Mutex<Vec<MoveEvent>>>,
}

impl Harness {
    /// Pointer-driven joystick with radius 100 (200px base, center model).
    fn pointer(settings: JoystickSettings) -> Self {
        let mut harness = Self::empty(settings);
        harness.joystick.add_plugin(Box::new(PointerPlugin::new()));
        harness.start()
    }

    fn empty(settings: JoystickSettings) -> Self {
        let clock = Arc::new(ManualClock::new(1_000));
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let joystick = Joystick::with_clock(settings, clock.clone()).on_move(move |event| {
            sink.lock().expect("recorder lock").push(*event);
        });
        Self {
            joystick,
            clock,
            events,
        }
    }

    fn start(mut self) -> Self {
        self.joystick.set_layout(Layout::default());
        self.joystick.start();
        self
    }

    fn drag(&mut self, dx: f64, dy: f64) {
        self.pointer_at(Phase::Down, 0.0, 0.0);
        self.pointer_at(Phase::Move, dx, dy);
    }

    fn pointer_at(&mut self, phase: Phase, x: f64, y: f64) {
        self.joystick.handle_input(&InputEvent::Pointer {
            phase,
            position: Point::new(x, y),
        });
    }

    fn events(&self) -> Vec<MoveEvent> {
        self.events.lock().expect("recorder lock").clone()
    }

    fn last(&self) -> MoveEvent {
        *self.events().last().expect("at least one event")
    }
}

#[test]
fn test_start_emits_zero_event() {
    let harness = Harness::pointer(JoystickSettings::default());
    let events = harness.events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_zero());
}

#[test]
fn test_center_model_clamps_to_radius() {
    let mut harness = Harness::pointer(JoystickSettings::default());
    harness.drag(150.0, 0.0);

    let offset = harness.joystick.offset();
    assert!((offset.x - 100.0).abs() < EPSILON);
    assert!(offset.y.abs() < EPSILON);

    let event = harness.last();
    assert_eq!(event.angle.radians, 0.0);
    assert_eq!(event.pressure.pixels, 100.0);
    assert_eq!(event.pressure.percentage, 100.0);
    assert!((event.offset.percentage.x - 1.0).abs() < EPSILON);
}

#[test]
fn test_unbounded_model_passes_through() {
    let settings = JoystickSettings {
        bounding_model: BoundingModel::None,
        ..JoystickSettings::default()
    };
    let mut harness = Harness::pointer(settings);
    harness.drag(150.0, 0.0);

    assert_eq!(harness.joystick.offset(), Vec2::new(150.0, 0.0));
    let event = harness.last();
    assert_eq!(event.pressure.pixels, 150.0);
    assert_eq!(event.pressure.percentage, 150.0);
}

#[test]
fn test_disabled_x_axis_stays_zero() {
    let settings = JoystickSettings {
        disable_x: true,
        ..JoystickSettings::default()
    };
    let mut harness = Harness::pointer(settings);

    harness.drag(80.0, 60.0);
    assert_eq!(harness.joystick.offset(), Vec2::new(0.0, 60.0));

    harness.pointer_at(Phase::Move, 80.0, 150.0);
    let offset = harness.joystick.offset();
    assert_eq!(offset.x, 0.0);
    assert!((offset.y - 100.0).abs() < EPSILON);
    assert_eq!(harness.last().pressure.percentage, 100.0);
}

#[test]
fn test_throttle_drops_events_inside_window() {
    let settings = JoystickSettings {
        throttle_events_by: 100,
        ..JoystickSettings::default()
    };
    let mut harness = Harness::pointer(settings);

    harness.drag(10.0, 0.0);
    assert_eq!(harness.events().len(), 2);

    harness.clock.advance(30);
    harness.pointer_at(Phase::Move, 20.0, 0.0);
    assert_eq!(harness.events().len(), 2);
    assert_eq!(harness.last().offset.pixels, Vec2::new(10.0, 0.0));
    // the handle itself still follows the pointer
    assert_eq!(harness.joystick.offset(), Vec2::new(20.0, 0.0));

    harness.clock.advance(70);
    harness.pointer_at(Phase::Move, 30.0, 0.0);
    assert_eq!(harness.events().len(), 3);
    assert_eq!(harness.last().offset.pixels, Vec2::new(30.0, 0.0));
}

#[test]
fn test_release_bypasses_throttle() {
    let settings = JoystickSettings {
        throttle_events_by: 100,
        ..JoystickSettings::default()
    };
    let mut harness = Harness::pointer(settings);

    harness.drag(10.0, 0.0);
    harness.clock.advance(5);
    harness.pointer_at(Phase::Up, 10.0, 0.0);
    assert!(harness.last().is_zero());
    assert_eq!(harness.events().len(), 3);
}

#[test]
fn test_release_resets_to_center() {
    let mut harness = Harness::pointer(JoystickSettings::default());
    harness.drag(40.0, 30.0);
    let before = harness.events().len();

    harness.pointer_at(Phase::Up, 40.0, 30.0);
    assert_eq!(harness.joystick.offset(), Vec2::ZERO);
    assert_eq!(harness.events().len(), before + 1);
    assert_eq!(harness.last(), MoveEvent::zero());
    assert_eq!(harness.joystick.transition(), Some(".2s ease"));
}

#[test]
fn test_release_with_disable_reset_keeps_position() {
    let settings = JoystickSettings {
        disable_reset: true,
        disable_reset_animation: true,
        ..JoystickSettings::default()
    };
    let mut harness = Harness::pointer(settings);
    harness.drag(40.0, 30.0);
    let before = harness.events().len();

    harness.pointer_at(Phase::Up, 40.0, 30.0);
    assert_eq!(harness.joystick.offset(), Vec2::new(40.0, 30.0));
    assert_eq!(harness.events().len(), before);
    assert_eq!(harness.joystick.transition(), None);
}

#[test]
fn test_reset_is_idempotent() {
    let mut harness = Harness::pointer(JoystickSettings::default());
    for _ in 0..3 {
        harness.drag(70.0, -20.0);
        harness.pointer_at(Phase::Up, 70.0, -20.0);

        let zero = harness.last();
        assert_eq!(zero.offset.pixels, Vec2::ZERO);
        assert_eq!(zero.angle.radians, 0.0);
        assert_eq!(zero.angle.degrees, 0.0);
        assert_eq!(zero.pressure.pixels, 0.0);
        assert_eq!(zero.pressure.percentage, 0.0);
    }
}

#[test]
fn test_gamepad_deadzone() {
    let mut harness = Harness::empty(JoystickSettings::default());
    harness.joystick.add_plugin(Box::new(GamepadPlugin::new(
        ScriptedGamepad::new(vec![Some(vec![0.03, 0.0]), Some(vec![0.06, 0.0])]),
        GamepadOptions::default(),
    )));
    let mut harness = harness.start();

    harness.joystick.handle_input(&InputEvent::Frame);
    assert_eq!(harness.events().len(), 1);

    harness.joystick.handle_input(&InputEvent::Frame);
    assert_eq!(harness.events().len(), 2);
    assert!((harness.last().offset.pixels.x - 6.0).abs() < 1e-4);
}

#[test]
fn test_inputs_before_layout_are_dropped() {
    let mut harness = Harness::empty(JoystickSettings::default());
    harness.joystick.add_plugin(Box::new(PointerPlugin::new()));
    harness.joystick.start();

    harness.drag(50.0, 0.0);
    assert_eq!(harness.joystick.offset(), Vec2::ZERO);
    assert_eq!(harness.events().len(), 1);

    harness.joystick.set_layout(Layout::default());
    harness.pointer_at(Phase::Move, 50.0, 0.0);
    assert_eq!(harness.joystick.offset(), Vec2::new(50.0, 0.0));
}

#[test]
fn test_keyboard_and_pointer_share_the_handle() {
    let mut harness = Harness::empty(JoystickSettings::default());
    harness.joystick.add_plugin(Box::new(PointerPlugin::new()));
    harness.joystick.add_plugin(Box::new(KeyboardPlugin::default()));
    let mut harness = harness.start();

    harness.joystick.handle_input(&InputEvent::Key {
        pressed: true,
        code: "KeyD".into(),
    });
    assert!((harness.joystick.offset().x - 100.0).abs() < EPSILON);

    harness.pointer_at(Phase::Down, 500.0, 500.0);
    harness.pointer_at(Phase::Move, 500.0, 520.0);
    assert_eq!(harness.joystick.offset(), Vec2::new(0.0, 20.0));
    assert_eq!(harness.joystick.drag_state().active_slots(), vec![0, 1]);

    harness.pointer_at(Phase::Up, 500.0, 520.0);
    assert!(harness.joystick.drag_state().is_dragging(1));
    assert_eq!(harness.joystick.drag_state().slot(1).map(|s| s.anchor), Some(Point::ORIGIN));
}

#[test]
fn test_stop_detaches_every_listener() {
    let mut harness = Harness::pointer(JoystickSettings::default());
    harness.pointer_at(Phase::Down, 0.0, 0.0);
    assert_eq!(harness.joystick.listener_count(0), 3);

    harness.joystick.stop();
    assert_eq!(harness.joystick.listener_count(0), 0);
    assert!(!harness.joystick.drag_state().any_dragging());

    let count = harness.events().len();
    harness.pointer_at(Phase::Move, 10.0, 0.0);
    assert_eq!(harness.events().len(), count);
}

#[test]
fn test_restart_recenters_the_handle() {
    let mut harness = Harness::pointer(JoystickSettings::default());
    harness.drag(40.0, 0.0);
    harness.joystick.stop();
    assert_eq!(harness.joystick.offset(), Vec2::new(40.0, 0.0));

    harness.joystick.start();
    assert_eq!(harness.joystick.offset(), Vec2::ZERO);
    assert!(harness.last().is_zero());
    assert!(!harness.joystick.should_transition());
    assert_eq!(harness.joystick.transition(), None);
}
