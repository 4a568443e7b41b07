//! Where gamepad readings come from

#[cfg(feature = "gilrs")]
pub use self::gilrs_source::GilrsSource;

/// Snapshot access to connected gamepads
///
/// Axis values are in `[-1, 1]` with screen orientation: positive X is right,
/// positive Y is down.
pub trait GamepadSource: Send + 'static {
    /// Current axes of the gamepad at `index`, `None` if it is not connected.
    fn axes(&mut self, index: usize) -> Option<Vec<f32>>;

    /// Indices of gamepads that connected since the last call.
    fn drain_connected(&mut self) -> Vec<usize> {
        Vec::new()
    }
}

/// Replays a fixed sequence of readings, one per poll
///
/// Once the script runs out the last reading repeats. A `None` entry reads as
/// a disconnected gamepad.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGamepad {
    readings: Vec<Option<Vec<f32>>>,
    position: usize,
    connected: Vec<usize>,
}

impl ScriptedGamepad {
    pub fn new(readings: Vec<Option<Vec<f32>>>) -> Self {
        Self {
            readings,
            position: 0,
            connected: Vec::new(),
        }
    }

    /// Queues a connection notice for `index`.
    pub fn connect(&mut self, index: usize) {
        self.connected.push(index);
    }

    /// Number of readings handed out so far
    pub fn polls(&self) -> usize {
        self.position
    }
}

impl GamepadSource for ScriptedGamepad {
    fn axes(&mut self, _index: usize) -> Option<Vec<f32>> {
        let reading = self
            .readings
            .get(self.position)
            .or_else(|| self.readings.last())
            .cloned()
            .flatten();
        self.position += 1;
        reading
    }

    fn drain_connected(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.connected)
    }
}

#[cfg(feature = "gilrs")]
mod gilrs_source {
    use super::GamepadSource;
    use crate::plugins::gamepad::GamepadError;
    use gilrs::{Axis, EventType, GamepadId, Gilrs};
    use tracing::{debug, error, info};

    /// Stick order reported by [`GilrsSource`]
    const AXES: [Axis; 4] = [
        Axis::LeftStickX,
        Axis::LeftStickY,
        Axis::RightStickX,
        Axis::RightStickY,
    ];

    /// Reads gamepads through gilrs
    ///
    /// Gamepad indices follow gilrs' enumeration order. Stick Y axes are
    /// negated so that pushing a stick down reads positive.
    pub struct GilrsSource {
        gilrs: Gilrs,
        connected: Vec<usize>,
    }

    impl GilrsSource {
        pub fn new() -> Result<Self, GamepadError> {
            info!("Initializing gilrs gamepad source");
            let gilrs = match Gilrs::new() {
                Ok(g) => g,
                Err(e) => {
                    error!("Failed to initialize gilrs: {}", e);
                    return Err(GamepadError::Initialization(e.to_string()));
                }
            };

            for (index, (id, gamepad)) in gilrs.gamepads().enumerate() {
                info!("  [{}] ID: {}, Name: {}", index, id, gamepad.name());
            }

            Ok(Self {
                gilrs,
                connected: Vec::new(),
            })
        }

        fn index_of(&self, id: GamepadId) -> Option<usize> {
            self.gilrs.gamepads().position(|(other, _)| other == id)
        }

        /// Drains pending gilrs events so cached gamepad state is current.
        fn pump(&mut self) {
            while let Some(event) = self.gilrs.next_event() {
                match event.event {
                    EventType::Connected => {
                        if let Some(index) = self.index_of(event.id) {
                            info!("Gamepad {} connected at index {}", event.id, index);
                            self.connected.push(index);
                        }
                    }
                    EventType::Disconnected => {
                        info!("Gamepad {} disconnected", event.id);
                    }
                    _ => {}
                }
            }
        }
    }

    impl GamepadSource for GilrsSource {
        fn axes(&mut self, index: usize) -> Option<Vec<f32>> {
            self.pump();
            let (_, gamepad) = self.gilrs.gamepads().nth(index)?;
            let axes = AXES
                .iter()
                .map(|axis| {
                    let value = gamepad.value(*axis);
                    match axis {
                        Axis::LeftStickY | Axis::RightStickY => -value,
                        _ => value,
                    }
                })
                .collect();
            Some(axes)
        }

        fn drain_connected(&mut self) -> Vec<usize> {
            self.pump();
            if !self.connected.is_empty() {
                debug!("Gamepads connected: {:?}", self.connected);
            }
            std::mem::take(&mut self.connected)
        }
    }
}
