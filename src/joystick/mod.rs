//! Joystick shell
//!
//! Owns everything a renderer needs (handle offset, transition flag,
//! visibility) and routes raw device input to the registered plugins.
//!
//! # Architecture
//!
//! ```text
//! host input ──► Joystick::handle_input ──► plugin(s) ──► JoystickContext
//!                                                              │
//!                     renderer ◄── offset / transition ◄── bounding engine
//!                     consumer ◄── MoveEvent (throttled) ◄─────┘
//! ```
//!
//! The shell is synchronous and single-threaded; see [`crate::runner`] for a
//! tokio task that drives it.

pub mod context;
pub(crate) mod state;
pub mod drag_state;
pub mod error;
pub mod event;
pub mod throttle;

pub use context::JoystickContext;
pub use drag_state::{DragSlot, DragState};
pub use error::JoystickError;
pub use event::{Angle, Channel, InputEvent, KeyCode, LockEvent, MoveEvent, OffsetReport, Phase};
pub use throttle::{Clock, EventThrottle, ManualClock, SystemClock};

use self::state::JoystickCore;
use crate::config::JoystickSettings;
use crate::geometry::Layout;
use crate::plugins::JoystickPlugin;
use kurbo::Vec2;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Headless joystick widget
///
/// ```rust
/// use touchstick::{Joystick, JoystickSettings, Layout};
/// use touchstick::plugins::PointerPlugin;
///
/// let mut joystick = Joystick::new(JoystickSettings::default())
///     .with_plugin(PointerPlugin::new())
///     .on_move(|event| println!("{}", event));
/// joystick.set_layout(Layout::default());
/// joystick.start();
/// ```
pub struct Joystick {
    plugins: Vec<Box<dyn JoystickPlugin>>,
    core: JoystickCore,
    started: bool,
}

impl Joystick {
    pub fn new(settings: JoystickSettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: JoystickSettings, clock: Arc<dyn Clock>) -> Self {
        debug!("Creating joystick with settings: {:?}", settings);
        Self {
            plugins: Vec::new(),
            core: JoystickCore::new(settings, clock),
            started: false,
        }
    }

    /// Registers a plugin; registration order decides its drag slot.
    pub fn with_plugin(mut self, plugin: impl JoystickPlugin) -> Self {
        self.add_plugin(Box::new(plugin));
        self
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn JoystickPlugin>) -> usize {
        let index = self.core.drag.push_slot();
        info!("Registered plugin {} at index {}", plugin.name(), index);
        self.plugins.push(plugin);
        index
    }

    pub fn on_move(mut self, callback: impl FnMut(&MoveEvent) + Send + 'static) -> Self {
        self.set_on_move(callback);
        self
    }

    pub fn set_on_move(&mut self, callback: impl FnMut(&MoveEvent) + Send + 'static) {
        self.core.on_move = Some(Box::new(callback));
    }

    /// Centers the handle, emits the zero event and starts every plugin in
    /// registration order.
    pub fn start(&mut self) {
        if self.started {
            debug!("Joystick already started");
            return;
        }
        self.started = true;
        info!("Starting joystick with {} plugins", self.plugins.len());

        self.core.offset = Vec2::ZERO;
        self.core.should_transition = false;
        self.core.emit(MoveEvent::zero(), false);

        for (index, plugin) in self.plugins.iter_mut().enumerate() {
            let mut ctx = JoystickContext::new(index, &mut self.core);
            if let Err(e) = plugin.start(&mut ctx) {
                warn!("Plugin {} failed to start: {}", plugin.name(), e);
            }
        }
    }

    /// Stops every plugin and detaches all of their listeners.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        info!("Stopping joystick");

        for (index, plugin) in self.plugins.iter_mut().enumerate() {
            let mut ctx = JoystickContext::new(index, &mut self.core);
            plugin.stop(&mut ctx);
            self.core.listeners.detach_all(index);
        }
        self.core.drag.clear();
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Delivers `event` to every plugin listening on its channel.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if !self.started {
            debug!("Joystick not started, dropping {:?}", event.channel());
            return;
        }

        let channel = event.channel();
        for (index, plugin) in self.plugins.iter_mut().enumerate() {
            if !self.core.listeners.is_attached(index, channel) {
                continue;
            }

            let mut ctx = JoystickContext::new(index, &mut self.core);
            match plugin.handle_input(event, &mut ctx) {
                Ok(()) => {}
                Err(JoystickError::LayoutNotMeasured) => {
                    debug!(
                        "Plugin {} dropped {:?}: layout not measured yet",
                        plugin.name(),
                        channel
                    );
                }
                Err(e) => {
                    warn!("Plugin {} failed on {:?}: {}", plugin.name(), channel, e);
                }
            }
        }
    }

    pub fn set_layout(&mut self, layout: Layout) {
        debug!("Layout measured: {:?}", layout);
        self.core.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.core.layout.as_ref()
    }

    /// Effective travel radius of the handle.
    ///
    /// # Errors
    ///
    /// [`JoystickError::LayoutNotMeasured`] before [`Joystick::set_layout`].
    pub fn radius(&self) -> Result<f64, JoystickError> {
        self.core.radius()
    }

    pub fn settings(&self) -> &JoystickSettings {
        &self.core.settings
    }

    /// Rendered handle offset from the base center
    pub fn offset(&self) -> Vec2 {
        self.core.offset
    }

    pub fn should_transition(&self) -> bool {
        self.core.should_transition
    }

    /// Animation the renderer should apply to the handle right now, if any
    pub fn transition(&self) -> Option<&str> {
        if self.core.should_transition && !self.core.settings.disable_reset_animation {
            Some(self.core.settings.reset_animation.as_str())
        } else {
            None
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.core.hidden
    }

    pub fn is_interactive(&self) -> bool {
        self.core.is_interactive()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.core.drag
    }

    /// Last event handed to the callback
    pub fn last_event(&self) -> &MoveEvent {
        &self.core.last_event
    }

    /// Number of events handed to the callback so far
    pub fn emitted_events(&self) -> u64 {
        self.core.emitted
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn listener_count(&self, plugin: usize) -> usize {
        self.core.listeners.count(plugin)
    }
}

impl Drop for Joystick {
    fn drop(&mut self) {
        self.stop();
    }
}
