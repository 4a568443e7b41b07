use super::drag_state::DragState;
use super::error::JoystickError;
use super::event::{Channel, MoveEvent};
use super::throttle::{Clock, EventThrottle};
use crate::config::JoystickSettings;
use crate::geometry::{bound_offset, effective_radius, BoundingOptions, Layout};
use kurbo::Vec2;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub type MoveCallback = Box<dyn FnMut(&MoveEvent) + Send>;

/// Which plugin listens on which channel
#[derive(Debug, Default)]
pub(crate) struct Listeners {
    attached: HashSet<(usize, Channel)>,
}

impl Listeners {
    pub(crate) fn attach(&mut self, plugin: usize, channel: Channel) {
        if self.attached.insert((plugin, channel)) {
            debug!("Plugin {} listening on {:?}", plugin, channel);
        }
    }

    pub(crate) fn detach(&mut self, plugin: usize, channel: Channel) {
        if self.attached.remove(&(plugin, channel)) {
            debug!("Plugin {} stopped listening on {:?}", plugin, channel);
        }
    }

    pub(crate) fn detach_all(&mut self, plugin: usize) {
        self.attached.retain(|(owner, _)| *owner != plugin);
    }

    pub(crate) fn is_attached(&self, plugin: usize, channel: Channel) -> bool {
        self.attached.contains(&(plugin, channel))
    }

    pub(crate) fn count(&self, plugin: usize) -> usize {
        self.attached
            .iter()
            .filter(|(owner, _)| *owner == plugin)
            .count()
    }
}

/// State shared by the shell and the plugin contexts
pub(crate) struct JoystickCore {
    pub(crate) settings: JoystickSettings,
    pub(crate) layout: Option<Layout>,
    pub(crate) drag: DragState,
    pub(crate) offset: Vec2,
    pub(crate) should_transition: bool,
    pub(crate) hidden: bool,
    pub(crate) listeners: Listeners,
    pub(crate) throttle: EventThrottle,
    pub(crate) on_move: Option<MoveCallback>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) last_event: MoveEvent,
    pub(crate) emitted: u64,
}

impl JoystickCore {
    pub(crate) fn new(settings: JoystickSettings, clock: Arc<dyn Clock>) -> Self {
        let throttle = EventThrottle::new(settings.throttle_events_by);
        Self {
            settings,
            layout: None,
            drag: DragState::default(),
            offset: Vec2::ZERO,
            should_transition: false,
            hidden: false,
            listeners: Listeners::default(),
            throttle,
            on_move: None,
            clock,
            last_event: MoveEvent::zero(),
            emitted: 0,
        }
    }

    pub(crate) fn radius(&self) -> Result<f64, JoystickError> {
        let layout = self.layout.as_ref().ok_or(JoystickError::LayoutNotMeasured)?;
        Ok(effective_radius(
            layout,
            self.settings.bounding_model,
            self.settings.boundary_modifier,
        ))
    }

    pub(crate) fn is_interactive(&self) -> bool {
        !self.settings.disabled && !(self.settings.disable_x && self.settings.disable_y)
    }

    pub(crate) fn request_move(&mut self, plugin: usize, delta: Vec2) -> Result<(), JoystickError> {
        let radius = self.radius()?;

        if self.settings.disabled || !self.drag.any_dragging() {
            debug!(
                "Ignoring move from plugin {}: disabled={}, dragging={:?}",
                plugin,
                self.settings.disabled,
                self.drag.active_slots()
            );
            return Ok(());
        }

        let options = BoundingOptions {
            model: self.settings.bounding_model,
            disable_x: self.settings.disable_x,
            disable_y: self.settings.disable_y,
        };
        let bounded = bound_offset(delta, radius, &options);
        self.offset = bounded.offset;

        let event = MoveEvent::from_bounded(&bounded, radius);
        debug!("Plugin {} moved handle: {}", plugin, event);
        self.emit(event, true);
        Ok(())
    }

    pub(crate) fn reset_to_center(&mut self) {
        self.offset = Vec2::ZERO;
        self.should_transition = true;
        self.emit(MoveEvent::zero(), false);
    }

    /// Hands `event` to the callback, through the throttle if `throttled`.
    pub(crate) fn emit(&mut self, event: MoveEvent, throttled: bool) {
        if throttled && !self.throttle.should_emit(self.clock.now_ms()) {
            debug!("Move event throttled: {}", event);
            return;
        }

        self.last_event = event;
        self.emitted += 1;
        if let Some(on_move) = self.on_move.as_mut() {
            on_move(&event);
        }
    }
}
