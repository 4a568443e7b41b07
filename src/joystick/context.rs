//! Capability object handed to plugins
//!
//! A [`JoystickContext`] is built by the shell for every plugin call and
//! borrows the shell state for the duration of that call. It is the only way a
//! plugin can move the handle, touch its own drag slot or attach listeners.

use super::drag_state::DragSlot;
use super::error::JoystickError;
use super::event::Channel;
use super::state::JoystickCore;
use crate::config::JoystickSettings;
use kurbo::{Point, Vec2};
use tracing::debug;

pub struct JoystickContext<'a> {
    index: usize,
    core: &'a mut JoystickCore,
}

impl<'a> JoystickContext<'a> {
    pub(crate) fn new(index: usize, core: &'a mut JoystickCore) -> Self {
        Self { index, core }
    }

    /// Registration index of the plugin, which is also its drag slot
    pub fn plugin_index(&self) -> usize {
        self.index
    }

    pub fn settings(&self) -> &JoystickSettings {
        &self.core.settings
    }

    pub fn now_ms(&self) -> i64 {
        self.core.clock.now_ms()
    }

    /// Effective travel radius.
    ///
    /// # Errors
    ///
    /// [`JoystickError::LayoutNotMeasured`] until the host set a layout.
    pub fn radius(&self) -> Result<f64, JoystickError> {
        self.core.radius()
    }

    /// Bounds `delta` and, if any plugin is dragging, renders and emits it.
    pub fn request_move(&mut self, delta: Vec2) -> Result<(), JoystickError> {
        self.core.request_move(self.index, delta)
    }

    /// Handle accepts presses: not disabled and at least one axis enabled
    pub fn is_interactive(&self) -> bool {
        self.core.is_interactive()
    }

    pub fn drag_slot(&self) -> DragSlot {
        self.core
            .drag
            .slot(self.index)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_dragging(&self) -> bool {
        self.core.drag.is_dragging(self.index)
    }

    pub fn any_dragging(&self) -> bool {
        self.core.drag.any_dragging()
    }

    pub fn anchor(&self) -> Point {
        self.drag_slot().anchor
    }

    pub fn set_anchor(&mut self, anchor: Point) {
        self.core.drag.slot_mut(self.index).anchor = anchor;
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.core.drag.slot_mut(self.index).dragging = dragging;
    }

    /// Takes the drag and records where it started.
    pub fn begin_drag(&mut self, anchor: Point) {
        debug!("Plugin {} begins drag at {:?}", self.index, anchor);
        self.core.drag.begin(self.index, anchor);
    }

    /// Releases the drag.
    ///
    /// Clears the slot and its anchor, raises the transition flag and, unless
    /// `disable_reset` is set, re-centers the handle and emits the zero event.
    pub fn end_drag(&mut self) {
        debug!("Plugin {} ends drag", self.index);
        self.core.drag.end(self.index);
        self.core.should_transition = true;
        if !self.core.settings.disable_reset {
            self.core.reset_to_center();
        }
    }

    /// Re-centers the handle and emits the zero event.
    pub fn reset_to_center(&mut self) {
        self.core.reset_to_center();
    }

    /// Currently rendered handle offset
    pub fn offset(&self) -> Vec2 {
        self.core.offset
    }

    /// Overrides the rendered offset without bounding or emitting.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.core.offset = offset;
    }

    pub fn should_transition(&self) -> bool {
        self.core.should_transition
    }

    pub fn set_should_transition(&mut self, should_transition: bool) {
        self.core.should_transition = should_transition;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.core.hidden = hidden;
    }

    /// Routes events of `channel` to this plugin.
    pub fn listen(&mut self, channel: Channel) {
        self.core.listeners.attach(self.index, channel);
    }

    pub fn unlisten(&mut self, channel: Channel) {
        self.core.listeners.detach(self.index, channel);
    }

    pub fn is_listening(&self, channel: Channel) -> bool {
        self.core.listeners.is_attached(self.index, channel)
    }
}
