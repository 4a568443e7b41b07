//! Drag-state arbitration between input plugins
//!
//! Every registered plugin owns one [`DragSlot`], indexed by registration
//! order. The handle may move while any slot is dragging, so several sources
//! (e.g. keyboard and gamepad) can interleave. Each slot keeps its own anchor,
//! which means concurrent sources never overwrite each other's reference point.

use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSlot {
    pub dragging: bool,
    /// Device position (or reading) the drag deltas are measured against
    pub anchor: Point,
}

impl Default for DragSlot {
    fn default() -> Self {
        Self {
            dragging: false,
            anchor: Point::ORIGIN,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragState {
    slots: Vec<DragSlot>,
}

impl DragState {
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: vec![DragSlot::default(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Appends a slot and returns its index.
    pub fn push_slot(&mut self) -> usize {
        self.slots.push(DragSlot::default());
        self.slots.len() - 1
    }

    pub fn slot(&self, index: usize) -> Option<&DragSlot> {
        self.slots.get(index)
    }

    /// Mutable slot, grown on demand so an index is always addressable.
    pub fn slot_mut(&mut self, index: usize) -> &mut DragSlot {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, DragSlot::default());
        }
        &mut self.slots[index]
    }

    pub fn is_dragging(&self, index: usize) -> bool {
        self.slot(index).is_some_and(|slot| slot.dragging)
    }

    pub fn any_dragging(&self) -> bool {
        self.slots.iter().any(|slot| slot.dragging)
    }

    /// Indices of the slots that currently own a drag.
    pub fn active_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.dragging)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn begin(&mut self, index: usize, anchor: Point) {
        let slot = self.slot_mut(index);
        slot.dragging = true;
        slot.anchor = anchor;
    }

    /// Clears the slot and puts its anchor back at the origin.
    pub fn end(&mut self, index: usize) {
        *self.slot_mut(index) = DragSlot::default();
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = DragSlot::default();
        }
    }
}
