//! Wagon placement state machine.
//!
//! A wagon is loose in the free area, sitting in one slot, or being dragged.
//! Input adapters (mouse, keyboard) only ever move wagons through
//! `begin_drag` / `drag_move` / `end_drag` or `place`, which keep the
//! one-wagon-per-slot invariant.

use rand::Rng;
use ratatui::layout::{Position, Rect, Size};

use crate::game::round::WagonItem;
use crate::game::scatter;

pub type WagonId = usize;
pub type PointerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Free,
    Slot(usize),
    Dragging,
}

#[derive(Clone, Debug)]
pub struct Wagon {
    pub id: WagonId,
    pub item: WagonItem,
    pub placement: Placement,
    /// Top-left inside the free area. `None` until scattered.
    pub free_pos: Option<Position>,
}

/// Screen geometry the board is laid out in, in absolute terminal cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardGeometry {
    pub surface: Rect,
    pub free_area: Rect,
    pub slots: Vec<Rect>,
    pub tile: Size,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drag {
    pub wagon: WagonId,
    pub pointer: PointerId,
    pub origin_slot: Option<usize>,
    pub rect: Rect,
    pub hover: Option<usize>,
    offset: (u16, u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Slotted(usize),
    /// The slot already held a wagon; the dropped one went back to the free area.
    Occupied(usize),
    Free,
}

#[derive(Clone, Debug)]
pub struct Board {
    /// Render order: later wagons draw above earlier ones.
    wagons: Vec<Wagon>,
    slots: Vec<Option<WagonId>>,
    slot_marks: Vec<bool>,
    dragging: Option<Drag>,
    geometry: BoardGeometry,
    locked: bool,
}

impl Board {
    pub fn new(items: &[WagonItem], slot_count: usize) -> Self {
        let wagons = items
            .iter()
            .cloned()
            .enumerate()
            .map(|(id, item)| Wagon {
                id,
                item,
                placement: Placement::Free,
                free_pos: None,
            })
            .collect();

        Self {
            wagons,
            slots: vec![None; slot_count],
            slot_marks: vec![false; slot_count],
            dragging: None,
            geometry: BoardGeometry::default(),
            locked: false,
        }
    }

    pub fn wagons(&self) -> &[Wagon] {
        &self.wagons
    }

    pub fn wagon(&self, id: WagonId) -> Option<&Wagon> {
        self.wagons.iter().find(|w| w.id == id)
    }

    fn wagon_mut(&mut self, id: WagonId) -> Option<&mut Wagon> {
        self.wagons.iter_mut().find(|w| w.id == id)
    }

    pub fn slots(&self) -> &[Option<WagonId>] {
        &self.slots
    }

    /// Slots whose wagon passed the last verification.
    pub fn slot_marks(&self) -> &[bool] {
        &self.slot_marks
    }

    pub fn dragging(&self) -> Option<&Drag> {
        self.dragging.as_ref()
    }

    pub fn hovered_slot(&self) -> Option<usize> {
        self.dragging.as_ref().and_then(|d| d.hover)
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Adopt a new layout. Loose wagons keep their stored spot, re-clamped to
    /// the new free area; only wagons never placed get scattered.
    pub fn set_geometry<R: Rng + ?Sized>(&mut self, geometry: BoardGeometry, rng: &mut R) {
        if geometry == self.geometry {
            self.scatter_pending(rng);
            return;
        }

        let field = geometry.free_area.as_size();
        let tile = geometry.tile;
        for wagon in &mut self.wagons {
            if let Some(pos) = wagon.free_pos {
                wagon.free_pos = Some(scatter::clamp_to_field(
                    pos.x as i32,
                    pos.y as i32,
                    tile,
                    field,
                ));
            }
        }
        self.geometry = geometry;
        self.scatter_pending(rng);
    }

    /// Scatter loose wagons that have no position yet. Wagons stay pending
    /// while the free area is empty.
    pub fn scatter_pending<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let pending: Vec<WagonId> = self
            .wagons
            .iter()
            .filter(|w| w.placement == Placement::Free && w.free_pos.is_none())
            .map(|w| w.id)
            .collect();
        for id in pending {
            self.scatter_wagon(id, rng);
        }
    }

    fn scatter_wagon<R: Rng + ?Sized>(&mut self, id: WagonId, rng: &mut R) {
        let tile = self.geometry.tile;
        let placed: Vec<Rect> = self
            .wagons
            .iter()
            .filter(|w| w.id != id && w.placement == Placement::Free)
            .filter_map(|w| w.free_pos)
            .map(|p| Rect::new(p.x, p.y, tile.width, tile.height))
            .collect();

        let pos = scatter::scatter(self.geometry.free_area.as_size(), tile, &placed, rng);
        if let Some(wagon) = self.wagon_mut(id) {
            wagon.free_pos = pos;
        }
    }

    /// Where a wagon currently sits on screen, if it is visible at all.
    pub fn wagon_rect(&self, id: WagonId) -> Option<Rect> {
        let wagon = self.wagon(id)?;
        match wagon.placement {
            Placement::Free => {
                let pos = wagon.free_pos?;
                let area = self.geometry.free_area;
                Some(Rect::new(
                    area.x + pos.x,
                    area.y + pos.y,
                    self.geometry.tile.width,
                    self.geometry.tile.height,
                ))
            }
            Placement::Slot(index) => self.geometry.slots.get(index).copied(),
            Placement::Dragging => self.dragging.as_ref().map(|d| d.rect),
        }
    }

    /// Topmost wagon under the pointer.
    pub fn wagon_at(&self, at: Position) -> Option<WagonId> {
        self.wagons
            .iter()
            .rev()
            .find(|w| self.wagon_rect(w.id).is_some_and(|r| r.contains(at)))
            .map(|w| w.id)
    }

    /// Slot under a pointer; slot edges count as inside.
    pub fn slot_at(&self, at: Position) -> Option<usize> {
        self.geometry.slots.iter().position(|r| {
            at.x >= r.x && at.x <= r.x + r.width && at.y >= r.y && at.y <= r.y + r.height
        })
    }

    /// Remove a wagon from its slot and lift it above the others.
    fn lift(&mut self, id: WagonId) -> Option<Option<usize>> {
        let index = self.wagons.iter().position(|w| w.id == id)?;
        let origin_slot = match self.wagons[index].placement {
            Placement::Slot(slot) => {
                self.slots[slot] = None;
                self.slot_marks[slot] = false;
                Some(slot)
            }
            Placement::Free => None,
            Placement::Dragging => return None,
        };

        let mut wagon = self.wagons.remove(index);
        wagon.placement = Placement::Dragging;
        self.wagons.push(wagon);
        Some(origin_slot)
    }

    pub fn begin_drag(&mut self, id: WagonId, pointer: PointerId, at: Position) -> bool {
        if self.locked || self.dragging.is_some() {
            return false;
        }
        let Some(rect) = self.wagon_rect(id) else {
            return false;
        };
        let Some(origin_slot) = self.lift(id) else {
            return false;
        };

        let tile = self.geometry.tile;
        let rect = Rect::new(rect.x, rect.y, tile.width, tile.height);
        self.dragging = Some(Drag {
            wagon: id,
            pointer,
            origin_slot,
            rect,
            hover: None,
            offset: (at.x.saturating_sub(rect.x), at.y.saturating_sub(rect.y)),
        });
        self.drag_move(pointer, at);
        true
    }

    pub fn drag_move(&mut self, pointer: PointerId, at: Position) -> bool {
        let hover = self.slot_at(at);
        let surface = self.geometry.surface;
        let Some(drag) = self.dragging.as_mut().filter(|d| d.pointer == pointer) else {
            return false;
        };

        let x = at.x as i32 - drag.offset.0 as i32;
        let y = at.y as i32 - drag.offset.1 as i32;
        let max_x = (surface.x + surface.width).saturating_sub(drag.rect.width) as i32;
        let max_y = (surface.y + surface.height).saturating_sub(drag.rect.height) as i32;
        drag.rect.x = x.min(max_x).max(surface.x as i32) as u16;
        drag.rect.y = y.min(max_y).max(surface.y as i32) as u16;
        drag.hover = hover;
        true
    }

    pub fn end_drag<R: Rng + ?Sized>(
        &mut self,
        pointer: PointerId,
        at: Position,
        rng: &mut R,
    ) -> Option<DropOutcome> {
        if self.dragging.as_ref()?.pointer != pointer {
            return None;
        }
        let drag = self.dragging.take()?;

        let outcome = match self.slot_at(at) {
            Some(slot) => self.drop_into_slot(drag.wagon, slot, rng),
            None => {
                let area = self.geometry.free_area;
                let pos = scatter::clamp_to_field(
                    drag.rect.x as i32 - area.x as i32,
                    drag.rect.y as i32 - area.y as i32,
                    self.geometry.tile,
                    area.as_size(),
                );
                if let Some(wagon) = self.wagon_mut(drag.wagon) {
                    wagon.placement = Placement::Free;
                    wagon.free_pos = Some(pos);
                }
                DropOutcome::Free
            }
        };
        Some(outcome)
    }

    /// Keyboard placement: move a wagon into `slot`, or back to the free area
    /// when `slot` is `None`. Follows the same rules as a drop.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        id: WagonId,
        slot: Option<usize>,
        rng: &mut R,
    ) -> Option<DropOutcome> {
        if self.locked || self.dragging.is_some() {
            return None;
        }
        if slot.is_some_and(|s| s >= self.slots.len()) {
            return None;
        }
        self.lift(id)?;

        let outcome = match slot {
            Some(slot) => self.drop_into_slot(id, slot, rng),
            None => {
                self.return_to_free(id, rng);
                DropOutcome::Free
            }
        };
        Some(outcome)
    }

    fn drop_into_slot<R: Rng + ?Sized>(
        &mut self,
        id: WagonId,
        slot: usize,
        rng: &mut R,
    ) -> DropOutcome {
        if self.slots[slot].is_some() {
            self.return_to_free(id, rng);
            return DropOutcome::Occupied(slot);
        }
        self.slots[slot] = Some(id);
        if let Some(wagon) = self.wagon_mut(id) {
            wagon.placement = Placement::Slot(slot);
        }
        DropOutcome::Slotted(slot)
    }

    fn return_to_free<R: Rng + ?Sized>(&mut self, id: WagonId, rng: &mut R) {
        let field = self.geometry.free_area.as_size();
        let tile = self.geometry.tile;
        let Some(wagon) = self.wagon_mut(id) else {
            return;
        };
        wagon.placement = Placement::Free;
        match wagon.free_pos {
            Some(pos) => {
                wagon.free_pos = Some(scatter::clamp_to_field(
                    pos.x as i32,
                    pos.y as i32,
                    tile,
                    field,
                ));
            }
            None => self.scatter_wagon(id, rng),
        }
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// True when every slot holds a correct wagon, in any order.
    pub fn all_correct(&self) -> bool {
        self.slots.iter().all(|slot| {
            slot.and_then(|id| self.wagon(id))
                .is_some_and(|w| w.item.is_correct)
        })
    }

    /// Mark each slot whose wagon is correct.
    pub fn mark_slots(&mut self) {
        for (index, slot) in self.slots.iter().enumerate() {
            self.slot_marks[index] = slot
                .and_then(|id| self.wagons.iter().find(|w| w.id == id))
                .is_some_and(|w| w.item.is_correct);
        }
    }

    /// Words in train order, skipping empty slots.
    pub fn slot_words(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|slot| slot.and_then(|id| self.wagon(id)))
            .map(|w| w.item.word.clone())
            .collect()
    }

    /// Drop the wrong wagons still loose in the free area.
    pub fn remove_extra_free_wagons(&mut self) {
        self.wagons
            .retain(|w| !(w.placement == Placement::Free && !w.item.is_correct));
    }
}
