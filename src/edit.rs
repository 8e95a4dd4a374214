//! Pointer gestures over the grid: painting walls and dragging the start or finish around.
//!
//! A gesture is `Down`, any number of `Enter`s and either `Up` or a `Leave` of the whole grid.
//! Pressing on an endpoint drags it; pressing anywhere else paints walls, with the wall value
//! chosen by toggling the pressed cell. Endpoints are never painted over, and dragging an
//! endpoint off the grid discards it until the next press places it again.

use log::debug;

use crate::grid::{Endpoint, Grid};
use crate::CellId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    Down(CellId),
    Enter(CellId),
    Up(CellId),
    /// The pointer left the grid surface.
    Leave,
}

/// What handling one [PointerEvent] did to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditEffect {
    WallPainted { cell: CellId, is_wall: bool },
    RelocationStarted { endpoint: Endpoint, cell: CellId },
    /// A missing endpoint was assigned by pressing a free cell.
    EndpointPlaced { endpoint: Endpoint, cell: CellId },
    EndpointMoved { endpoint: Endpoint, cell: CellId },
    /// The endpoint was dragged off the grid and no cell holds it anymore.
    EndpointDropped { endpoint: Endpoint },
    GestureEnded,
    Ignored,
}

/// Transient state of one pointer gesture. Each grid view owns its own session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditSession {
    is_pointer_down: bool,
    will_paint_wall: bool,
    is_relocating_start: bool,
    is_relocating_finish: bool,
}

impl EditSession {
    pub fn new() -> EditSession {
        EditSession::default()
    }

    pub fn is_pointer_down(&self) -> bool {
        self.is_pointer_down
    }
    pub fn will_paint_wall(&self) -> bool {
        self.will_paint_wall
    }
    pub fn is_relocating_start(&self) -> bool {
        self.is_relocating_start
    }
    pub fn is_relocating_finish(&self) -> bool {
        self.is_relocating_finish
    }

    /// The endpoint being dragged, if any.
    pub fn relocating(&self) -> Option<Endpoint> {
        if self.is_relocating_start {
            Some(Endpoint::Start)
        } else if self.is_relocating_finish {
            Some(Endpoint::Finish)
        } else {
            None
        }
    }

    pub fn handle(&mut self, grid: &mut Grid, event: PointerEvent) -> EditEffect {
        let effect = match event {
            PointerEvent::Down(id) => self.pointer_down(grid, id),
            PointerEvent::Enter(id) => self.pointer_enter(grid, id),
            PointerEvent::Up(id) => self.pointer_up(grid, id),
            PointerEvent::Leave => self.pointer_leave(grid),
        };
        debug!("{:?} -> {:?}", event, effect);
        effect
    }

    pub fn pointer_down(&mut self, grid: &mut Grid, id: CellId) -> EditEffect {
        let Some(cell) = grid.cell(id) else {
            return EditEffect::Ignored;
        };
        let pressed_endpoint = if cell.is_start() {
            Some(Endpoint::Start)
        } else if cell.is_finish() {
            Some(Endpoint::Finish)
        } else {
            None
        };
        let is_wall = cell.is_wall();
        *self = EditSession::default();

        if let Some(endpoint) = pressed_endpoint {
            self.start_relocation(endpoint);
            return EditEffect::RelocationStarted { endpoint, cell: id };
        }
        if grid.is_free(id) {
            let missing = [Endpoint::Start, Endpoint::Finish]
                .into_iter()
                .find(|&e| grid.endpoint(e).is_none());
            if let Some(endpoint) = missing {
                grid.set_endpoint(endpoint, Some(id));
                self.start_relocation(endpoint);
                return EditEffect::EndpointPlaced { endpoint, cell: id };
            }
        }
        self.is_pointer_down = true;
        self.will_paint_wall = !is_wall;
        grid.set_wall(id, self.will_paint_wall);
        EditEffect::WallPainted {
            cell: id,
            is_wall: self.will_paint_wall,
        }
    }

    pub fn pointer_enter(&mut self, grid: &mut Grid, id: CellId) -> EditEffect {
        if !self.is_pointer_down {
            return EditEffect::Ignored;
        }
        if let Some(endpoint) = self.relocating() {
            return self.move_endpoint(grid, endpoint, id);
        }
        match grid.cell(id) {
            Some(cell) if !cell.is_endpoint() => {
                grid.set_wall(id, self.will_paint_wall);
                EditEffect::WallPainted {
                    cell: id,
                    is_wall: self.will_paint_wall,
                }
            }
            _ => EditEffect::Ignored,
        }
    }

    /// Ends the gesture. A dragged endpoint settles on `id` when that cell is free.
    pub fn pointer_up(&mut self, grid: &mut Grid, id: CellId) -> EditEffect {
        let relocating = self.relocating().filter(|_| self.is_pointer_down);
        *self = EditSession::default();
        match relocating {
            Some(endpoint) => match self.move_endpoint(grid, endpoint, id) {
                EditEffect::Ignored => EditEffect::GestureEnded,
                moved => moved,
            },
            None => EditEffect::GestureEnded,
        }
    }

    /// Leaving the grid mid-drag discards the dragged endpoint; leaving while painting ends
    /// the paint stroke.
    pub fn pointer_leave(&mut self, grid: &mut Grid) -> EditEffect {
        if !self.is_pointer_down {
            return EditEffect::Ignored;
        }
        let relocating = self.relocating();
        *self = EditSession::default();
        match relocating {
            Some(endpoint) => {
                grid.set_endpoint(endpoint, None);
                EditEffect::EndpointDropped { endpoint }
            }
            None => EditEffect::GestureEnded,
        }
    }

    fn start_relocation(&mut self, endpoint: Endpoint) {
        self.is_pointer_down = true;
        match endpoint {
            Endpoint::Start => self.is_relocating_start = true,
            Endpoint::Finish => self.is_relocating_finish = true,
        }
    }

    fn move_endpoint(&self, grid: &mut Grid, endpoint: Endpoint, id: CellId) -> EditEffect {
        if grid.is_free(id) && grid.set_endpoint(endpoint, Some(id)) {
            EditEffect::EndpointMoved { endpoint, cell: id }
        } else {
            EditEffect::Ignored
        }
    }
}
