//! Crew-side fog of war.
//!
//! Recomputed from final positions at the end of each tick: tiles in
//! sight of a living crew actor are visible, previously seen tiles decay
//! to revealed, and the rest stay unknown. Enemy snapshot filtering and
//! wave spawn concealment both read this grid.

use breacher_core::enums::{Side, Visibility};
use breacher_core::state::FogSummary;
use breacher_core::types::GridPos;
use breacher_map::{los, MapState};

use crate::roster::Roster;

#[derive(Debug, Clone)]
pub struct FogGrid {
    width: u32,
    height: u32,
    cells: Vec<Visibility>,
}

impl FogGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Visibility::Unknown; (width * height) as usize],
        }
    }

    pub fn get(&self, pos: GridPos) -> Visibility {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width as i32 || pos.y >= self.height as i32 {
            return Visibility::Unknown;
        }
        self.cells[(pos.y as u32 * self.width + pos.x as u32) as usize]
    }

    fn set(&mut self, pos: GridPos, vis: Visibility) {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width as i32 || pos.y >= self.height as i32 {
            return;
        }
        self.cells[(pos.y as u32 * self.width + pos.x as u32) as usize] = vis;
    }

    pub fn summary(&self) -> FogSummary {
        let mut summary = FogSummary {
            visible: 0,
            revealed: 0,
            unknown: 0,
        };
        for cell in &self.cells {
            match cell {
                Visibility::Visible => summary.visible += 1,
                Visibility::Revealed => summary.revealed += 1,
                Visibility::Unknown => summary.unknown += 1,
            }
        }
        summary
    }
}

pub fn run(fog: &mut FogGrid, roster: &Roster, map: &MapState, tick: u64) {
    for cell in fog.cells.iter_mut() {
        if *cell == Visibility::Visible {
            *cell = Visibility::Revealed;
        }
    }

    for crew in roster.living_on(Side::Crew) {
        let vision = crew.resolved_vision(tick);
        let reach = vision.ceil() as i32;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let tile = crew.pos.offset(dx, dy);
                if !map.in_bounds(tile) || fog.get(tile) == Visibility::Visible {
                    continue;
                }
                if crew.pos.distance_to(tile) <= vision
                    && los::has_line_of_sight(map, crew.pos, tile)
                {
                    fog.set(tile, Visibility::Visible);
                }
            }
        }
    }
}
