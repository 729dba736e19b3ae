//! MapState: the battle grid with cover masks and the interactable arena.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use breacher_core::enums::{CoverHeight, TileKind};
use breacher_core::interact::{
    DoorState, HazardState, Interactable, InteractableKind, TerminalState,
};
use breacher_core::types::{Dir8, GridPos, InteractableId};

use crate::template::ParsedTemplate;

/// Cover height toward each of the eight directions, derived at build time
/// from the tile's neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverMask {
    heights: [CoverHeight; 8],
}

impl CoverMask {
    pub fn get(&self, dir: Dir8) -> CoverHeight {
        self.heights[dir.index()]
    }

    fn set(&mut self, dir: Dir8, height: CoverHeight) {
        self.heights[dir.index()] = height;
    }
}

/// One grid cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub cover: CoverMask,
    pub entry_zone: bool,
    pub interactable: Option<InteractableId>,
}

/// The battle map: an immutable-size tile grid plus the interactable
/// arena. Tiles never change kind after build; doors and the like change
/// state through their interactable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapState {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    interactables: Vec<Interactable>,
    #[serde(skip)]
    index_by_id: HashMap<InteractableId, usize>,
}

impl MapState {
    /// Build from a parsed template: assign interactable ids in reading
    /// order, then derive cover masks.
    pub fn from_template(parsed: ParsedTemplate) -> Self {
        let mut tiles: Vec<Tile> = parsed
            .tiles
            .iter()
            .zip(parsed.entry.iter())
            .map(|(&kind, &entry_zone)| Tile {
                kind,
                cover: CoverMask::default(),
                entry_zone,
                interactable: None,
            })
            .collect();

        let mut interactables = Vec::with_capacity(parsed.seeds.len());
        let mut index_by_id = HashMap::new();
        for (i, (kind, pos)) in parsed.seeds.into_iter().enumerate() {
            let id = InteractableId(i as u32);
            tiles[(pos.y as u32 * parsed.width + pos.x as u32) as usize].interactable = Some(id);
            index_by_id.insert(id, interactables.len());
            interactables.push(Interactable::new(id, pos, kind));
        }

        let mut map = Self {
            width: parsed.width,
            height: parsed.height,
            tiles,
            interactables,
            index_by_id,
        };
        map.derive_cover();
        map
    }

    /// Rebuild the id index after deserialization.
    pub fn reindex(&mut self) {
        self.index_by_id = self
            .interactables
            .iter()
            .enumerate()
            .map(|(i, it)| (it.id, i))
            .collect();
    }

    fn derive_cover(&mut self) {
        let mut masks = vec![CoverMask::default(); self.tiles.len()];
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = GridPos::new(x, y);
                let mut mask = CoverMask::default();
                for dir in Dir8::ALL {
                    let (dx, dy) = dir.delta();
                    let neighbor = pos.offset(dx, dy);
                    let height = match self.tile(neighbor).map(|t| t.kind) {
                        Some(TileKind::Wall) => CoverHeight::Full,
                        Some(TileKind::Cover(h)) => h,
                        // Doors contribute no cover; their sight blocking
                        // already gates LOS.
                        _ => CoverHeight::None,
                    };
                    mask.set(dir, height);
                }
                masks[(y as u32 * self.width + x as u32) as usize] = mask;
            }
        }
        for (tile, mask) in self.tiles.iter_mut().zip(masks) {
            tile.cover = mask;
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    pub fn tile(&self, pos: GridPos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.tiles[(pos.y as u32 * self.width + pos.x as u32) as usize])
    }

    /// Whether actors can stand on or step through this cell. Floor is
    /// walkable unless a blocking interactable (terminal, shut door)
    /// occupies it; Door tiles follow their door state.
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        let Some(tile) = self.tile(pos) else {
            return false;
        };
        match tile.kind {
            TileKind::Floor | TileKind::Door => match tile.interactable {
                Some(id) => self
                    .interactable(id)
                    .map(|it| !it.blocks_movement())
                    .unwrap_or(true),
                None => true,
            },
            TileKind::Wall | TileKind::Void | TileKind::Cover(_) => false,
        }
    }

    /// Whether this cell blocks sight lines across it.
    pub fn blocks_sight(&self, pos: GridPos) -> bool {
        let Some(tile) = self.tile(pos) else {
            // Out of bounds blocks; rays never escape the map.
            return true;
        };
        match tile.kind {
            TileKind::Wall => true,
            TileKind::Door => match tile.interactable {
                Some(id) => self
                    .interactable(id)
                    .map(|it| it.blocks_sight())
                    .unwrap_or(false),
                None => false,
            },
            _ => false,
        }
    }

    /// Cover protecting a defender on `defender` from an attacker on
    /// `attacker`: octant lookup into the defender tile's mask.
    pub fn cover_toward(&self, defender: GridPos, attacker: GridPos) -> CoverHeight {
        if defender == attacker {
            return CoverHeight::None;
        }
        let dir = Dir8::toward(defender, attacker);
        self.tile(defender)
            .map(|t| t.cover.get(dir))
            .unwrap_or(CoverHeight::None)
    }

    /// All entry-zone tiles in row-major order.
    pub fn entry_zones(&self) -> Vec<GridPos> {
        let mut zones = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = GridPos::new(x, y);
                if self.tiles[(y as u32 * self.width + x as u32) as usize].entry_zone {
                    zones.push(pos);
                }
            }
        }
        zones
    }

    pub fn is_entry_zone(&self, pos: GridPos) -> bool {
        self.tile(pos).map(|t| t.entry_zone).unwrap_or(false)
    }

    pub fn interactable(&self, id: InteractableId) -> Option<&Interactable> {
        let idx = *self.index_by_id.get(&id)?;
        Some(&self.interactables[idx])
    }

    pub fn interactable_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        let idx = *self.index_by_id.get(&id)?;
        Some(&mut self.interactables[idx])
    }

    pub fn interactable_at(&self, pos: GridPos) -> Option<&Interactable> {
        let id = self.tile(pos)?.interactable?;
        self.interactable(id)
    }

    /// Interactables in id order.
    pub fn interactables(&self) -> impl Iterator<Item = &Interactable> {
        self.interactables.iter()
    }

    pub fn terminal_count(&self) -> u32 {
        self.interactables
            .iter()
            .filter(|it| matches!(it.kind, InteractableKind::Terminal(_)))
            .count() as u32
    }

    pub fn hacked_terminal_count(&self) -> u32 {
        self.interactables
            .iter()
            .filter(|it| matches!(it.kind, InteractableKind::Terminal(TerminalState::Hacked)))
            .count() as u32
    }

    pub fn armed_hazard_count(&self) -> u32 {
        self.interactables
            .iter()
            .filter(|it| matches!(it.kind, InteractableKind::Hazard(HazardState::Armed)))
            .count() as u32
    }
}
