//! Deterministic A* pathfinding over walkable tiles.
//!
//! Integer costs (10 straight, 14 diagonal) with an octile heuristic.
//! Diagonal steps are disallowed when either orthogonal neighbor is
//! unwalkable, so paths never cut corners. The open set orders by
//! (f-cost, position), which makes equal-cost paths reproducible.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use breacher_core::types::{Dir8, GridPos};

use crate::grid::MapState;

const COST_STRAIGHT: i64 = 10;
const COST_DIAGONAL: i64 = 14;

fn heuristic(a: GridPos, b: GridPos) -> i64 {
    let dx = (b.x - a.x).abs() as i64;
    let dy = (b.y - a.y).abs() as i64;
    COST_DIAGONAL * dx.min(dy) + COST_STRAIGHT * (dx.max(dy) - dx.min(dy))
}

/// Shortest path from `start` (exclusive) to `goal` (inclusive).
///
/// The start cell does not need to be walkable (an actor may stand in a
/// doorway that closed behind it); every stepped-onto cell does. Returns
/// `None` when the goal is unwalkable or unreachable.
pub fn find_path(map: &MapState, start: GridPos, goal: GridPos) -> Option<Vec<GridPos>> {
    if start == goal {
        return Some(Vec::new());
    }
    if !map.is_walkable(goal) {
        return None;
    }

    let mut open: BinaryHeap<Reverse<(i64, i32, i32)>> = BinaryHeap::new();
    let mut g_score: HashMap<GridPos, i64> = HashMap::new();
    let mut came_from: HashMap<GridPos, GridPos> = HashMap::new();

    g_score.insert(start, 0);
    open.push(Reverse((heuristic(start, goal), start.y, start.x)));

    while let Some(Reverse((f, y, x))) = open.pop() {
        let current = GridPos::new(x, y);
        let current_g = match g_score.get(&current) {
            Some(&g) => g,
            None => continue,
        };
        // Stale heap entry for a cell already reached cheaper.
        if f > current_g + heuristic(current, goal) {
            continue;
        }
        if current == goal {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(&prev) = came_from.get(&cursor) {
                if prev == start {
                    break;
                }
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }

        for dir in Dir8::ALL {
            let (dx, dy) = dir.delta();
            let next = current.offset(dx, dy);
            if !map.is_walkable(next) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            if diagonal {
                // No corner cutting past a blocked orthogonal neighbor.
                if !map.is_walkable(current.offset(dx, 0))
                    || !map.is_walkable(current.offset(0, dy))
                {
                    continue;
                }
            }
            let step = if diagonal { COST_DIAGONAL } else { COST_STRAIGHT };
            let tentative = current_g + step;
            if g_score.get(&next).is_none_or(|&g| tentative < g) {
                g_score.insert(next, tentative);
                came_from.insert(next, current);
                open.push(Reverse((tentative + heuristic(next, goal), next.y, next.x)));
            }
        }
    }

    None
}
