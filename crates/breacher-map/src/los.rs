//! Line of sight over the tile grid.
//!
//! Integer Bresenham rasterization between cell centers. Endpoints are
//! exempt (standing in a doorway never blinds you); any interior cell that
//! blocks sight fails the check. Endpoints are canonically ordered before
//! rasterizing, so the result is symmetric for every wall configuration.

use breacher_core::types::GridPos;

use crate::grid::MapState;

/// Cells on the Bresenham line from `a` to `b`, inclusive of both ends.
pub fn bresenham(a: GridPos, b: GridPos) -> Vec<GridPos> {
    let mut cells = Vec::new();
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (a.x, a.y);
    loop {
        cells.push(GridPos::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// True when nothing blocks sight between the two cells.
pub fn has_line_of_sight(map: &MapState, a: GridPos, b: GridPos) -> bool {
    // Rasterize from a canonical end so los(a,b) == los(b,a).
    let (start, end) = if (a.y, a.x) <= (b.y, b.x) { (a, b) } else { (b, a) };
    let cells = bresenham(start, end);
    if cells.len() <= 2 {
        return true;
    }
    for cell in &cells[1..cells.len() - 1] {
        if map.blocks_sight(*cell) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template;
    use breacher_core::mission::MapTemplate;

    fn build(rows: &[&str]) -> MapState {
        let parsed = template::parse(&MapTemplate {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            width: None,
            height: None,
        })
        .expect("test template must parse");
        MapState::from_template(parsed)
    }

    #[test]
    fn test_clear_sight_across_room() {
        let map = build(&["......", "......", "......"]);
        assert!(has_line_of_sight(
            &map,
            GridPos::new(0, 0),
            GridPos::new(5, 2)
        ));
    }

    #[test]
    fn test_wall_blocks_sight() {
        let map = build(&[".....", "..#..", "....."]);
        assert!(!has_line_of_sight(
            &map,
            GridPos::new(0, 1),
            GridPos::new(4, 1)
        ));
        // Sight past the wall's row is clear.
        assert!(has_line_of_sight(
            &map,
            GridPos::new(0, 0),
            GridPos::new(4, 0)
        ));
    }

    #[test]
    fn test_endpoints_exempt() {
        // A viewer in a doorway is not blinded by the door cell itself.
        let map = build(&["D.D"]);
        assert!(has_line_of_sight(
            &map,
            GridPos::new(0, 0),
            GridPos::new(2, 0)
        ));
        // But a closed door strictly between two cells blocks.
        let map = build(&[".D."]);
        assert!(!has_line_of_sight(
            &map,
            GridPos::new(0, 0),
            GridPos::new(2, 0)
        ));
    }

    #[test]
    fn test_adjacent_cells_always_see() {
        let map = build(&["##", "##"]);
        assert!(has_line_of_sight(
            &map,
            GridPos::new(0, 0),
            GridPos::new(1, 1)
        ));
        assert!(has_line_of_sight(
            &map,
            GridPos::new(0, 0),
            GridPos::new(0, 0)
        ));
    }

    #[test]
    fn test_cover_does_not_block_sight() {
        let map = build(&[".+.", ".=.", ".-."]);
        assert!(has_line_of_sight(
            &map,
            GridPos::new(0, 0),
            GridPos::new(2, 0)
        ));
        assert!(has_line_of_sight(
            &map,
            GridPos::new(0, 1),
            GridPos::new(2, 1)
        ));
    }

    #[test]
    fn test_symmetry_on_diagonals() {
        // A wall layout that defeats naive (non-canonical) rasterization.
        let map = build(&["..#.", ".#..", "....", "...."]);
        let pairs = [
            (GridPos::new(0, 0), GridPos::new(3, 1)),
            (GridPos::new(3, 0), GridPos::new(0, 3)),
            (GridPos::new(1, 3), GridPos::new(3, 0)),
        ];
        for (a, b) in pairs {
            assert_eq!(
                has_line_of_sight(&map, a, b),
                has_line_of_sight(&map, b, a),
                "sight must be symmetric between {a:?} and {b:?}"
            );
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Sight is symmetric for arbitrary wall sets.
            #[test]
            fn prop_los_symmetric(
                walls in proptest::collection::vec((0..8i32, 0..8i32), 0..20),
                ax in 0..8i32, ay in 0..8i32,
                bx in 0..8i32, by in 0..8i32,
            ) {
                let mut rows = vec![vec!['.'; 8]; 8];
                for (x, y) in walls {
                    rows[y as usize][x as usize] = '#';
                }
                let rows: Vec<String> =
                    rows.into_iter().map(|r| r.into_iter().collect()).collect();
                let parsed =
                    template::parse(&MapTemplate { rows, width: None, height: None }).unwrap();
                let map = MapState::from_template(parsed);
                let a = GridPos::new(ax, ay);
                let b = GridPos::new(bx, by);
                prop_assert_eq!(
                    has_line_of_sight(&map, a, b),
                    has_line_of_sight(&map, b, a)
                );
            }
        }
    }
}
