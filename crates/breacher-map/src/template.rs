//! Char-grid map template parsing.
//!
//! Templates are a thin load format, not a generator: one character per
//! tile, one string per row. The parser produces the tile grid plus seeds
//! for the interactable arena; everything else (cover masks, id
//! assignment) happens in [`crate::grid::MapState`].

use thiserror::Error;

use breacher_core::enums::{CoverHeight, TileKind};
use breacher_core::interact::{DoorState, HazardState, InteractableKind, TerminalState};
use breacher_core::mission::MapTemplate;
use breacher_core::types::GridPos;

/// Template parse failures. These are contract violations by the mission
/// author, not gameplay.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template has no rows")]
    Empty,
    #[error("unknown glyph '{glyph}' at row {row}, col {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("row {row} is {len} tiles wide, declared width is {width}")]
    RowTooWide { row: usize, len: usize, width: u32 },
    #[error("template has {rows} rows, declared height is {height}")]
    TooManyRows { rows: usize, height: u32 },
    #[error("declared width {width} and height {height} must be non-zero")]
    ZeroSize { width: u32, height: u32 },
}

/// Parse result: tile grid in row-major order plus interactable seeds in
/// reading order.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileKind>,
    pub entry: Vec<bool>,
    pub seeds: Vec<(InteractableKind, GridPos)>,
}

/// Tile meaning of one glyph.
fn classify(glyph: char) -> Option<(TileKind, bool, Option<InteractableKind>)> {
    match glyph {
        '.' => Some((TileKind::Floor, false, None)),
        '#' => Some((TileKind::Wall, false, None)),
        ' ' => Some((TileKind::Void, false, None)),
        'E' => Some((TileKind::Floor, true, None)),
        '-' => Some((TileKind::Cover(CoverHeight::Low), false, None)),
        '=' => Some((TileKind::Cover(CoverHeight::Half), false, None)),
        '+' => Some((TileKind::Cover(CoverHeight::High), false, None)),
        'D' => Some((
            TileKind::Door,
            false,
            Some(InteractableKind::Door(DoorState::Closed)),
        )),
        'L' => Some((
            TileKind::Door,
            false,
            Some(InteractableKind::Door(DoorState::Locked)),
        )),
        'T' => Some((
            TileKind::Floor,
            false,
            Some(InteractableKind::Terminal(TerminalState::Idle)),
        )),
        'X' => Some((
            TileKind::Floor,
            false,
            Some(InteractableKind::Hazard(HazardState::Armed)),
        )),
        _ => None,
    }
}

/// Parse a template into tiles and interactable seeds.
///
/// With explicit dimensions, short rows pad with void and oversize input is
/// an error. Without, the size derives from the longest row and row count.
pub fn parse(template: &MapTemplate) -> Result<ParsedTemplate, TemplateError> {
    if template.rows.is_empty() {
        return Err(TemplateError::Empty);
    }

    let height = match template.height {
        Some(h) => {
            if template.rows.len() > h as usize {
                return Err(TemplateError::TooManyRows {
                    rows: template.rows.len(),
                    height: h,
                });
            }
            h
        }
        None => template.rows.len() as u32,
    };
    let longest = template
        .rows
        .iter()
        .map(|r| r.chars().count())
        .max()
        .unwrap_or(0);
    let width = match template.width {
        Some(w) => w,
        None => longest as u32,
    };
    if width == 0 || height == 0 {
        return Err(TemplateError::ZeroSize { width, height });
    }

    let mut tiles = vec![TileKind::Void; (width * height) as usize];
    let mut entry = vec![false; (width * height) as usize];
    let mut seeds = Vec::new();

    for (y, row) in template.rows.iter().enumerate() {
        let glyphs: Vec<char> = row.chars().collect();
        if glyphs.len() > width as usize {
            return Err(TemplateError::RowTooWide {
                row: y,
                len: glyphs.len(),
                width,
            });
        }
        for (x, &glyph) in glyphs.iter().enumerate() {
            let (kind, is_entry, seed) = classify(glyph).ok_or(TemplateError::UnknownGlyph {
                glyph,
                row: y,
                col: x,
            })?;
            let idx = y * width as usize + x;
            tiles[idx] = kind;
            entry[idx] = is_entry;
            if let Some(seed_kind) = seed {
                seeds.push((seed_kind, GridPos::new(x as i32, y as i32)));
            }
        }
    }

    Ok(ParsedTemplate {
        width,
        height,
        tiles,
        entry,
        seeds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(rows: &[&str]) -> MapTemplate {
        MapTemplate {
            rows: rows.iter().map(|r| r.to_string()).collect(),
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_parse_basic_room() {
        let parsed = parse(&template(&["#####", "#E.D#", "#####"])).unwrap();
        assert_eq!(parsed.width, 5);
        assert_eq!(parsed.height, 3);
        assert_eq!(parsed.tiles[5], TileKind::Wall);
        assert_eq!(parsed.tiles[6], TileKind::Floor);
        assert!(parsed.entry[6], "E tile carries the entry flag");
        assert_eq!(parsed.tiles[8], TileKind::Door);
        assert_eq!(parsed.seeds.len(), 1);
        assert_eq!(
            parsed.seeds[0],
            (
                InteractableKind::Door(DoorState::Closed),
                GridPos::new(3, 1)
            )
        );
    }

    #[test]
    fn test_parse_ragged_rows_pad_with_void() {
        let parsed = parse(&template(&["###", "#"])).unwrap();
        assert_eq!(parsed.width, 3);
        assert_eq!(parsed.tiles[4], TileKind::Void);
        assert_eq!(parsed.tiles[5], TileKind::Void);
    }

    #[test]
    fn test_parse_cover_glyphs() {
        let parsed = parse(&template(&["-=+"])).unwrap();
        assert_eq!(parsed.tiles[0], TileKind::Cover(CoverHeight::Low));
        assert_eq!(parsed.tiles[1], TileKind::Cover(CoverHeight::Half));
        assert_eq!(parsed.tiles[2], TileKind::Cover(CoverHeight::High));
    }

    #[test]
    fn test_parse_interactable_seeds_in_reading_order() {
        let parsed = parse(&template(&["T.X", "L.T"])).unwrap();
        let kinds: Vec<_> = parsed.seeds.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                InteractableKind::Terminal(TerminalState::Idle),
                InteractableKind::Hazard(HazardState::Armed),
                InteractableKind::Door(DoorState::Locked),
                InteractableKind::Terminal(TerminalState::Idle),
            ]
        );
    }

    #[test]
    fn test_parse_unknown_glyph() {
        let err = parse(&template(&["..", ".q"])).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownGlyph {
                glyph: 'q',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(&template(&[])).unwrap_err(), TemplateError::Empty);
    }

    #[test]
    fn test_parse_explicit_size_validation() {
        let mut t = template(&["....."]);
        t.width = Some(3);
        assert_eq!(
            parse(&t).unwrap_err(),
            TemplateError::RowTooWide {
                row: 0,
                len: 5,
                width: 3
            }
        );

        let mut t = template(&["...", "...", "..."]);
        t.height = Some(2);
        assert_eq!(
            parse(&t).unwrap_err(),
            TemplateError::TooManyRows { rows: 3, height: 2 }
        );

        let mut t = template(&["..."]);
        t.width = Some(8);
        t.height = Some(2);
        let parsed = parse(&t).unwrap();
        assert_eq!(parsed.width, 8);
        assert_eq!(parsed.height, 2);
        assert_eq!(parsed.tiles[3], TileKind::Void, "padding is void");
    }
}
