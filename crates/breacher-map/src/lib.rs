//! Battle map for the breacher simulation: tile grid, cover, doors and
//! other interactables, line of sight, and pathfinding.

pub mod grid;
pub mod los;
pub mod path;
pub mod template;

pub use grid::MapState;
pub use template::TemplateError;
