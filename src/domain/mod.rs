//! Pure game rules: geometry, tiles, entities, movement, ghost AI.
//! No I/O, no terminal; everything here is unit-testable in isolation.

pub mod ai;
pub mod entity;
pub mod geom;
pub mod motion;
pub mod tile;
