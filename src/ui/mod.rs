//! Terminal front end: crossterm input tracking and the diff renderer.

pub mod input;
pub mod renderer;
