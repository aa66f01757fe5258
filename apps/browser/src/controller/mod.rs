//! Controller layer: UI events parsed from input lines and their dispatch to the browser core.

pub mod events;
pub mod orchestration;
