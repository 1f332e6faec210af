//! Core data structures for the regression pipeline.

mod frame;
mod layout;

pub use frame::{Frame, Index, Series, TimeColumn};
pub use layout::{OutputColumn, OutputKind, OutputLayout};
