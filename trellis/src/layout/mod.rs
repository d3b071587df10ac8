mod cell;
mod engine;
mod rect;

pub use cell::{Cell, CellRef, MAX_COLSPAN};
pub use engine::{Arrangement, Measure, Placement, TableLayout};
pub use rect::Rect;
