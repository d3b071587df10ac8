pub mod color;
mod edges;
mod enums;

pub use color::Color;
pub use edges::Edges;
pub use enums::{Align, Alignment, DebugLines, Scaling};
