//! Stage configuration.

use crate::types::color::{self, Color};

/// Per-stage settings.
///
/// Debug overlay colours live here rather than in process-wide state, so two
/// stages in one program can be configured independently.
#[derive(Debug, Clone)]
pub struct StageConfig {
    /// Outline of a table's grid area.
    pub table_debug_color: Color,
    /// Outline of each cell.
    pub cell_debug_color: Color,
    /// Outline of each widget inside a table.
    pub widget_debug_color: Color,
    /// Tint given to newly spawned actors.
    pub default_color: Color,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            table_debug_color: color::rgba(0.0, 0.0, 1.0, 1.0),
            cell_debug_color: color::rgba(1.0, 0.0, 0.0, 1.0),
            widget_debug_color: color::rgba(0.0, 1.0, 0.0, 1.0),
            default_color: color::white(),
        }
    }
}

impl StageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_debug_color(mut self, color: Color) -> Self {
        self.table_debug_color = color;
        self
    }

    pub fn cell_debug_color(mut self, color: Color) -> Self {
        self.cell_debug_color = color;
        self
    }

    pub fn widget_debug_color(mut self, color: Color) -> Self {
        self.widget_debug_color = color;
        self
    }

    pub fn default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }
}
