use unicode_width::UnicodeWidthStr;

use super::Widget;
use crate::error::{Error, Result};
use crate::scene::{ActorId, Stage};
use crate::types::color::{self, Color};

/// Metrics and colour for label text. The defaults describe one terminal
/// cell per column and per line.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub glyph_width: f32,
    pub line_height: f32,
    pub color: Color,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            glyph_width: 1.0,
            line_height: 1.0,
            color: color::white(),
        }
    }
}

/// A block of text.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    style: LabelStyle,
}

impl Label {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Widest line in display columns by the line count, scaled by the
    /// style metrics.
    pub(crate) fn pref_size(&self) -> (f32, f32) {
        if self.text.is_empty() {
            return (0.0, 0.0);
        }
        let columns = self.text.lines().map(|line| line.width()).max().unwrap_or(0);
        let lines = self.text.lines().count().max(1);
        (
            columns as f32 * self.style.glyph_width,
            lines as f32 * self.style.line_height,
        )
    }
}

impl Stage {
    pub fn new_label(&mut self, text: impl Into<String>, style: LabelStyle) -> ActorId {
        let label = Label {
            text: text.into(),
            style,
        };
        let size = label.pref_size();
        let id = self.spawn(Widget::Label(label));
        if let Some(actor) = self.actors.get_mut(id) {
            (actor.width, actor.height) = size;
        }
        id
    }

    pub fn label(&self, id: ActorId) -> Option<&Label> {
        match &self.actors.get(id)?.widget {
            Widget::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: ActorId, text: impl Into<String>) -> Result<()> {
        let Widget::Label(label) = &mut self.actor_mut(id)?.widget else {
            return Err(Error::WrongWidget {
                id,
                expected: "label",
            });
        };
        let text = text.into();
        if label.text == text {
            return Ok(());
        }
        label.text = text;
        self.invalidate_hierarchy(id);
        Ok(())
    }
}
