use crate::layout::Rect;
use crate::types::color::{self, Color};

/// Rendering backend that drawables and widgets draw into.
pub trait Batch {
    /// Current tint.
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect);
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
    /// Outline used by the table debug overlay.
    fn debug_rect(&mut self, rect: Rect, color: Color);
    /// Restrict drawing to `rect` (intersected with any active clip).
    /// Returns false, and pushes nothing, when the result is empty.
    fn push_clip(&mut self, rect: Rect) -> bool;
    fn pop_clip(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill { rect: Rect, color: Color },
    Text { text: String, x: f32, y: f32, color: Color },
    Debug { rect: Rect, color: Color },
    PushClip(Rect),
    PopClip,
}

/// Batch that records every operation instead of rasterizing.
#[derive(Debug, Clone)]
pub struct RecordingBatch {
    color: Color,
    clips: Vec<Rect>,
    ops: Vec<DrawOp>,
}

impl Default for RecordingBatch {
    fn default() -> Self {
        Self {
            color: color::white(),
            clips: Vec::new(),
            ops: Vec::new(),
        }
    }
}

impl RecordingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn fills(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn debug_rects(&self) -> Vec<(Rect, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Debug { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Active clip, if any.
    pub fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.clips.clear();
        self.color = color::white();
    }
}

impl Batch for RecordingBatch {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Fill {
            rect,
            color: self.color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            color: self.color,
        });
    }

    fn debug_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Debug { rect, color });
    }

    fn push_clip(&mut self, rect: Rect) -> bool {
        let clipped = match self.clips.last() {
            Some(active) => active.intersect(&rect),
            None => Some(rect),
        };
        match clipped {
            Some(rect) if !rect.is_empty() => {
                self.clips.push(rect);
                self.ops.push(DrawOp::PushClip(rect));
                true
            }
            _ => false,
        }
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_some() {
            self.ops.push(DrawOp::PopClip);
        }
    }
}
