use std::fmt;

use crate::batch::Batch;
use crate::layout::Rect;
use crate::types::color::{self, Color};
use crate::types::Edges;

/// Something that can draw itself into a rectangle: a nine-patch, a texture
/// region, a flat colour. Shared read-only between styles as
/// `Rc<dyn Drawable>`.
pub trait Drawable: fmt::Debug {
    fn min_width(&self) -> f32 {
        0.0
    }

    fn min_height(&self) -> f32 {
        0.0
    }

    fn left_inset(&self) -> f32 {
        0.0
    }

    fn right_inset(&self) -> f32 {
        0.0
    }

    fn top_inset(&self) -> f32 {
        0.0
    }

    fn bottom_inset(&self) -> f32 {
        0.0
    }

    fn draw(&self, batch: &mut dyn Batch, region: Rect);

    /// All four insets as table padding.
    fn insets(&self) -> Edges {
        Edges::new(
            self.top_inset(),
            self.right_inset(),
            self.bottom_inset(),
            self.left_inset(),
        )
    }

    fn min_size(&self) -> (f32, f32) {
        (self.min_width(), self.min_height())
    }
}

/// Flat colour fill with a declared minimum size and insets.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidDrawable {
    color: Color,
    min_width: f32,
    min_height: f32,
    insets: Edges,
}

impl SolidDrawable {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            min_width: 0.0,
            min_height: 0.0,
            insets: Edges::ZERO,
        }
    }

    pub fn with_min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn with_insets(mut self, insets: Edges) -> Self {
        self.insets = insets;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Drawable for SolidDrawable {
    fn min_width(&self) -> f32 {
        self.min_width
    }

    fn min_height(&self) -> f32 {
        self.min_height
    }

    fn left_inset(&self) -> f32 {
        self.insets.left
    }

    fn right_inset(&self) -> f32 {
        self.insets.right
    }

    fn top_inset(&self) -> f32 {
        self.insets.top
    }

    fn bottom_inset(&self) -> f32 {
        self.insets.bottom
    }

    fn draw(&self, batch: &mut dyn Batch, region: Rect) {
        let tint = batch.color();
        batch.set_color(color::multiply(tint, self.color));
        batch.fill_rect(region);
        batch.set_color(tint);
    }
}
