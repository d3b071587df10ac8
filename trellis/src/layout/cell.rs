use crate::scene::ActorId;
use crate::types::{Align, Alignment, Edges};

/// Location of a cell: the table that owns it and its index in that
/// table's cell list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub table: ActorId,
    pub index: usize,
}

/// Widest span a cell can take. Larger colspans are clamped.
pub const MAX_COLSPAN: usize = 1 << 12;

/// One layout slot in a table.
///
/// Every constraint is optional. An unset field falls back to the engine
/// default when the table is measured (zero padding, no expansion, no fill,
/// centred, colspan 1, sizes taken from the actor). The same type doubles as
/// the table, column and row defaults: when a cell is created, the set fields
/// of those defaults are copied into it.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub(crate) actor: Option<ActorId>,
    pub(crate) row: usize,
    pub(crate) column: usize,
    name: Option<String>,

    pub(crate) min_width: Option<f32>,
    pub(crate) min_height: Option<f32>,
    pub(crate) pref_width: Option<f32>,
    pub(crate) pref_height: Option<f32>,
    pub(crate) max_width: Option<f32>,
    pub(crate) max_height: Option<f32>,

    pad_top: Option<f32>,
    pad_left: Option<f32>,
    pad_bottom: Option<f32>,
    pad_right: Option<f32>,

    space_top: Option<f32>,
    space_left: Option<f32>,
    space_bottom: Option<f32>,
    space_right: Option<f32>,

    expand_x: Option<u32>,
    expand_y: Option<u32>,
    fill_x: Option<f32>,
    fill_y: Option<f32>,
    align: Option<Alignment>,
    colspan: Option<usize>,
}

macro_rules! overlay_fields {
    ($dst:expr, $src:expr, $($field:ident),* $(,)?) => {
        $(
            if $src.$field.is_some() {
                $dst.$field = $src.$field;
            }
        )*
    };
}

impl Cell {
    pub(crate) fn new(actor: Option<ActorId>, row: usize, column: usize) -> Self {
        Self {
            actor,
            row,
            column,
            ..Default::default()
        }
    }

    /// Copy every field that `other` sets. Actor, name and grid position are
    /// never inherited from a defaults cell.
    pub(crate) fn overlay(&mut self, other: &Cell) {
        overlay_fields!(
            self,
            other,
            min_width,
            min_height,
            pref_width,
            pref_height,
            max_width,
            max_height,
            pad_top,
            pad_left,
            pad_bottom,
            pad_right,
            space_top,
            space_left,
            space_bottom,
            space_right,
            expand_x,
            expand_y,
            fill_x,
            fill_y,
            align,
            colspan,
        );
    }

    // Accessors

    pub fn actor(&self) -> Option<ActorId> {
        self.actor
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of columns this cell spans, between 1 and [`MAX_COLSPAN`].
    pub fn span(&self) -> usize {
        self.colspan.unwrap_or(1).clamp(1, MAX_COLSPAN)
    }

    pub fn padding(&self) -> Edges {
        Edges::new(
            self.pad_top.unwrap_or(0.0),
            self.pad_right.unwrap_or(0.0),
            self.pad_bottom.unwrap_or(0.0),
            self.pad_left.unwrap_or(0.0),
        )
    }

    pub fn spacing(&self) -> Edges {
        Edges::new(
            self.space_top.unwrap_or(0.0),
            self.space_right.unwrap_or(0.0),
            self.space_bottom.unwrap_or(0.0),
            self.space_left.unwrap_or(0.0),
        )
    }

    pub fn expand_weights(&self) -> (u32, u32) {
        (self.expand_x.unwrap_or(0), self.expand_y.unwrap_or(0))
    }

    pub fn fill_fractions(&self) -> (f32, f32) {
        (self.fill_x.unwrap_or(0.0), self.fill_y.unwrap_or(0.0))
    }

    pub fn alignment(&self) -> Alignment {
        self.align.unwrap_or(Alignment::CENTER)
    }

    // Identity

    pub fn named(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    // Size overrides

    /// Fixed width: sets min, pref and max width.
    pub fn width(&mut self, width: f32) -> &mut Self {
        self.min_width = Some(width);
        self.pref_width = Some(width);
        self.max_width = Some(width);
        self
    }

    /// Fixed height: sets min, pref and max height.
    pub fn height(&mut self, height: f32) -> &mut Self {
        self.min_height = Some(height);
        self.pref_height = Some(height);
        self.max_height = Some(height);
        self
    }

    pub fn size(&mut self, width: f32, height: f32) -> &mut Self {
        self.width(width).height(height)
    }

    pub fn min_width(&mut self, width: f32) -> &mut Self {
        self.min_width = Some(width);
        self
    }

    pub fn min_height(&mut self, height: f32) -> &mut Self {
        self.min_height = Some(height);
        self
    }

    pub fn min_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.min_width(width).min_height(height)
    }

    pub fn pref_width(&mut self, width: f32) -> &mut Self {
        self.pref_width = Some(width);
        self
    }

    pub fn pref_height(&mut self, height: f32) -> &mut Self {
        self.pref_height = Some(height);
        self
    }

    pub fn pref_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.pref_width(width).pref_height(height)
    }

    /// Upper bound on the actor width. Zero means unbounded.
    pub fn max_width(&mut self, width: f32) -> &mut Self {
        self.max_width = Some(width);
        self
    }

    pub fn max_height(&mut self, height: f32) -> &mut Self {
        self.max_height = Some(height);
        self
    }

    pub fn max_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.max_width(width).max_height(height)
    }

    // Padding and spacing

    pub fn pad(&mut self, pad: Edges) -> &mut Self {
        self.pad_top = Some(pad.top);
        self.pad_left = Some(pad.left);
        self.pad_bottom = Some(pad.bottom);
        self.pad_right = Some(pad.right);
        self
    }

    pub fn pad_top(&mut self, pad: f32) -> &mut Self {
        self.pad_top = Some(pad);
        self
    }

    pub fn pad_left(&mut self, pad: f32) -> &mut Self {
        self.pad_left = Some(pad);
        self
    }

    pub fn pad_bottom(&mut self, pad: f32) -> &mut Self {
        self.pad_bottom = Some(pad);
        self
    }

    pub fn pad_right(&mut self, pad: f32) -> &mut Self {
        self.pad_right = Some(pad);
        self
    }

    /// Spacing only applies on sides that face another cell, never against
    /// the table edge.
    pub fn space(&mut self, space: Edges) -> &mut Self {
        self.space_top = Some(space.top);
        self.space_left = Some(space.left);
        self.space_bottom = Some(space.bottom);
        self.space_right = Some(space.right);
        self
    }

    pub fn space_top(&mut self, space: f32) -> &mut Self {
        self.space_top = Some(space);
        self
    }

    pub fn space_left(&mut self, space: f32) -> &mut Self {
        self.space_left = Some(space);
        self
    }

    pub fn space_bottom(&mut self, space: f32) -> &mut Self {
        self.space_bottom = Some(space);
        self
    }

    pub fn space_right(&mut self, space: f32) -> &mut Self {
        self.space_right = Some(space);
        self
    }

    // Expansion and fill

    pub fn expand(&mut self) -> &mut Self {
        self.expand_weight(1, 1)
    }

    pub fn expand_x(&mut self) -> &mut Self {
        self.expand_x = Some(1);
        self
    }

    pub fn expand_y(&mut self) -> &mut Self {
        self.expand_y = Some(1);
        self
    }

    /// Share of leftover space claimed by this cell's column and row.
    pub fn expand_weight(&mut self, x: u32, y: u32) -> &mut Self {
        self.expand_x = Some(x);
        self.expand_y = Some(y);
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        self.fill_fraction(1.0, 1.0)
    }

    pub fn fill_x(&mut self) -> &mut Self {
        self.fill_x = Some(1.0);
        self
    }

    pub fn fill_y(&mut self) -> &mut Self {
        self.fill_y = Some(1.0);
        self
    }

    pub fn fill_fraction(&mut self, x: f32, y: f32) -> &mut Self {
        self.fill_x = Some(x);
        self.fill_y = Some(y);
        self
    }

    // Alignment

    pub fn align(&mut self, align: Alignment) -> &mut Self {
        self.align = Some(align);
        self
    }

    pub fn center(&mut self) -> &mut Self {
        self.align(Alignment::CENTER)
    }

    pub fn top(&mut self) -> &mut Self {
        self.align_vertical(Align::Start)
    }

    pub fn bottom(&mut self) -> &mut Self {
        self.align_vertical(Align::End)
    }

    pub fn left(&mut self) -> &mut Self {
        self.align_horizontal(Align::Start)
    }

    pub fn right(&mut self) -> &mut Self {
        self.align_horizontal(Align::End)
    }

    fn align_horizontal(&mut self, align: Align) -> &mut Self {
        let mut alignment = self.alignment();
        alignment.horizontal = align;
        self.align(alignment)
    }

    fn align_vertical(&mut self, align: Align) -> &mut Self {
        let mut alignment = self.alignment();
        alignment.vertical = align;
        self.align(alignment)
    }

    // Grid

    pub fn colspan(&mut self, colspan: usize) -> &mut Self {
        self.colspan = Some(colspan);
        self
    }
}
