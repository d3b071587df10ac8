use std::cell::RefCell;
use std::collections::HashMap;

use super::{Cell, Rect};
use crate::error::{Error, Result};
use crate::scene::ActorId;
use crate::types::{Alignment, DebugLines, Edges};

/// Size information the engine needs about the actors it lays out.
///
/// Max sizes of zero mean "unbounded".
pub trait Measure {
    fn min_size(&self, actor: ActorId) -> (f32, f32);
    fn pref_size(&self, actor: ActorId) -> (f32, f32);
    fn max_size(&self, actor: ActorId) -> (f32, f32);
}

/// Sizes of one cell's actor after cell overrides, plus the space the cell
/// reserves around it (padding and spacing).
#[derive(Debug, Clone, Copy, Default)]
struct CellSize {
    min_width: f32,
    min_height: f32,
    pref_width: f32,
    pref_height: f32,
    max_width: f32,
    max_height: f32,
    margin: Edges,
}

/// Memoized measurement of the whole grid.
#[derive(Debug, Clone, Default)]
struct Computed {
    columns: usize,
    rows: usize,
    cells: Vec<CellSize>,
    column_min: Vec<f32>,
    column_pref: Vec<f32>,
    column_expand: Vec<u32>,
    row_min: Vec<f32>,
    row_pref: Vec<f32>,
    row_expand: Vec<u32>,
    min_width: f32,
    min_height: f32,
    pref_width: f32,
    pref_height: f32,
}

/// Geometry produced by the last layout pass, in table-local coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Area covered by the grid including table padding.
    pub table: Rect,
    pub column_widths: Vec<f32>,
    pub row_heights: Vec<f32>,
    /// Bounds of every cell (including its padding), in cell order.
    pub cells: Vec<Rect>,
}

/// Result of arranging a table: where each actor goes, and the grid geometry.
#[derive(Debug, Clone, Default)]
pub struct Arrangement {
    pub actors: Vec<(ActorId, Rect)>,
    pub placement: Placement,
}

/// Cell-based table layout solver.
///
/// Owns the rows of cells, the defaults cascade and the named-widget
/// registry of a single table. Size queries are memoized until
/// [`invalidate`](Self::invalidate) is called.
#[derive(Debug)]
pub struct TableLayout {
    cells: Vec<Cell>,
    defaults: Cell,
    column_defaults: Vec<Option<Cell>>,
    row_defaults: Option<Cell>,
    current_row: usize,

    pad: Edges,
    align: Alignment,
    fixed_width: Option<f32>,
    fixed_height: Option<f32>,

    names: HashMap<String, ActorId>,
    debug: DebugLines,

    computed: RefCell<Option<Computed>>,
    placement: Option<Placement>,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            defaults: Cell::default(),
            column_defaults: Vec::new(),
            row_defaults: None,
            current_row: 0,
            pad: Edges::ZERO,
            align: Alignment::CENTER,
            fixed_width: None,
            fixed_height: None,
            names: HashMap::new(),
            debug: DebugLines::NONE,
            computed: RefCell::new(None),
            placement: None,
        }
    }
}

impl TableLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn pad(&self) -> Edges {
        self.pad
    }

    pub fn align(&self) -> Alignment {
        self.align
    }

    pub fn debug(&self) -> DebugLines {
        self.debug
    }

    pub fn fixed_size(&self) -> (Option<f32>, Option<f32>) {
        (self.fixed_width, self.fixed_height)
    }

    /// Last layout geometry, if the table has been laid out since its last
    /// structural change.
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.cells.last().map_or(0, |cell| cell.row + 1)
    }

    pub fn column_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.column.saturating_add(cell.span()))
            .max()
            .unwrap_or(0)
    }

    /// Whether memoized sizes are currently held.
    pub fn is_valid(&self) -> bool {
        self.computed.borrow().is_some()
    }

    /// Drop memoized sizes. Constant time, never recomputes.
    pub fn invalidate(&mut self) {
        *self.computed.get_mut() = None;
    }

    // Structure

    /// Append a cell to the current row. The new cell starts from the table
    /// defaults, then the column defaults, then the row defaults.
    pub(crate) fn add(&mut self, actor: Option<ActorId>) -> &mut Cell {
        let column = match self.cells.last() {
            Some(last) if last.row == self.current_row => last.column + last.span(),
            _ => 0,
        };
        let mut cell = Cell::new(actor, self.current_row, column);
        cell.overlay(&self.defaults);
        if let Some(Some(column_defaults)) = self.column_defaults.get(column) {
            cell.overlay(column_defaults);
        }
        if let Some(row_defaults) = &self.row_defaults {
            cell.overlay(row_defaults);
        }

        self.invalidate();
        let index = self.cells.len();
        self.cells.push(cell);
        &mut self.cells[index]
    }

    /// Close the current row if it has cells and return fresh defaults for
    /// the next one.
    pub(crate) fn row(&mut self) -> &mut Cell {
        if self
            .cells
            .last()
            .is_some_and(|last| last.row == self.current_row)
        {
            self.current_row += 1;
        }
        self.invalidate();
        self.row_defaults.insert(Cell::default())
    }

    pub(crate) fn defaults_mut(&mut self) -> &mut Cell {
        self.invalidate();
        &mut self.defaults
    }

    pub(crate) fn column_defaults_mut(&mut self, column: usize) -> &mut Cell {
        self.invalidate();
        if self.column_defaults.len() <= column {
            self.column_defaults.resize(column + 1, None);
        }
        self.column_defaults[column].get_or_insert_with(Cell::default)
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.invalidate();
        self.cells.get_mut(index)
    }

    /// Turn every cell holding `actor` into a placeholder.
    pub(crate) fn release(&mut self, actor: ActorId) {
        for cell in self.cells.iter_mut().filter(|c| c.actor == Some(actor)) {
            cell.actor = None;
        }
        self.names.retain(|_, named| *named != actor);
        self.invalidate();
    }

    /// Drop registered names pointing at `actor`. Cells are left alone.
    pub(crate) fn unregister(&mut self, actor: ActorId) {
        self.names.retain(|_, named| *named != actor);
    }

    /// Remove all cells and registered names.
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
        self.row_defaults = None;
        self.current_row = 0;
        self.names.clear();
        self.placement = None;
        self.invalidate();
    }

    /// Clear, then restore every table property and default to its initial
    /// value.
    pub(crate) fn reset(&mut self) {
        self.clear();
        self.defaults = Cell::default();
        self.column_defaults.clear();
        self.pad = Edges::ZERO;
        self.align = Alignment::CENTER;
        self.fixed_width = None;
        self.fixed_height = None;
        self.debug = DebugLines::NONE;
    }

    pub(crate) fn set_pad(&mut self, pad: Edges) {
        self.pad = pad;
        self.invalidate();
    }

    pub(crate) fn set_align(&mut self, align: Alignment) {
        self.align = align;
        self.invalidate();
    }

    pub(crate) fn set_fixed_width(&mut self, width: Option<f32>) {
        self.fixed_width = width;
        self.invalidate();
    }

    pub(crate) fn set_fixed_height(&mut self, height: Option<f32>) {
        self.fixed_height = height;
        self.invalidate();
    }

    pub(crate) fn set_debug(&mut self, debug: DebugLines) {
        self.debug = debug;
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }

    // Registry

    pub(crate) fn register(&mut self, name: String, actor: ActorId) -> Result<()> {
        if self.names.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        self.names.insert(name, actor);
        Ok(())
    }

    pub fn registered(&self, name: &str) -> Option<ActorId> {
        self.names.get(name).copied()
    }

    /// Registered names starting with `prefix`, sorted by name.
    pub fn registered_with_prefix(&self, prefix: &str) -> Vec<(&str, ActorId)> {
        let mut found: Vec<_> = self
            .names
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, actor)| (name.as_str(), *actor))
            .collect();
        found.sort_by(|a, b| a.0.cmp(b.0));
        found
    }

    // Measurement

    pub fn min_width(&self, measure: &dyn Measure) -> f32 {
        self.with_computed(measure, |c| c.min_width)
    }

    pub fn min_height(&self, measure: &dyn Measure) -> f32 {
        self.with_computed(measure, |c| c.min_height)
    }

    pub fn pref_width(&self, measure: &dyn Measure) -> f32 {
        self.with_computed(measure, |c| c.pref_width)
    }

    pub fn pref_height(&self, measure: &dyn Measure) -> f32 {
        self.with_computed(measure, |c| c.pref_height)
    }

    fn with_computed<R>(&self, measure: &dyn Measure, f: impl FnOnce(&Computed) -> R) -> R {
        if let Some(computed) = self.computed.borrow().as_ref() {
            return f(computed);
        }
        let computed = self.compute(measure);
        let result = f(&computed);
        *self.computed.borrow_mut() = Some(computed);
        result
    }

    fn compute(&self, measure: &dyn Measure) -> Computed {
        let columns = self.column_count();
        let rows = self.row_count();
        let mut c = Computed {
            columns,
            rows,
            cells: Vec::with_capacity(self.cells.len()),
            column_min: vec![0.0; columns],
            column_pref: vec![0.0; columns],
            column_expand: vec![0; columns],
            row_min: vec![0.0; rows],
            row_pref: vec![0.0; rows],
            row_expand: vec![0; rows],
            ..Default::default()
        };

        let mut spanning = Vec::new();
        for (index, cell) in self.cells.iter().enumerate() {
            let size = cell_size(cell, columns, rows, measure);
            let height_extra = size.margin.vertical_total();
            let width_extra = size.margin.horizontal_total();
            let (expand_x, expand_y) = cell.expand_weights();

            let row = cell.row;
            c.row_min[row] = c.row_min[row].max(size.min_height + height_extra);
            c.row_pref[row] = c.row_pref[row].max(size.pref_height + height_extra);
            c.row_expand[row] = c.row_expand[row].max(expand_y);

            if cell.span() == 1 {
                let column = cell.column;
                c.column_min[column] = c.column_min[column].max(size.min_width + width_extra);
                c.column_pref[column] = c.column_pref[column].max(size.pref_width + width_extra);
                c.column_expand[column] = c.column_expand[column].max(expand_x);
            } else {
                spanning.push(index);
            }
            c.cells.push(size);
        }

        // Spanning cells only widen their columns when the columns they cover
        // are not already wide enough on their own.
        for index in spanning {
            let cell = &self.cells[index];
            let size = c.cells[index];
            let span = cell.column..(cell.column + cell.span()).min(columns);
            let width_extra = size.margin.horizontal_total();
            spread(&mut c.column_min[span.clone()], size.min_width + width_extra);
            spread(&mut c.column_pref[span.clone()], size.pref_width + width_extra);

            let (expand_x, _) = cell.expand_weights();
            if expand_x > 0 && c.column_expand[span.clone()].iter().all(|w| *w == 0) {
                c.column_expand[span].fill(expand_x);
            }
        }

        for (min, pref) in c.column_min.iter().zip(c.column_pref.iter_mut()) {
            *pref = pref.max(*min);
        }
        for (min, pref) in c.row_min.iter().zip(c.row_pref.iter_mut()) {
            *pref = pref.max(*min);
        }

        let pad = self.pad;
        c.min_width = c.column_min.iter().sum::<f32>() + pad.horizontal_total();
        c.min_height = c.row_min.iter().sum::<f32>() + pad.vertical_total();
        c.pref_width = c.column_pref.iter().sum::<f32>() + pad.horizontal_total();
        c.pref_height = c.row_pref.iter().sum::<f32>() + pad.vertical_total();

        if let Some(width) = self.fixed_width {
            c.min_width = c.min_width.max(width);
            c.pref_width = c.pref_width.max(width);
        }
        if let Some(height) = self.fixed_height {
            c.min_height = c.min_height.max(height);
            c.pref_height = c.pref_height.max(height);
        }
        c.pref_width = c.pref_width.max(c.min_width);
        c.pref_height = c.pref_height.max(c.min_height);

        log::debug!(
            "[layout] measured {}x{} grid: min {}x{} pref {}x{}",
            columns,
            rows,
            c.min_width,
            c.min_height,
            c.pref_width,
            c.pref_height
        );
        c
    }

    // Layout

    /// Position every actor inside a table of the given size.
    pub fn arrange(&self, width: f32, height: f32, measure: &dyn Measure) -> Arrangement {
        let computed = self.with_computed(measure, Computed::clone);
        let pad = self.pad;

        let column_widths = distribute(
            &computed.column_min,
            &computed.column_pref,
            &computed.column_expand,
            (width - pad.horizontal_total()).max(0.0),
        );
        let row_heights = distribute(
            &computed.row_min,
            &computed.row_pref,
            &computed.row_expand,
            (height - pad.vertical_total()).max(0.0),
        );

        let table_width = column_widths.iter().sum::<f32>() + pad.horizontal_total();
        let table_height = row_heights.iter().sum::<f32>() + pad.vertical_total();
        let table_x = self.align.horizontal.offset(width, table_width);
        let table_y = self.align.vertical.offset(height, table_height);

        let mut actors = Vec::with_capacity(self.cells.len());
        let mut cells = Vec::with_capacity(self.cells.len());
        for (cell, size) in self.cells.iter().zip(&computed.cells) {
            let span_end = (cell.column + cell.span()).min(computed.columns);
            let x = table_x + pad.left + column_widths[..cell.column].iter().sum::<f32>();
            let y = table_y + pad.top + row_heights[..cell.row].iter().sum::<f32>();
            let span_width = column_widths[cell.column..span_end].iter().sum::<f32>();
            let cell_rect = Rect::new(x, y, span_width, row_heights[cell.row]);
            cells.push(cell_rect);

            let Some(actor) = cell.actor else {
                continue;
            };
            let inner = cell_rect.shrink(&size.margin);
            let (fill_x, fill_y) = cell.fill_fractions();
            let actor_width = fit(
                size.min_width,
                size.pref_width,
                size.max_width,
                inner.width,
                fill_x,
            );
            let actor_height = fit(
                size.min_height,
                size.pref_height,
                size.max_height,
                inner.height,
                fill_y,
            );
            let alignment = cell.alignment();
            let actor_rect = Rect::new(
                inner.x + alignment.horizontal.offset(inner.width, actor_width),
                inner.y + alignment.vertical.offset(inner.height, actor_height),
                actor_width,
                actor_height,
            );
            actors.push((actor, actor_rect));
        }

        log::debug!(
            "[layout] arranged {} cells in {}x{} (columns {:?}, rows {:?})",
            cells.len(),
            width,
            height,
            column_widths,
            row_heights
        );

        Arrangement {
            actors,
            placement: Placement {
                table: Rect::new(table_x, table_y, table_width, table_height),
                column_widths,
                row_heights,
                cells,
            },
        }
    }

    /// Row whose vertical extent contains `y` (table-local) in the last
    /// layout, or `None` above the first row, below the last, or when the
    /// table has not been laid out.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        let placement = self.placement.as_ref()?;
        let mut top = placement.table.y + self.pad.top;
        if y < top {
            return None;
        }
        for (row, height) in placement.row_heights.iter().enumerate() {
            let bottom = top + height;
            if y < bottom {
                return Some(row);
            }
            top = bottom;
        }
        None
    }
}

fn cell_size(cell: &Cell, columns: usize, rows: usize, measure: &dyn Measure) -> CellSize {
    let (actor_min, actor_pref, actor_max) = match cell.actor {
        Some(actor) => (
            measure.min_size(actor),
            measure.pref_size(actor),
            measure.max_size(actor),
        ),
        None => ((0.0, 0.0), (0.0, 0.0), (0.0, 0.0)),
    };

    let min_width = cell.min_width.unwrap_or(actor_min.0);
    let min_height = cell.min_height.unwrap_or(actor_min.1);
    let max_width = cell.max_width.unwrap_or(actor_max.0);
    let max_height = cell.max_height.unwrap_or(actor_max.1);

    let mut pref_width = cell.pref_width.unwrap_or(actor_pref.0);
    let mut pref_height = cell.pref_height.unwrap_or(actor_pref.1);
    if max_width > 0.0 {
        pref_width = pref_width.min(max_width);
    }
    if max_height > 0.0 {
        pref_height = pref_height.min(max_height);
    }
    pref_width = pref_width.max(min_width);
    pref_height = pref_height.max(min_height);

    let pad = cell.padding();
    let space = cell.spacing();
    let margin = Edges::new(
        pad.top + if cell.row > 0 { space.top } else { 0.0 },
        pad.right
            + if cell.column + cell.span() < columns {
                space.right
            } else {
                0.0
            },
        pad.bottom + if cell.row + 1 < rows { space.bottom } else { 0.0 },
        pad.left + if cell.column > 0 { space.left } else { 0.0 },
    );

    CellSize {
        min_width,
        min_height,
        pref_width,
        pref_height,
        max_width,
        max_height,
        margin,
    }
}

/// Widen `slots` evenly until they add up to at least `required`.
fn spread(slots: &mut [f32], required: f32) {
    if slots.is_empty() {
        return;
    }
    let extra = required - slots.iter().sum::<f32>();
    if extra > 0.0 {
        let share = extra / slots.len() as f32;
        for slot in slots {
            *slot += share;
        }
    }
}

/// Split `available` space over columns (or rows).
///
/// With room to spare every slot gets its preferred size and the surplus
/// goes to expanding slots by weight; nothing is handed out when no slot
/// expands. Without enough room each slot is interpolated between its
/// minimum and preferred size.
pub(crate) fn distribute(min: &[f32], pref: &[f32], expand: &[u32], available: f32) -> Vec<f32> {
    let total_min: f32 = min.iter().sum();
    let total_pref: f32 = pref.iter().sum();

    if available >= total_pref {
        let mut sizes = pref.to_vec();
        let weight: u32 = expand.iter().sum();
        if weight > 0 {
            let extra = available - total_pref;
            for (size, w) in sizes.iter_mut().zip(expand) {
                *size += extra * *w as f32 / weight as f32;
            }
        }
        return sizes;
    }

    if available <= total_min || total_pref <= total_min {
        return min.to_vec();
    }

    let ratio = (available - total_min) / (total_pref - total_min);
    min.iter()
        .zip(pref)
        .map(|(min, pref)| min + (pref - min) * ratio)
        .collect()
}

/// Actor size along one axis of its cell.
fn fit(min: f32, pref: f32, max: f32, available: f32, fill: f32) -> f32 {
    let mut size = if fill > 0.0 {
        available * fill
    } else {
        pref.min(available)
    };
    size = size.max(min);
    if max > 0.0 {
        size = size.min(max);
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surplus_goes_to_expanding_slots_by_weight() {
        let sizes = distribute(&[0.0, 0.0, 0.0], &[10.0, 10.0, 10.0], &[0, 1, 3], 70.0);
        assert_eq!(sizes, vec![10.0, 20.0, 40.0]);
    }

    #[test]
    fn surplus_unused_without_expansion() {
        let sizes = distribute(&[5.0, 5.0], &[10.0, 20.0], &[0, 0], 100.0);
        assert_eq!(sizes, vec![10.0, 20.0]);
    }

    #[test]
    fn deficit_interpolates_between_min_and_pref() {
        let sizes = distribute(&[10.0, 10.0], &[20.0, 30.0], &[0, 0], 45.0);
        assert_eq!(sizes, vec![15.0, 25.0]);
    }

    #[test]
    fn below_min_keeps_min() {
        let sizes = distribute(&[10.0, 10.0], &[20.0, 30.0], &[1, 1], 5.0);
        assert_eq!(sizes, vec![10.0, 10.0]);
    }

    #[test]
    fn spread_only_widens() {
        let mut slots = [10.0, 10.0];
        spread(&mut slots, 30.0);
        assert_eq!(slots, [15.0, 15.0]);
        spread(&mut slots, 10.0);
        assert_eq!(slots, [15.0, 15.0]);
    }

    #[test]
    fn fit_prefers_pref_then_clamps() {
        assert_eq!(fit(0.0, 20.0, 0.0, 50.0, 0.0), 20.0);
        assert_eq!(fit(0.0, 20.0, 0.0, 10.0, 0.0), 10.0);
        assert_eq!(fit(15.0, 20.0, 0.0, 10.0, 0.0), 15.0);
        assert_eq!(fit(0.0, 20.0, 30.0, 50.0, 1.0), 30.0);
        assert_eq!(fit(0.0, 20.0, 0.0, 50.0, 0.5), 25.0);
    }
}
