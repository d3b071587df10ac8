use std::fmt;
use std::rc::Rc;

use super::{LabelStyle, Widget};
use crate::drawable::Drawable;
use crate::error::{Error, Result};
use crate::layout::{Cell, CellRef, Measure, Rect, TableLayout};
use crate::scene::{ActorId, Stage};
use crate::skin::Skin;
use crate::types::{Alignment, DebugLines, Edges};

/// A group actor that sizes and positions its children with a
/// [`TableLayout`], optionally drawing a background behind them.
#[derive(Default)]
pub struct Table {
    pub(crate) layout: TableLayout,
    pub(crate) background: Option<Rc<dyn Drawable>>,
    pub(crate) skin: Option<Rc<Skin>>,
    pub(crate) clip: bool,
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("layout", &self.layout)
            .field("background", &self.background)
            .field("skin", &self.skin.is_some())
            .field("clip", &self.clip)
            .finish()
    }
}

impl Table {
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn background(&self) -> Option<&Rc<dyn Drawable>> {
        self.background.as_ref()
    }

    pub fn skin(&self) -> Option<&Rc<Skin>> {
        self.skin.as_ref()
    }

    pub fn clips(&self) -> bool {
        self.clip
    }

    /// Table-local clip rectangle for a table of the given size. Padding is
    /// only excluded when a background provides it.
    pub fn clip_bounds(&self, width: f32, height: f32) -> Rect {
        let bounds = Rect::from_size(width, height);
        if self.background.is_some() {
            bounds.shrink(&self.layout.pad())
        } else {
            bounds
        }
    }

    pub(crate) fn pref_size(&self, measure: &dyn Measure) -> (f32, f32) {
        let mut width = self.layout.pref_width(measure);
        let mut height = self.layout.pref_height(measure);
        if let Some(background) = &self.background {
            width = width.max(background.min_width());
            height = height.max(background.min_height());
        }
        (width, height)
    }

    /// Swap the background and take its insets as padding. Returns false when
    /// `background` is the drawable already in place.
    pub(crate) fn replace_background(&mut self, background: Option<Rc<dyn Drawable>>) -> bool {
        let unchanged = match (&self.background, &background) {
            (Some(current), Some(new)) => std::ptr::addr_eq(Rc::as_ptr(current), Rc::as_ptr(new)),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        let pad = background.as_ref().map_or(Edges::ZERO, |bg| bg.insets());
        self.layout.set_pad(pad);
        self.background = background;
        true
    }
}

impl Stage {
    pub fn new_table(&mut self) -> ActorId {
        self.spawn(Widget::Table(Table::default()))
    }

    pub fn new_table_with_skin(&mut self, skin: Rc<Skin>) -> ActorId {
        self.spawn(Widget::Table(Table {
            skin: Some(skin),
            ..Table::default()
        }))
    }

    /// A fresh table sharing the skin of `table`, for building nested
    /// layouts.
    pub fn new_table_like(&mut self, table: ActorId) -> Result<ActorId> {
        let skin = self.table_ref(table)?.skin.clone();
        Ok(self.spawn(Widget::Table(Table {
            skin,
            ..Table::default()
        })))
    }

    /// The table behind `id`, for tables, buttons and image buttons.
    pub fn table(&self, id: ActorId) -> Option<&Table> {
        self.actors.get(id)?.widget.table()
    }

    pub(crate) fn table_ref(&self, id: ActorId) -> Result<&Table> {
        self.actor_ref(id)?
            .widget
            .table()
            .ok_or(Error::WrongWidget { id, expected: "table" })
    }

    /// Mutable table access without invalidation.
    pub(crate) fn table_mut(&mut self, id: ActorId) -> Result<&mut Table> {
        self.actor_mut(id)?
            .widget
            .table_mut()
            .ok_or(Error::WrongWidget { id, expected: "table" })
    }

    /// Mutable table access for a structural change: the table and its
    /// ancestors are invalidated first.
    fn edit_table(&mut self, id: ActorId) -> Result<&mut Table> {
        self.table_ref(id)?;
        self.invalidate_hierarchy(id);
        self.table_mut(id)
    }

    // Cells

    /// Append a cell to the current row of `table`. `None` adds an empty
    /// placeholder cell. The actor is moved under the table.
    pub fn add(&mut self, table: ActorId, actor: Option<ActorId>) -> Result<&mut Cell> {
        self.table_ref(table)?;
        if let Some(actor) = actor {
            self.attach(table, actor)?;
        }
        Ok(self.edit_table(table)?.layout.add(actor))
    }

    /// Add a label using the table skin's `"default"` label style.
    pub fn add_text(&mut self, table: ActorId, text: impl Into<String>) -> Result<&mut Cell> {
        let skin = self.table_ref(table)?.skin.clone().ok_or(Error::SkinRequired)?;
        let style = skin.get::<LabelStyle>("default")?.clone();
        let label = self.new_label(text, style);
        self.add(table, Some(label))
    }

    /// Add a cell holding a stack of `actors`, drawn in order on top of each
    /// other.
    pub fn stack(&mut self, table: ActorId, actors: &[ActorId]) -> Result<&mut Cell> {
        self.table_ref(table)?;
        let stack = self.spawn(Widget::Stack);
        for actor in actors {
            self.attach(stack, *actor)?;
        }
        self.add(table, Some(stack))
    }

    /// Start a new row and return its defaults. Does nothing to the row
    /// structure if the current row is still empty.
    pub fn row(&mut self, table: ActorId) -> Result<&mut Cell> {
        Ok(self.edit_table(table)?.layout.row())
    }

    /// Defaults for every cell added afterwards.
    pub fn defaults(&mut self, table: ActorId) -> Result<&mut Cell> {
        Ok(self.edit_table(table)?.layout.defaults_mut())
    }

    /// Defaults for cells added afterwards in `column`.
    pub fn column_defaults(&mut self, table: ActorId, column: usize) -> Result<&mut Cell> {
        Ok(self.edit_table(table)?.layout.column_defaults_mut(column))
    }

    /// Remove every cell and despawn the actors they held.
    pub fn clear(&mut self, table: ActorId) -> Result<()> {
        let children = self.actor_ref(table)?.children.clone();
        self.table_ref(table)?;
        for child in children {
            self.remove(child)?;
        }
        self.edit_table(table)?.layout.clear();
        Ok(())
    }

    /// Clear, then restore every table setting to its initial value. Padding
    /// comes back from the background when one is set.
    pub fn reset(&mut self, table: ActorId) -> Result<()> {
        self.clear(table)?;
        let table = self.edit_table(table)?;
        table.layout.reset();
        if let Some(background) = &table.background {
            table.layout.set_pad(background.insets());
        }
        Ok(())
    }

    pub fn cells(&self, table: ActorId) -> &[Cell] {
        self.table(table).map_or(&[][..], |table| table.layout.cells())
    }

    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        self.table(cell.table)?.layout.cells().get(cell.index)
    }

    pub fn cell_mut(&mut self, cell: CellRef) -> Option<&mut Cell> {
        self.edit_table(cell.table).ok()?.layout.cell_mut(cell.index)
    }

    // Table settings

    pub fn pad(&mut self, table: ActorId, pad: Edges) -> Result<()> {
        self.edit_table(table)?.layout.set_pad(pad);
        Ok(())
    }

    pub fn pad_top(&mut self, table: ActorId, pad: f32) -> Result<()> {
        let current = self.table_ref(table)?.layout.pad();
        self.pad(table, Edges { top: pad, ..current })
    }

    pub fn pad_left(&mut self, table: ActorId, pad: f32) -> Result<()> {
        let current = self.table_ref(table)?.layout.pad();
        self.pad(table, Edges { left: pad, ..current })
    }

    pub fn pad_bottom(&mut self, table: ActorId, pad: f32) -> Result<()> {
        let current = self.table_ref(table)?.layout.pad();
        self.pad(table, Edges { bottom: pad, ..current })
    }

    pub fn pad_right(&mut self, table: ActorId, pad: f32) -> Result<()> {
        let current = self.table_ref(table)?.layout.pad();
        self.pad(table, Edges { right: pad, ..current })
    }

    /// Where the grid sits inside the table when the table is larger than
    /// the grid.
    pub fn align(&mut self, table: ActorId, align: Alignment) -> Result<()> {
        self.edit_table(table)?.layout.set_align(align);
        Ok(())
    }

    /// Floor the table's min and pref size.
    pub fn table_size(&mut self, table: ActorId, width: f32, height: f32) -> Result<()> {
        self.table_width(table, width)?;
        self.table_height(table, height)
    }

    pub fn table_width(&mut self, table: ActorId, width: f32) -> Result<()> {
        self.edit_table(table)?.layout.set_fixed_width(Some(width));
        Ok(())
    }

    pub fn table_height(&mut self, table: ActorId, height: f32) -> Result<()> {
        self.edit_table(table)?.layout.set_fixed_height(Some(height));
        Ok(())
    }

    pub fn set_skin(&mut self, table: ActorId, skin: Rc<Skin>) -> Result<()> {
        self.table_mut(table)?.skin = Some(skin);
        Ok(())
    }

    /// Set the drawable behind the table. Its insets become the table
    /// padding; clearing it resets the padding to zero.
    pub fn set_background(
        &mut self,
        table: ActorId,
        background: Option<Rc<dyn Drawable>>,
    ) -> Result<()> {
        if self.table_mut(table)?.replace_background(background) {
            self.invalidate_hierarchy(table);
        }
        Ok(())
    }

    /// Clip children to the table bounds when drawing.
    pub fn set_clip(&mut self, table: ActorId, clip: bool) -> Result<()> {
        self.table_mut(table)?.clip = clip;
        Ok(())
    }

    /// Choose which debug lines `table` draws.
    pub fn debug(&mut self, table: ActorId, lines: DebugLines) -> Result<()> {
        self.table_mut(table)?.layout.set_debug(lines);
        if lines.any() && !self.debug_requested {
            log::debug!("[debug] debug lines enabled by {:?}", table);
            self.debug_requested = true;
        }
        Ok(())
    }

    /// Row containing the table-local `y`, laying the table out first if
    /// needed.
    pub fn row_at(&mut self, table: ActorId, y: f32) -> Option<usize> {
        self.table(table)?;
        self.validate_subtree(table);
        self.table(table)?.layout.row_at(y)
    }

    // Registry

    /// Name `actor` within `table`'s scope. Names are unique per table.
    pub fn register(
        &mut self,
        table: ActorId,
        name: impl Into<String>,
        actor: ActorId,
    ) -> Result<ActorId> {
        self.actor_ref(actor)?;
        self.table_mut(table)?.layout.register(name.into(), actor)?;
        Ok(actor)
    }

    /// `table` followed by its nested tables, depth first in cell order.
    fn scopes(&self, table: ActorId) -> Vec<ActorId> {
        let mut scopes = Vec::new();
        let mut pending = vec![table];
        while let Some(next) = pending.pop() {
            let Some(layout) = self.table(next).map(Table::layout) else {
                continue;
            };
            scopes.push(next);
            let nested = layout
                .cells()
                .iter()
                .filter_map(Cell::actor)
                .filter(|actor| self.table(*actor).is_some());
            let start = pending.len();
            pending.extend(nested);
            pending[start..].reverse();
        }
        scopes
    }

    /// Actor registered or cell-named `name`, searching `table` first and
    /// then nested tables.
    pub fn widget(&self, table: ActorId, name: &str) -> Option<ActorId> {
        self.scopes(table).into_iter().find_map(|scope| {
            let layout = self.table(scope)?.layout();
            layout.registered(name).or_else(|| {
                layout
                    .cells()
                    .iter()
                    .find(|cell| cell.name() == Some(name))
                    .and_then(Cell::actor)
            })
        })
    }

    /// Actors registered or cell-named with a name starting with `prefix`.
    /// Each table's matches are sorted by name, and an actor is listed once
    /// per table.
    pub fn widgets(&self, table: ActorId, prefix: &str) -> Vec<ActorId> {
        let mut found = Vec::new();
        for scope in self.scopes(table) {
            let Some(layout) = self.table(scope).map(Table::layout) else {
                continue;
            };
            let mut matches = layout.registered_with_prefix(prefix);
            matches.extend(layout.cells().iter().filter_map(|cell| {
                let name = cell.name().filter(|name| name.starts_with(prefix))?;
                Some((name, cell.actor()?))
            }));
            matches.sort_by(|a, b| a.0.cmp(b.0));

            let start = found.len();
            for (_, actor) in matches {
                if !found[start..].contains(&actor) {
                    found.push(actor);
                }
            }
        }
        found
    }

    pub fn cell_of(&self, table: ActorId, actor: ActorId) -> Option<CellRef> {
        self.find_cell(table, |cell| cell.actor() == Some(actor))
    }

    pub fn cell_named(&self, table: ActorId, name: &str) -> Option<CellRef> {
        self.find_cell(table, |cell| cell.name() == Some(name))
    }

    /// Every named cell whose name starts with `prefix`. An empty prefix
    /// returns every cell, named or not.
    pub fn all_cells(&self, table: ActorId, prefix: &str) -> Vec<CellRef> {
        let mut found = Vec::new();
        for scope in self.scopes(table) {
            let Some(layout) = self.table(scope).map(Table::layout) else {
                continue;
            };
            found.extend(
                layout
                    .cells()
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| {
                        prefix.is_empty()
                            || cell.name().is_some_and(|name| name.starts_with(prefix))
                    })
                    .map(|(index, _)| CellRef {
                        table: scope,
                        index,
                    }),
            );
        }
        found
    }

    fn find_cell(&self, table: ActorId, matches: impl Fn(&Cell) -> bool) -> Option<CellRef> {
        self.scopes(table).into_iter().find_map(|scope| {
            let index = self
                .table(scope)?
                .layout()
                .cells()
                .iter()
                .position(&matches)?;
            Some(CellRef {
                table: scope,
                index,
            })
        })
    }

    /// Put `actor` into the cell named `name`. The actor previously in that
    /// cell is detached but not despawned. Returns false when no cell has
    /// that name.
    pub fn set_widget(&mut self, table: ActorId, name: &str, actor: ActorId) -> Result<bool> {
        self.actor_ref(actor)?;
        let Some(cell) = self.cell_named(table, name) else {
            return Ok(false);
        };

        if let Some(previous) = self.cell(cell).and_then(Cell::actor) {
            self.detach(previous);
        }
        self.attach(cell.table, actor)?;
        if let Some(slot) = self.cell_mut(cell) {
            slot.actor = Some(actor);
        }
        Ok(true)
    }
}
