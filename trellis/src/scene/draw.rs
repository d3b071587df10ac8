use super::{ActorId, Stage};
use crate::batch::Batch;
use crate::layout::Rect;
use crate::types::color;
use crate::widgets::Widget;

impl Stage {
    /// Draw the whole stage: refresh button visuals, lay out whatever needs
    /// it, paint every root, then the debug overlay.
    pub fn draw(&mut self, batch: &mut dyn Batch) {
        for id in self.rooted_buttons() {
            if let Err(err) = self.refresh_button(id) {
                log::warn!("[button] could not refresh {:?}: {}", id, err);
            }
        }

        self.validate();
        for root in &self.roots {
            self.paint(*root, batch, 0.0, 0.0, 1.0);
        }
        self.draw_debug(batch);
    }

    /// Buttons reachable from a root. Detached actors are never drawn.
    fn rooted_buttons(&self) -> Vec<ActorId> {
        let mut buttons = Vec::new();
        let mut pending = self.roots.clone();
        while let Some(id) = pending.pop() {
            let Some(actor) = self.actors.get(id) else {
                continue;
            };
            if actor.widget.button().is_some() {
                buttons.push(id);
            }
            pending.extend(&actor.children);
        }
        buttons
    }

    fn paint(&self, id: ActorId, batch: &mut dyn Batch, origin_x: f32, origin_y: f32, parent_alpha: f32) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let x = origin_x + actor.x;
        let y = origin_y + actor.y;
        let bounds = Rect::new(x, y, actor.width, actor.height);
        let alpha = actor.color.alpha * parent_alpha;

        let previous = batch.color();
        batch.set_color(color::with_alpha(actor.color, alpha));

        match &actor.widget {
            Widget::Image(image) => {
                if let Some(drawable) = image.drawable() {
                    drawable.draw(batch, image.region().translate(x, y));
                }
            }
            Widget::Label(label) => {
                let tint = batch.color();
                batch.set_color(color::multiply(tint, label.style().color));
                batch.draw_text(label.text(), x, y);
                batch.set_color(tint);
            }
            Widget::Custom(custom) => custom.draw(batch, bounds),
            _ => {}
        }

        let mut clipped = false;
        let (mut child_x, mut child_y) = (x, y);
        if let Some(table) = actor.widget.table() {
            if let Some(background) = table.background() {
                background.draw(batch, bounds);
            }
            if let Some(button) = actor.widget.button() {
                let (_, (dx, dy)) = button.style.resolve(button.is_pressed(), button.checked);
                child_x += dx;
                child_y += dy;
            }
            if table.clips() {
                let clip = table.clip_bounds(actor.width, actor.height).translate(x, y);
                if !batch.push_clip(clip) {
                    batch.set_color(previous);
                    return;
                }
                clipped = true;
            }
        }

        for child in &actor.children {
            self.paint(*child, batch, child_x, child_y, alpha);
        }

        if clipped {
            batch.pop_clip();
        }
        batch.set_color(previous);
    }

    /// Emit debug lines for every table that asked for them. Does nothing
    /// until some table on this stage has enabled debug output.
    pub fn draw_debug(&self, batch: &mut dyn Batch) {
        if !self.debug_requested {
            return;
        }
        for root in &self.roots {
            self.debug_actor(*root, batch, 0.0, 0.0);
        }
    }

    fn debug_actor(&self, id: ActorId, batch: &mut dyn Batch, origin_x: f32, origin_y: f32) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let x = origin_x + actor.x;
        let y = origin_y + actor.y;

        if let Some(table) = actor.widget.table() {
            let lines = table.layout.debug();
            if let Some(placement) = table.layout.placement().filter(|_| lines.any()) {
                if lines.table {
                    batch.debug_rect(
                        placement.table.translate(x, y),
                        self.config.table_debug_color,
                    );
                }
                if lines.cell {
                    for cell in &placement.cells {
                        batch.debug_rect(cell.translate(x, y), self.config.cell_debug_color);
                    }
                }
                if lines.widget {
                    for child in table.layout.cells().iter().filter_map(|cell| cell.actor()) {
                        if let Some(child) = self.actors.get(child) {
                            batch.debug_rect(
                                child.bounds().translate(x, y),
                                self.config.widget_debug_color,
                            );
                        }
                    }
                }
            }
        }

        for child in &actor.children {
            self.debug_actor(*child, batch, x, y);
        }
    }
}
