use slotmap::SlotMap;

use super::{Actor, ActorId};
use crate::config::StageConfig;
use crate::error::{Error, Result};
use crate::layout::{Measure, Rect};
use crate::types::Color;
use crate::widgets::{ButtonGroup, GroupId, Widget};

/// Owner of every actor and button group.
///
/// Widgets are addressed by [`ActorId`]. Operations on a missing or
/// wrongly-typed actor return [`Error::UnknownActor`] or
/// [`Error::WrongWidget`]; lookups that may legitimately find nothing return
/// `Option`.
#[derive(Debug, Default)]
pub struct Stage {
    pub(crate) actors: SlotMap<ActorId, Actor>,
    pub(crate) roots: Vec<ActorId>,
    pub(crate) groups: SlotMap<GroupId, ButtonGroup>,
    pub(crate) config: StageConfig,
    /// Set once any table enables debug lines. Gates the debug sweep.
    pub(crate) debug_requested: bool,
    pub(crate) pointer_target: Option<ActorId>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StageConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    // Actors

    /// Create a detached actor.
    pub fn spawn(&mut self, widget: Widget) -> ActorId {
        let id = self
            .actors
            .insert(Actor::new(widget, self.config.default_color));
        log::trace!("[stage] spawned {:?}", id);
        id
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub(crate) fn actor_ref(&self, id: ActorId) -> Result<&Actor> {
        self.actors.get(id).ok_or(Error::UnknownActor(id))
    }

    pub(crate) fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor> {
        self.actors.get_mut(id).ok_or(Error::UnknownActor(id))
    }

    /// Actors drawn and hit-tested directly by the stage.
    pub fn roots(&self) -> &[ActorId] {
        &self.roots
    }

    /// Detach `id` from its parent and make it a root.
    pub fn add_root(&mut self, id: ActorId) -> Result<()> {
        self.actor_ref(id)?;
        self.detach(id);
        self.roots.push(id);
        Ok(())
    }

    pub fn parent(&self, id: ActorId) -> Option<ActorId> {
        self.actors.get(id)?.parent
    }

    pub fn children(&self, id: ActorId) -> &[ActorId] {
        self.actors
            .get(id)
            .map_or(&[][..], |actor| actor.children.as_slice())
    }

    /// Move `child` under `parent`, detaching it from wherever it was.
    pub fn attach(&mut self, parent: ActorId, child: ActorId) -> Result<()> {
        self.actor_ref(parent)?;
        self.actor_ref(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::InvalidParent { parent, child });
        }

        self.detach(child);
        self.actor_mut(parent)?.children.push(child);
        self.actor_mut(child)?.parent = Some(parent);
        self.invalidate_hierarchy(parent);
        Ok(())
    }

    /// Unlink `child` from its parent (or the root list). A table parent
    /// keeps the cell as an empty placeholder.
    pub(crate) fn detach(&mut self, child: ActorId) {
        self.roots.retain(|root| *root != child);
        let Some(parent) = self
            .actors
            .get_mut(child)
            .and_then(|actor| actor.parent.take())
        else {
            return;
        };

        if let Some(actor) = self.actors.get_mut(parent) {
            actor.children.retain(|c| *c != child);
            if let Some(table) = actor.widget.table_mut() {
                table.layout.release(child);
            }
        }
        self.invalidate_hierarchy(parent);
    }

    /// Despawn `id` and its whole subtree.
    pub fn remove(&mut self, id: ActorId) -> Result<()> {
        self.actor_ref(id)?;
        self.detach(id);

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(actor) = self.actors.remove(next) else {
                continue;
            };
            removed.push(next);
            pending.extend(actor.children);
            if let Some(group) = actor.widget.button().and_then(|button| button.group) {
                if let Some(group) = self.groups.get_mut(group) {
                    group.buttons.retain(|member| *member != next);
                }
            }
            if self.pointer_target == Some(next) {
                self.pointer_target = None;
            }
        }
        // Names registered on outer tables can point anywhere in the subtree.
        for actor in self.actors.values_mut() {
            if let Some(table) = actor.widget.table_mut() {
                for gone in &removed {
                    table.layout.unregister(*gone);
                }
            }
        }
        log::trace!("[stage] removed {:?}", id);
        Ok(())
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: ActorId, node: ActorId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // Geometry

    pub fn set_position(&mut self, id: ActorId, x: f32, y: f32) -> Result<()> {
        let actor = self.actor_mut(id)?;
        actor.x = x;
        actor.y = y;
        Ok(())
    }

    /// Resize `id`. A size change schedules a layout pass but leaves cached
    /// sizes alone.
    pub fn set_size(&mut self, id: ActorId, width: f32, height: f32) -> Result<()> {
        let actor = self.actor_mut(id)?;
        if actor.width != width || actor.height != height {
            actor.width = width;
            actor.height = height;
            actor.needs_layout = true;
        }
        Ok(())
    }

    pub fn set_bounds(&mut self, id: ActorId, bounds: Rect) -> Result<()> {
        self.set_position(id, bounds.x, bounds.y)?;
        self.set_size(id, bounds.width, bounds.height)
    }

    pub fn size_to_pref(&mut self, id: ActorId) -> Result<()> {
        self.actor_ref(id)?;
        let (width, height) = self.pref_size(id);
        self.set_size(id, width, height)
    }

    pub fn set_color(&mut self, id: ActorId, color: Color) -> Result<()> {
        self.actor_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_touchable(&mut self, id: ActorId, touchable: bool) -> Result<()> {
        self.actor_mut(id)?.touchable = touchable;
        Ok(())
    }

    // Invalidation

    /// Drop the cached sizes of `id` and schedule it for layout. Constant
    /// time; nothing is recomputed until the next query or validate.
    pub fn invalidate(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        if let Some(table) = actor.widget.table_mut() {
            table.layout.invalidate();
        }
        actor.needs_layout = true;
        log::trace!("[layout] invalidated {:?}", id);
    }

    /// Invalidate `id` and every ancestor.
    pub fn invalidate_hierarchy(&mut self, id: ActorId) {
        let mut current = Some(id);
        while let Some(id) = current {
            self.invalidate(id);
            current = self.parent(id);
        }
    }

    // Sizes

    pub fn min_width(&self, id: ActorId) -> f32 {
        self.min_size(id).0
    }

    pub fn min_height(&self, id: ActorId) -> f32 {
        self.min_size(id).1
    }

    pub fn pref_width(&self, id: ActorId) -> f32 {
        self.pref_size(id).0
    }

    pub fn pref_height(&self, id: ActorId) -> f32 {
        self.pref_size(id).1
    }

    /// Zero means unbounded.
    pub fn max_width(&self, id: ActorId) -> f32 {
        self.max_size(id).0
    }

    pub fn max_height(&self, id: ActorId) -> f32 {
        self.max_size(id).1
    }

    fn stack_size(&self, actor: &Actor, size: impl Fn(ActorId) -> (f32, f32)) -> (f32, f32) {
        actor
            .children
            .iter()
            .map(|child| size(*child))
            .fold((0.0, 0.0), |(w, h), (cw, ch)| (w.max(cw), h.max(ch)))
    }

    // Layout

    /// Lay out every root subtree that needs it.
    pub fn validate(&mut self) {
        let roots = self.roots.clone();
        for root in roots {
            self.validate_subtree(root);
        }
    }

    /// Lay out `id` if it needs it, then its descendants.
    pub fn validate_subtree(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        if actor.needs_layout {
            self.layout_actor(id);
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.validate_subtree(child);
        }
    }

    fn layout_actor(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let (width, height) = (actor.width, actor.height);

        if let Some(table) = actor.widget.table() {
            let arrangement = table.layout.arrange(width, height, self);
            for (child, rect) in &arrangement.actors {
                self.place(*child, *rect);
            }
            if let Some(table) = self
                .actors
                .get_mut(id)
                .and_then(|actor| actor.widget.table_mut())
            {
                table.layout.set_placement(arrangement.placement);
            }
        } else if matches!(actor.widget, Widget::Stack) {
            let children = actor.children.clone();
            for child in children {
                self.place(child, Rect::from_size(width, height));
            }
        }

        if let Some(actor) = self.actors.get_mut(id) {
            if let Widget::Image(image) = &mut actor.widget {
                image.fit_region(width, height);
            }
            actor.needs_layout = false;
        }
    }

    /// Move a child to its laid-out bounds. A size change schedules the
    /// child for layout.
    fn place(&mut self, id: ActorId, rect: Rect) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        actor.x = rect.x;
        actor.y = rect.y;
        if actor.width != rect.width || actor.height != rect.height {
            actor.width = rect.width;
            actor.height = rect.height;
            actor.needs_layout = true;
        }
    }
}

impl Measure for Stage {
    fn min_size(&self, id: ActorId) -> (f32, f32) {
        let Some(actor) = self.actors.get(id) else {
            return (0.0, 0.0);
        };
        match &actor.widget {
            Widget::Table(table) => (
                table.layout.min_width(self),
                table.layout.min_height(self),
            ),
            // A button never shrinks below its preferred size.
            Widget::Button(_) | Widget::ImageButton(_) => self.pref_size(id),
            Widget::Image(_) => (0.0, 0.0),
            Widget::Label(label) => label.pref_size(),
            Widget::Stack => self.stack_size(actor, |child| self.min_size(child)),
            Widget::Custom(custom) => custom.min_size(),
        }
    }

    fn pref_size(&self, id: ActorId) -> (f32, f32) {
        let Some(actor) = self.actors.get(id) else {
            return (0.0, 0.0);
        };
        match &actor.widget {
            Widget::Table(table) => table.pref_size(self),
            Widget::Button(button) => button.pref_size(self),
            Widget::ImageButton(button) => button.button.pref_size(self),
            Widget::Image(image) => image.pref_size(),
            Widget::Label(label) => label.pref_size(),
            Widget::Stack => self.stack_size(actor, |child| self.pref_size(child)),
            Widget::Custom(custom) => custom.pref_size(),
        }
    }

    fn max_size(&self, id: ActorId) -> (f32, f32) {
        match self.actors.get(id).map(|actor| &actor.widget) {
            Some(Widget::Custom(custom)) => custom.max_size(),
            _ => (0.0, 0.0),
        }
    }
}
