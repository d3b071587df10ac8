use super::{ActorId, Stage};
use crate::event::{ClickOutcome, PointerEvent};
use crate::layout::Rect;

impl Stage {
    /// Deepest touchable actor under the point, in stage coordinates.
    /// Later siblings are on top.
    pub fn hit(&self, x: f32, y: f32) -> Option<ActorId> {
        self.roots
            .iter()
            .rev()
            .find_map(|root| self.hit_actor(*root, x, y))
    }

    fn hit_actor(&self, id: ActorId, x: f32, y: f32) -> Option<ActorId> {
        let actor = self.actors.get(id)?;
        if !actor.touchable || !actor.bounds().contains(x, y) {
            return None;
        }

        let (local_x, local_y) = (x - actor.x, y - actor.y);
        actor
            .children
            .iter()
            .rev()
            .find_map(|child| self.hit_actor(*child, local_x, local_y))
            .or(Some(id))
    }

    /// Bounds of `id` in stage coordinates.
    pub fn stage_bounds(&self, id: ActorId) -> Option<Rect> {
        let actor = self.actors.get(id)?;
        let mut bounds = actor.bounds();
        let mut current = actor.parent;
        while let Some(parent) = current.and_then(|p| self.actors.get(p)) {
            bounds = bounds.translate(parent.x, parent.y);
            current = parent.parent;
        }
        Some(bounds)
    }

    /// Nearest button at or above `id`.
    fn button_at_or_above(&self, id: ActorId) -> Option<ActorId> {
        let mut current = Some(id);
        while let Some(id) = current {
            let actor = self.actors.get(id)?;
            if actor.widget.button().is_some() {
                return Some(id);
            }
            current = actor.parent;
        }
        None
    }

    fn pointer_over(&self, id: ActorId, x: f32, y: f32) -> bool {
        self.stage_bounds(id)
            .is_some_and(|bounds| bounds.contains(x, y))
    }

    /// Start a press on the button under the point. Returns the button that
    /// took the press, if any.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<ActorId> {
        if let Some(previous) = self.pointer_target.take() {
            self.release_press(previous);
        }
        let target = self.hit(x, y).and_then(|hit| self.button_at_or_above(hit))?;
        let button = self
            .actors
            .get_mut(target)
            .and_then(|actor| actor.widget.button_mut())?;
        button.click.touch_down();
        self.pointer_target = Some(target);
        log::debug!("[button] pressed {:?}", target);
        Some(target)
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let Some(target) = self.pointer_target else {
            return;
        };
        let over = self.pointer_over(target, x, y);
        if let Some(button) = self
            .actors
            .get_mut(target)
            .and_then(|actor| actor.widget.button_mut())
        {
            button.click.touch_moved(over);
        }
    }

    /// End the current press. Releasing over the pressed button clicks it.
    /// Returns `None` when no press was in progress.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<ClickOutcome> {
        let target = self.pointer_target.take()?;
        let over = self.pointer_over(target, x, y);
        let clicked = self
            .actors
            .get_mut(target)
            .and_then(|actor| actor.widget.button_mut())?
            .click
            .touch_up(over);

        if !clicked {
            log::debug!("[button] press on {:?} released outside", target);
            return Some(ClickOutcome::Cancelled);
        }
        match self.click(target) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                log::warn!("[button] click on {:?} failed: {}", target, err);
                None
            }
        }
    }

    /// Abandon the current press without clicking.
    pub fn pointer_cancel(&mut self) -> Option<ClickOutcome> {
        let target = self.pointer_target.take()?;
        self.release_press(target);
        Some(ClickOutcome::Cancelled)
    }

    fn release_press(&mut self, target: ActorId) {
        if let Some(button) = self
            .actors
            .get_mut(target)
            .and_then(|actor| actor.widget.button_mut())
        {
            button.click.cancel();
        }
    }

    /// Route one pointer event.
    pub fn handle(&mut self, event: PointerEvent) -> Option<ClickOutcome> {
        match event {
            PointerEvent::Down { x, y } => {
                self.pointer_down(x, y);
                None
            }
            PointerEvent::Moved { x, y } => {
                self.pointer_moved(x, y);
                None
            }
            PointerEvent::Up { x, y } => self.pointer_up(x, y),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }
}
