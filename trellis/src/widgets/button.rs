use std::fmt;
use std::rc::Rc;

use super::{GroupId, Table, Widget};
use crate::drawable::Drawable;
use crate::error::{Error, Result};
use crate::event::{Change, ChangeEvent, ClickListener, ClickOutcome};
use crate::layout::Measure;
use crate::scene::{ActorId, Stage};
use crate::skin::Skin;

/// Drawables and offsets for a [`Button`]. Every drawable is optional; a
/// missing one falls back to `up`, or to nothing.
#[derive(Debug, Clone, Default)]
pub struct ButtonStyle {
    pub up: Option<Rc<dyn Drawable>>,
    pub down: Option<Rc<dyn Drawable>>,
    pub checked: Option<Rc<dyn Drawable>>,
    pub pressed_offset: (f32, f32),
    pub unpressed_offset: (f32, f32),
    /// Present on styles meant for image buttons.
    pub image: Option<ImageStyle>,
}

impl ButtonStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.up = Some(drawable);
        self
    }

    pub fn down(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.down = Some(drawable);
        self
    }

    pub fn checked(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.checked = Some(drawable);
        self
    }

    pub fn pressed_offset(mut self, x: f32, y: f32) -> Self {
        self.pressed_offset = (x, y);
        self
    }

    pub fn unpressed_offset(mut self, x: f32, y: f32) -> Self {
        self.unpressed_offset = (x, y);
        self
    }

    pub fn image(mut self, image: ImageStyle) -> Self {
        self.image = Some(image);
        self
    }

    /// Background and child offset for the given state.
    pub fn resolve(&self, pressed: bool, checked: bool) -> (Option<Rc<dyn Drawable>>, (f32, f32)) {
        if pressed {
            if let Some(down) = &self.down {
                return (Some(Rc::clone(down)), self.pressed_offset);
            }
        }
        if checked {
            if let Some(drawable) = &self.checked {
                return (Some(Rc::clone(drawable)), self.unpressed_offset);
            }
        }
        (self.up.clone(), self.unpressed_offset)
    }

    /// Largest min size among the state drawables.
    pub fn min_size(&self) -> (f32, f32) {
        [&self.up, &self.down, &self.checked]
            .into_iter()
            .flatten()
            .map(|drawable| drawable.min_size())
            .fold((0.0, 0.0), |(w, h), (dw, dh)| (w.max(dw), h.max(dh)))
    }
}

/// Image drawables shown by an [`ImageButton`](super::ImageButton) in each
/// state.
#[derive(Debug, Clone, Default)]
pub struct ImageStyle {
    pub up: Option<Rc<dyn Drawable>>,
    pub down: Option<Rc<dyn Drawable>>,
    pub checked: Option<Rc<dyn Drawable>>,
}

impl ImageStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.up = Some(drawable);
        self
    }

    pub fn down(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.down = Some(drawable);
        self
    }

    pub fn checked(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.checked = Some(drawable);
        self
    }

    /// Image for the given state, or `None` to keep whatever is shown.
    pub fn resolve(&self, pressed: bool, checked: bool) -> Option<Rc<dyn Drawable>> {
        if pressed && self.down.is_some() {
            self.down.clone()
        } else if checked && self.checked.is_some() {
            self.checked.clone()
        } else {
            self.up.clone()
        }
    }
}

type ChangeObserver = Box<dyn FnMut(&ChangeEvent) -> Change>;

/// A table that can be pressed and toggled.
pub struct Button {
    pub(crate) table: Table,
    pub(crate) style: ButtonStyle,
    pub(crate) checked: bool,
    pub(crate) click: ClickListener,
    pub(crate) group: Option<GroupId>,
    observers: Vec<ChangeObserver>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("table", &self.table)
            .field("style", &self.style)
            .field("checked", &self.checked)
            .field("click", &self.click)
            .field("group", &self.group)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Button {
    pub(crate) fn new(style: ButtonStyle) -> Self {
        let mut table = Table::default();
        let (background, _) = style.resolve(false, false);
        table.replace_background(background);
        Self {
            table,
            style,
            checked: false,
            click: ClickListener::default(),
            group: None,
            observers: Vec::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Pointer held down and still over the button.
    pub fn is_pressed(&self) -> bool {
        self.click.is_pressed()
    }

    pub fn click_listener(&self) -> &ClickListener {
        &self.click
    }

    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn pref_size(&self, measure: &dyn Measure) -> (f32, f32) {
        let (width, height) = self.table.pref_size(measure);
        let (style_width, style_height) = self.style.min_size();
        (width.max(style_width), height.max(style_height))
    }

    /// Offer `event` to every observer. True if any vetoed.
    fn notify(&mut self, event: &ChangeEvent) -> bool {
        let mut vetoed = false;
        for observer in &mut self.observers {
            if observer(event) == Change::Veto {
                vetoed = true;
            }
        }
        vetoed
    }
}

impl Stage {
    pub fn new_button(&mut self, style: ButtonStyle) -> ActorId {
        let id = self.spawn(Widget::Button(Button::new(style)));
        let (width, height) = self.pref_size(id);
        if let Some(actor) = self.actors.get_mut(id) {
            actor.width = width;
            actor.height = height;
        }
        id
    }

    /// A button with `child` in its single cell.
    pub fn new_button_with(&mut self, child: ActorId, style: ButtonStyle) -> Result<ActorId> {
        self.actor_ref(child)?;
        let id = self.new_button(style);
        self.add(id, Some(child))?;
        self.size_to_pref(id)?;
        Ok(id)
    }

    /// A button using the skin's `"default"` button style.
    pub fn button_from_skin(&mut self, skin: &Skin) -> Result<ActorId> {
        let style = skin.get::<ButtonStyle>("default")?.clone();
        Ok(self.new_button(style))
    }

    pub fn button(&self, id: ActorId) -> Option<&Button> {
        self.actors.get(id)?.widget.button()
    }

    pub(crate) fn button_ref(&self, id: ActorId) -> Result<&Button> {
        self.actor_ref(id)?
            .widget
            .button()
            .ok_or(Error::WrongWidget { id, expected: "button" })
    }

    pub(crate) fn button_mut(&mut self, id: ActorId) -> Result<&mut Button> {
        self.actor_mut(id)?
            .widget
            .button_mut()
            .ok_or(Error::WrongWidget { id, expected: "button" })
    }

    pub fn style(&self, id: ActorId) -> Option<&ButtonStyle> {
        self.button(id).map(Button::style)
    }

    /// Replace the style of a button. Image buttons only accept styles with
    /// an image part.
    pub fn set_style(&mut self, id: ActorId, style: ButtonStyle) -> Result<()> {
        let actor = self.actor_ref(id)?;
        if matches!(actor.widget, Widget::ImageButton(_)) && style.image.is_none() {
            return Err(Error::WrongStyle);
        }
        self.button_mut(id)?.style = style;
        self.refresh_button(id)?;
        self.invalidate_hierarchy(id);
        Ok(())
    }

    /// False for actors that are not buttons.
    pub fn is_checked(&self, id: ActorId) -> bool {
        self.button(id).is_some_and(Button::is_checked)
    }

    /// False for actors that are not buttons.
    pub fn is_pressed(&self, id: ActorId) -> bool {
        self.button(id).is_some_and(Button::is_pressed)
    }

    /// Set the checked state without notifying observers. Returns whether
    /// the value was applied; the button's group may refuse it.
    pub fn set_checked(&mut self, id: ActorId, checked: bool) -> Result<bool> {
        let button = self.button_ref(id)?;
        if button.checked == checked {
            return Ok(true);
        }
        if !self.group_allows(button.group, id, checked) {
            log::debug!("[group] refused set_checked({}) on {:?}", checked, id);
            return Ok(false);
        }
        self.button_mut(id)?.checked = checked;
        Ok(true)
    }

    /// Observe checked-state changes caused by clicks. Returning
    /// [`Change::Veto`] undoes the change.
    pub fn on_change(
        &mut self,
        id: ActorId,
        observer: impl FnMut(&ChangeEvent) -> Change + 'static,
    ) -> Result<()> {
        self.button_mut(id)?.observers.push(Box::new(observer));
        Ok(())
    }

    /// Toggle the button as a completed click would.
    pub fn click(&mut self, id: ActorId) -> Result<ClickOutcome> {
        let button = self.button_ref(id)?;
        let previous = button.checked;
        let checked = !previous;
        if !self.group_allows(button.group, id, checked) {
            log::debug!("[group] refused toggle of {:?}", id);
            return Ok(ClickOutcome::Refused);
        }

        let button = self.button_mut(id)?;
        button.checked = checked;
        let event = ChangeEvent {
            button: id,
            checked,
        };
        if button.notify(&event) {
            // Rollback skips the group check.
            button.checked = previous;
            log::debug!("[button] change on {:?} vetoed", id);
            return Ok(ClickOutcome::Vetoed);
        }

        log::debug!("[button] {:?} toggled to {}", id, checked);
        Ok(ClickOutcome::Toggled(checked))
    }

    /// Resolve the drawables for the button's current state: the image of
    /// an image button first, then the background.
    pub fn refresh_button(&mut self, id: ActorId) -> Result<()> {
        let button = self.button_ref(id)?;
        let pressed = button.is_pressed();
        let checked = button.checked;
        let (background, _) = button.style.resolve(pressed, checked);
        let image = button
            .style
            .image
            .as_ref()
            .and_then(|image| image.resolve(pressed, checked));

        if let Some(image_actor) = self.image_of(id).filter(|image| self.image(*image).is_some()) {
            if let Some(drawable) = image {
                self.set_image_drawable(image_actor, Some(drawable))?;
            }
        }
        self.set_background(id, background)
    }
}
