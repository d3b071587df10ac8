use super::{Button, ButtonStyle, Widget};
use crate::error::{Error, Result};
use crate::layout::CellRef;
use crate::scene::{ActorId, Stage};
use crate::types::{Alignment, Scaling};

/// A button whose content is an image that follows the button state.
#[derive(Debug)]
pub struct ImageButton {
    pub(crate) button: Button,
    pub(crate) image: ActorId,
}

impl ImageButton {
    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn image(&self) -> ActorId {
        self.image
    }
}

impl Stage {
    /// Fails with [`Error::WrongStyle`] unless the style has an image part.
    pub fn new_image_button(&mut self, style: ButtonStyle) -> Result<ActorId> {
        if style.image.is_none() {
            return Err(Error::WrongStyle);
        }

        let image = self.new_image(None);
        self.set_scaling(image, Scaling::Fit)?;
        self.set_image_align(image, Alignment::CENTER)?;

        let id = self.spawn(Widget::ImageButton(ImageButton {
            button: Button::new(style),
            image,
        }));
        self.add(id, Some(image))?;
        self.refresh_button(id)?;
        self.size_to_pref(id)?;
        Ok(id)
    }

    /// The image actor inside an image button.
    pub fn image_of(&self, id: ActorId) -> Option<ActorId> {
        match &self.actors.get(id)?.widget {
            Widget::ImageButton(button) => Some(button.image),
            _ => None,
        }
    }

    /// The cell holding the image of an image button.
    pub fn image_cell(&self, id: ActorId) -> Option<CellRef> {
        let image = self.image_of(id)?;
        self.cell_of(id, image)
    }
}
