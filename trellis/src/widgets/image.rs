use std::rc::Rc;

use super::Widget;
use crate::drawable::Drawable;
use crate::error::{Error, Result};
use crate::layout::Rect;
use crate::scene::{ActorId, Stage};
use crate::types::{Alignment, Scaling};

/// Draws a single drawable, scaled into the actor's bounds.
#[derive(Debug, Clone, Default)]
pub struct Image {
    drawable: Option<Rc<dyn Drawable>>,
    scaling: Scaling,
    align: Alignment,
    region: Rect,
}

impl Image {
    pub fn drawable(&self) -> Option<&Rc<dyn Drawable>> {
        self.drawable.as_ref()
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    pub fn align(&self) -> Alignment {
        self.align
    }

    /// Where the drawable is drawn, relative to the actor, as of the last
    /// layout.
    pub fn region(&self) -> Rect {
        self.region
    }

    pub(crate) fn pref_size(&self) -> (f32, f32) {
        self.drawable
            .as_ref()
            .map_or((0.0, 0.0), |drawable| drawable.min_size())
    }

    pub(crate) fn fit_region(&mut self, width: f32, height: f32) {
        let (w, h) = self.scaling.apply(self.pref_size(), (width, height));
        self.region = Rect::new(
            self.align.horizontal.offset(width, w),
            self.align.vertical.offset(height, h),
            w,
            h,
        );
    }
}

impl Stage {
    pub fn new_image(&mut self, drawable: Option<Rc<dyn Drawable>>) -> ActorId {
        let image = Image {
            drawable,
            ..Image::default()
        };
        let size = image.pref_size();
        let id = self.spawn(Widget::Image(image));
        if let Some(actor) = self.actors.get_mut(id) {
            (actor.width, actor.height) = size;
        }
        id
    }

    pub fn image(&self, id: ActorId) -> Option<&Image> {
        match &self.actors.get(id)?.widget {
            Widget::Image(image) => Some(image),
            _ => None,
        }
    }

    fn image_mut(&mut self, id: ActorId) -> Result<&mut Image> {
        match &mut self.actor_mut(id)?.widget {
            Widget::Image(image) => Ok(image),
            _ => Err(Error::WrongWidget {
                id,
                expected: "image",
            }),
        }
    }

    /// Swap the drawable. Ancestors are only invalidated when the new
    /// drawable's min size differs; otherwise only this image is laid out
    /// again.
    pub fn set_image_drawable(
        &mut self,
        id: ActorId,
        drawable: Option<Rc<dyn Drawable>>,
    ) -> Result<()> {
        let image = self.image_mut(id)?;
        let unchanged = match (&image.drawable, &drawable) {
            (Some(current), Some(new)) => std::ptr::addr_eq(Rc::as_ptr(current), Rc::as_ptr(new)),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Ok(());
        }

        let previous = image.pref_size();
        image.drawable = drawable;
        if image.pref_size() != previous {
            self.invalidate_hierarchy(id);
        } else {
            self.invalidate(id);
        }
        Ok(())
    }

    pub fn set_scaling(&mut self, id: ActorId, scaling: Scaling) -> Result<()> {
        self.image_mut(id)?.scaling = scaling;
        self.invalidate(id);
        Ok(())
    }

    pub fn set_image_align(&mut self, id: ActorId, align: Alignment) -> Result<()> {
        self.image_mut(id)?.align = align;
        self.invalidate(id);
        Ok(())
    }
}
