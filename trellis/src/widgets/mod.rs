//! Concrete widgets and the `Stage` operations that drive them.

mod button;
mod button_group;
mod image;
mod image_button;
mod label;
mod table;

use std::fmt;

pub use button::{Button, ButtonStyle, ImageStyle};
pub use button_group::{ButtonGroup, GroupId};
pub use image::Image;
pub use image_button::ImageButton;
pub use label::{Label, LabelStyle};
pub use table::Table;

use crate::batch::Batch;
use crate::layout::Rect;

/// Application-defined leaf widget.
pub trait CustomWidget {
    fn pref_size(&self) -> (f32, f32);

    fn min_size(&self) -> (f32, f32) {
        self.pref_size()
    }

    /// Zero means unbounded.
    fn max_size(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    fn draw(&self, _batch: &mut dyn Batch, _bounds: Rect) {}
}

/// What an actor is.
pub enum Widget {
    Table(Table),
    Button(Button),
    ImageButton(ImageButton),
    Image(Image),
    Label(Label),
    /// Children are stacked on top of each other and fill the actor.
    Stack,
    Custom(Box<dyn CustomWidget>),
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Widget::Table(table) => f.debug_tuple("Table").field(table).finish(),
            Widget::Button(button) => f.debug_tuple("Button").field(button).finish(),
            Widget::ImageButton(button) => f.debug_tuple("ImageButton").field(button).finish(),
            Widget::Image(image) => f.debug_tuple("Image").field(image).finish(),
            Widget::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Widget::Stack => f.write_str("Stack"),
            Widget::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl Widget {
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Table(_) => "table",
            Widget::Button(_) => "button",
            Widget::ImageButton(_) => "image button",
            Widget::Image(_) => "image",
            Widget::Label(_) => "label",
            Widget::Stack => "stack",
            Widget::Custom(_) => "custom widget",
        }
    }

    /// The table behind tables, buttons and image buttons.
    pub fn table(&self) -> Option<&Table> {
        match self {
            Widget::Table(table) => Some(table),
            Widget::Button(button) => Some(&button.table),
            Widget::ImageButton(button) => Some(&button.button.table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Widget::Table(table) => Some(table),
            Widget::Button(button) => Some(&mut button.table),
            Widget::ImageButton(button) => Some(&mut button.button.table),
            _ => None,
        }
    }

    pub fn button(&self) -> Option<&Button> {
        match self {
            Widget::Button(button) => Some(button),
            Widget::ImageButton(button) => Some(&button.button),
            _ => None,
        }
    }

    pub fn button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Widget::Button(button) => Some(button),
            Widget::ImageButton(button) => Some(&mut button.button),
            _ => None,
        }
    }
}
