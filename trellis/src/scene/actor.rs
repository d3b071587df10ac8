use crate::layout::Rect;
use crate::types::Color;
use crate::widgets::Widget;

slotmap::new_key_type! {
    /// Handle to an actor in a [`Stage`](super::Stage).
    pub struct ActorId;
}

/// A node in the scene graph. Position is relative to the parent, y grows
/// downward.
#[derive(Debug)]
pub struct Actor {
    pub(crate) parent: Option<ActorId>,
    pub(crate) children: Vec<ActorId>,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) color: Color,
    pub(crate) touchable: bool,
    pub(crate) needs_layout: bool,
    pub(crate) widget: Widget,
}

impl Actor {
    pub(crate) fn new(widget: Widget, color: Color) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            color,
            touchable: true,
            needs_layout: true,
            widget,
        }
    }

    pub fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    pub fn children(&self) -> &[ActorId] {
        &self.children
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Bounds in the parent's coordinate space.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_touchable(&self) -> bool {
        self.touchable
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }
}
