use crate::scene::ActorId;

/// Discrete pointer input, already in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    /// The press was taken away (focus loss, gesture takeover).
    Cancel,
}

impl PointerEvent {
    /// Translate a terminal mouse event. Only the left button drives
    /// pointer presses; other events are ignored.
    pub fn from_mouse(event: crossterm::event::MouseEvent) -> Option<Self> {
        use crossterm::event::{MouseButton, MouseEventKind};

        let x = event.column as f32;
        let y = event.row as f32;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down { x, y }),
            MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up { x, y }),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                Some(PointerEvent::Moved { x, y })
            }
            _ => None,
        }
    }
}

/// Pointer-down tracking for one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickListener {
    pressed: bool,
    over: bool,
}

impl ClickListener {
    /// Pointer is held down and still inside the button.
    pub fn is_pressed(&self) -> bool {
        self.pressed && self.over
    }

    /// Pointer is held down, wherever it currently is.
    pub fn is_held(&self) -> bool {
        self.pressed
    }

    pub(crate) fn touch_down(&mut self) {
        self.pressed = true;
        self.over = true;
    }

    pub(crate) fn touch_moved(&mut self, over: bool) {
        if self.pressed {
            self.over = over;
        }
    }

    /// End the press. Returns true when it completed a click.
    pub(crate) fn touch_up(&mut self, over: bool) -> bool {
        let clicked = self.pressed && over;
        self.cancel();
        clicked
    }

    pub(crate) fn cancel(&mut self) {
        self.pressed = false;
        self.over = false;
    }
}

/// Result of a completed or abandoned press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Checked state changed to the contained value.
    Toggled(bool),
    /// An observer rejected the change and it was rolled back.
    Vetoed,
    /// The button group did not allow the change.
    Refused,
    /// The pointer was released outside the button, or the press was
    /// cancelled.
    Cancelled,
}

/// Sent to change observers after a button's checked state flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub button: ActorId,
    pub checked: bool,
}

/// An observer's answer to a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Change {
    #[default]
    Keep,
    Veto,
}
