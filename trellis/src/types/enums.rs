/// Placement along one axis. `Start` is left for the horizontal axis and top
/// for the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    /// Offset of a `size`-long span placed inside `available`.
    pub fn offset(self, available: f32, size: f32) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => (available - size) / 2.0,
            Align::End => available - size,
        }
    }
}

/// Two-axis alignment of a widget inside its cell, or of a table inside its
/// own bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub horizontal: Align,
    pub vertical: Align,
}

impl Alignment {
    pub const CENTER: Self = Self::new(Align::Center, Align::Center);
    pub const TOP_LEFT: Self = Self::new(Align::Start, Align::Start);
    pub const TOP: Self = Self::new(Align::Center, Align::Start);
    pub const TOP_RIGHT: Self = Self::new(Align::End, Align::Start);
    pub const LEFT: Self = Self::new(Align::Start, Align::Center);
    pub const RIGHT: Self = Self::new(Align::End, Align::Center);
    pub const BOTTOM_LEFT: Self = Self::new(Align::Start, Align::End);
    pub const BOTTOM: Self = Self::new(Align::Center, Align::End);
    pub const BOTTOM_RIGHT: Self = Self::new(Align::End, Align::End);

    pub const fn new(horizontal: Align, vertical: Align) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// How an image drawable is scaled into the space its widget was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    /// Preserve aspect ratio, scale until one axis touches the bounds.
    Fit,
    /// Preserve aspect ratio, scale until both axes cover the bounds.
    Fill,
    /// Ignore aspect ratio and use the bounds as-is.
    #[default]
    Stretch,
    /// Keep the drawable's own minimum size.
    None,
}

impl Scaling {
    /// Scaled size of a `source` sized drawable placed into `target`.
    pub fn apply(self, source: (f32, f32), target: (f32, f32)) -> (f32, f32) {
        let (sw, sh) = source;
        let (tw, th) = target;
        match self {
            Scaling::Stretch => (tw, th),
            Scaling::None => (sw, sh),
            Scaling::Fit | Scaling::Fill if sw <= 0.0 || sh <= 0.0 => (0.0, 0.0),
            Scaling::Fit => {
                let scale = (tw / sw).min(th / sh);
                (sw * scale, sh * scale)
            }
            Scaling::Fill => {
                let scale = (tw / sw).max(th / sh);
                (sw * scale, sh * scale)
            }
        }
    }
}

/// Which debug overlay lines a table emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugLines {
    pub table: bool,
    pub cell: bool,
    pub widget: bool,
}

impl DebugLines {
    pub const NONE: Self = Self {
        table: false,
        cell: false,
        widget: false,
    };

    pub const ALL: Self = Self {
        table: true,
        cell: true,
        widget: true,
    };

    pub fn table() -> Self {
        Self {
            table: true,
            ..Default::default()
        }
    }

    pub fn cell() -> Self {
        Self {
            cell: true,
            ..Default::default()
        }
    }

    pub fn widget() -> Self {
        Self {
            widget: true,
            ..Default::default()
        }
    }

    pub fn any(&self) -> bool {
        self.table || self.cell || self.widget
    }
}
