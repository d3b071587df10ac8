pub mod batch;
pub mod config;
pub mod drawable;
pub mod error;
pub mod event;
pub mod layout;
pub mod parse;
pub mod scene;
pub mod skin;
pub mod types;
pub mod widgets;

pub use batch::{Batch, DrawOp, RecordingBatch};
pub use config::StageConfig;
pub use drawable::{Drawable, SolidDrawable};
pub use error::{BoxError, Error, ParseError, Result};
pub use event::{Change, ChangeEvent, ClickListener, ClickOutcome, PointerEvent};
pub use layout::{Cell, CellRef, Measure, Placement, Rect, TableLayout, MAX_COLSPAN};
pub use parse::LayoutParser;
pub use scene::{Actor, ActorId, Stage};
pub use skin::Skin;
pub use types::*;
pub use widgets::{
    Button, ButtonGroup, ButtonStyle, CustomWidget, GroupId, Image, ImageButton, ImageStyle,
    Label, LabelStyle, Table, Widget,
};
