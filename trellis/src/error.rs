use std::path::PathBuf;

use thiserror::Error;

use crate::scene::ActorId;
use crate::widgets::GroupId;

/// Boxed cause carried by parse failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

/// Misuse of the widget API. Lookups that simply find nothing return
/// `Option` instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("style must be an image button style")]
    WrongStyle,

    #[error("table must have a skin set to use this method")]
    SkinRequired,

    #[error("no {kind} registered under {name:?}")]
    StyleNotFound { name: String, kind: &'static str },

    #[error("name is already used: {0}")]
    DuplicateName(String),

    #[error("unknown actor {0:?}")]
    UnknownActor(ActorId),

    #[error("actor {id:?} is not a {expected}")]
    WrongWidget { id: ActorId, expected: &'static str },

    #[error("unknown button group {0:?}")]
    UnknownGroup(GroupId),

    #[error("actor {child:?} cannot be placed under {parent:?}")]
    InvalidParent { parent: ActorId, child: ActorId },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("error parsing layout file: {}", path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// A layout description failed to apply. Keeps the offending text for
/// diagnostics.
#[derive(Debug, Error)]
#[error("error parsing layout: {cause}")]
pub struct ParseError {
    source_text: String,
    #[source]
    cause: BoxError,
}

impl ParseError {
    pub fn new(source_text: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            source_text: source_text.into(),
            cause: cause.into(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }
}
