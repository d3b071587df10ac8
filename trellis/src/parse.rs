//! Hook for textual layout descriptions.
//!
//! The crate ships no description language of its own. A [`LayoutParser`]
//! turns text into the same `Stage` calls code would make, and the stage
//! wraps whatever it reports in a [`ParseError`] carrying the text.

use std::fs;
use std::path::Path;

use crate::error::{BoxError, Error, ParseError, Result};
use crate::scene::{ActorId, Stage};

pub trait LayoutParser {
    fn parse(&self, stage: &mut Stage, table: ActorId, text: &str) -> std::result::Result<(), BoxError>;
}

impl<F> LayoutParser for F
where
    F: Fn(&mut Stage, ActorId, &str) -> std::result::Result<(), BoxError>,
{
    fn parse(&self, stage: &mut Stage, table: ActorId, text: &str) -> std::result::Result<(), BoxError> {
        self(stage, table, text)
    }
}

impl Stage {
    /// Apply a layout description to `table`.
    pub fn parse(
        &mut self,
        table: ActorId,
        parser: &dyn LayoutParser,
        text: &str,
    ) -> std::result::Result<(), ParseError> {
        parser.parse(self, table, text).map_err(|cause| {
            log::debug!("[layout] parse into {:?} failed: {}", table, cause);
            ParseError::new(text, cause)
        })
    }

    /// Read `path` and apply it to `table`.
    pub fn parse_file(
        &mut self,
        table: ActorId,
        parser: &dyn LayoutParser,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| Error::ParseFile {
            path: path.to_path_buf(),
            source: ParseError::new(String::new(), err),
        })?;
        self.parse(table, parser, &text)
            .map_err(|source| Error::ParseFile {
                path: path.to_path_buf(),
                source,
            })
    }
}
