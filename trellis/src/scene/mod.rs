//! The actor tree.
//!
//! Actors live in a slot-map arena owned by [`Stage`]. Every structural
//! change goes through the stage so that cached layout sizes are cleared on
//! the changed actor and all of its ancestors.

mod actor;
mod draw;
mod input;
mod stage;

pub use actor::{Actor, ActorId};
pub use stage::Stage;
