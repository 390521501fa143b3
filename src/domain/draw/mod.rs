//! Team draw core
//!
//! Converts a selected subset of the roster into a randomized partition of
//! fixed-size teams, plus the single-student raffle. The whole module is
//! side-effect free apart from consuming entropy from the caller's random
//! source.

mod entity;
mod error;
mod partitioner;

pub use entity::{DrawResult, Participant, Team};
pub use error::DrawError;
pub use partitioner::{draw_student, form_teams, redraw, DEFAULT_GROUP_SIZE};
