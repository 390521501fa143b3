//! Draw result types

use serde::{Deserialize, Serialize};

/// A participant eligible for a draw.
///
/// Participants are immutable snapshots taken from the roster at draw time;
/// the id is stable across repeated draws over the same selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One team produced by a draw.
///
/// Teams are numbered from 1 in formation order. Every team holds exactly the
/// configured group size except possibly the last one, which holds the
/// remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub number: u32,
    pub members: Vec<Participant>,
}

impl Team {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The outcome of a single team draw.
///
/// Covers every input participant exactly once: teams are pairwise disjoint
/// and no participant is omitted. A re-draw replaces the whole result, it
/// never extends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub teams: Vec<Team>,
}

impl DrawResult {
    /// Total number of participants placed across all teams.
    pub fn total_participants(&self) -> usize {
        self.teams.iter().map(Team::len).sum()
    }
}
