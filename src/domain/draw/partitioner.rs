//! Randomized team formation
//!
//! Pure, single-shot computation: shuffle a local copy of the selection with
//! an unbiased Fisher-Yates shuffle and cut it into fixed-size teams. The
//! random source is injected so tests can drive a seeded generator while
//! production callers pass `thread_rng`.

use rand::seq::SliceRandom;
use rand::Rng;

use super::entity::{DrawResult, Participant, Team};
use super::error::DrawError;

/// Default number of players per team.
pub const DEFAULT_GROUP_SIZE: usize = 4;

/// Shuffle `participants` uniformly at random and partition them into teams
/// of `group_size`.
///
/// Every team holds exactly `group_size` members except possibly the last,
/// which holds the remainder and is still emitted. Team numbers are
/// contiguous from 1 in formation order.
///
/// Fails with [`DrawError::InsufficientParticipants`] when the selection
/// cannot fill one complete team; no partial result is produced in that case.
pub fn form_teams<R: Rng + ?Sized>(
    participants: Vec<Participant>,
    group_size: usize,
    rng: &mut R,
) -> Result<DrawResult, DrawError> {
    if group_size == 0 {
        return Err(DrawError::InvalidGroupSize);
    }

    if participants.len() < group_size {
        return Err(DrawError::InsufficientParticipants {
            available: participants.len(),
            required: group_size,
        });
    }

    let mut shuffled = participants;
    shuffled.shuffle(rng);

    let teams = shuffled
        .chunks(group_size)
        .enumerate()
        .map(|(index, members)| Team {
            number: index as u32 + 1,
            members: members.to_vec(),
        })
        .collect();

    Ok(DrawResult { teams })
}

/// Draw a fresh partition over the same selection.
///
/// No state survives between draws, so this is exactly [`form_teams`] again;
/// the previous result is simply discarded by the caller.
pub fn redraw<R: Rng + ?Sized>(
    participants: Vec<Participant>,
    group_size: usize,
    rng: &mut R,
) -> Result<DrawResult, DrawError> {
    form_teams(participants, group_size, rng)
}

/// Pick a single participant uniformly at random.
pub fn draw_student<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<Participant, DrawError> {
    participants
        .choose(rng)
        .cloned()
        .ok_or(DrawError::InsufficientParticipants {
            available: 0,
            required: 1,
        })
}
