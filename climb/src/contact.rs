//! Turning hand contact into body displacement.
//!
//! Each gripping hand produces a reaction: how far the body has to move so the
//! hand stays where it touched the surface. The two reactions are then merged
//! into a single kinematic displacement.

use crate::{
    sweep::SweepOutcome,
    types::{Hands, Vec3},
};

/// Contact summary for one hand this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandContact {
    /// The sweep struck a surface this tick.
    pub contact: bool,
    /// The hand was gripping at the end of the previous tick.
    pub was_gripping: bool,
    /// Body displacement attributed to this hand.
    pub reaction: Vec3,
}

impl HandContact {
    /// Whether this hand takes part in the averaged displacement.
    #[inline]
    pub fn engaged(&self) -> bool {
        self.contact || self.was_gripping
    }
}

/// Reaction for one hand given its sweep outcome.
///
/// - Already gripping: `anchor - desired`, the body follows the hand's overshoot
///   past the anchor it holds.
/// - Newly gripping: `sweep_end - desired`, the body backs off by however far the
///   desired point sank past the contact.
/// - No contact: zero.
pub fn hand_reaction(
    outcome: &SweepOutcome,
    was_gripping: bool,
    anchor: Vec3,
    desired: Vec3,
) -> HandContact {
    let reaction = match outcome {
        SweepOutcome::Free => Vec3::zeros(),
        SweepOutcome::Contact { .. } if was_gripping => anchor - desired,
        SweepOutcome::Contact { end, .. } => end - desired,
    };

    HandContact {
        contact: outcome.is_contact(),
        was_gripping,
        reaction,
    }
}

/// Merge the two per-hand reactions into one body displacement.
///
/// When both hands are engaged the reactions are averaged so that two anchors
/// pulling the same way do not double the movement. Otherwise the sum reduces to
/// the single active reaction (or zero).
pub fn combine_reactions(contacts: &Hands<HandContact>) -> Vec3 {
    let sum = contacts.left.reaction + contacts.right.reaction;
    if contacts.left.engaged() && contacts.right.engaged() {
        sum * 0.5
    } else {
        sum
    }
}
