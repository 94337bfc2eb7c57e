//! Per-variant participant behaviour.
//!
//! A [`Policy`] decides what a participant does when the engine gives it a
//! decision point. All legality lives in the [`Game`] action methods; a
//! policy only chooses which of them to call.

use crate::betting::BettingGateway;
use crate::error::ActionError;
use crate::game::Game;
use crate::participant::ParticipantId;

pub mod dealer;
pub mod human;

pub use dealer::{DealerPolicy, DealerState};
pub use human::{Command, CommandInvoker, HumanPolicy};

/// Decision logic of one participant variant.
pub trait Policy {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Called when the participant is admitted into a new match.
    fn on_match_start(&mut self) {}

    /// Called when a match ends.
    fn on_match_complete(&mut self) {}

    /// One decision point, driven by [`Game::tick`].
    ///
    /// # Errors
    ///
    /// Returns only fatal errors (see [`ActionError::is_fatal`]); illegal
    /// actions are absorbed.
    fn tick(
        &mut self,
        id: ParticipantId,
        game: &mut Game,
        gateway: &mut dyn BettingGateway,
    ) -> Result<(), ActionError>;

    /// Queues a command for the next decision point.
    ///
    /// Returns `false` if the policy does not take commands.
    fn submit(&mut self, command: Command) -> bool {
        let _ = command;
        false
    }
}

/// A participant driven entirely by direct calls on [`Game`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualPolicy;

impl Policy for ManualPolicy {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn tick(
        &mut self,
        _id: ParticipantId,
        _game: &mut Game,
        _gateway: &mut dyn BettingGateway,
    ) -> Result<(), ActionError> {
        Ok(())
    }
}

/// Drops an illegal-action error, keeping fatal ones.
pub(crate) fn absorb<T>(
    id: ParticipantId,
    result: Result<T, ActionError>,
) -> Result<(), ActionError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.is_fatal() => Err(err),
        Err(err) => {
            tracing::trace!(participant = id.0, %err, "action ignored");
            Ok(())
        }
    }
}
