//! Human participants and their commands.

use crate::betting::BettingGateway;
use crate::error::ActionError;
use crate::game::Game;
use crate::participant::ParticipantId;

use super::{Policy, absorb};

/// A player intent.
///
/// Commands hold no state; they forward to the [`Game`] action of the same
/// name, which decides whether the action is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Take a face-up card.
    Hit,
    /// Stand on the active hand.
    Stand,
    /// Double the bet for exactly one more card.
    Double,
    /// Split a pair and deal one card to each resulting hand.
    Split,
}

impl Command {
    /// Runs the command for participant `id`.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying [`Game`] action.
    pub fn execute(
        self,
        id: ParticipantId,
        game: &mut Game,
        gateway: &mut dyn BettingGateway,
    ) -> Result<(), ActionError> {
        match self {
            Self::Hit => game.take_card(id, false).map(drop),
            Self::Stand => game.stand(id),
            Self::Double => game.double_down(id, gateway).map(drop),
            Self::Split => {
                let new_hand = game.split(id, gateway)?;
                game.deal_split_hands(id, new_hand)
            }
        }
    }
}

/// Holds at most one pending command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandInvoker {
    pending: Option<Command>,
}

impl CommandInvoker {
    /// Creates an empty invoker.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Replaces the pending command.
    pub const fn set(&mut self, command: Command) {
        self.pending = Some(command);
    }

    /// Returns the pending command.
    #[must_use]
    pub const fn pending(&self) -> Option<Command> {
        self.pending
    }

    /// Executes and clears the pending command.
    ///
    /// Returns `Ok(false)` when nothing was pending.
    ///
    /// # Errors
    ///
    /// Returns the error of the executed command.
    pub fn execute(
        &mut self,
        id: ParticipantId,
        game: &mut Game,
        gateway: &mut dyn BettingGateway,
    ) -> Result<bool, ActionError> {
        let Some(command) = self.pending.take() else {
            return Ok(false);
        };
        command.execute(id, game, gateway).map(|()| true)
    }
}

/// A participant controlled through [`Command`]s.
///
/// The opening two cards are taken automatically: the first one ends the
/// turn, the second one does not. After that each decision point runs the
/// pending command, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HumanPolicy {
    invoker: CommandInvoker,
}

impl HumanPolicy {
    /// Creates a human policy with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            invoker: CommandInvoker::new(),
        }
    }

    /// Returns the pending command.
    #[must_use]
    pub const fn pending(&self) -> Option<Command> {
        self.invoker.pending()
    }
}

impl Policy for HumanPolicy {
    fn name(&self) -> &'static str {
        "human"
    }

    fn on_match_start(&mut self) {
        self.invoker = CommandInvoker::new();
    }

    fn tick(
        &mut self,
        id: ParticipantId,
        game: &mut Game,
        gateway: &mut dyn BettingGateway,
    ) -> Result<(), ActionError> {
        if !game.is_in_game(id) || !game.is_current_turn(id) {
            return Ok(());
        }

        let Some((cards, stood)) = game.participant(id).and_then(|participant| {
            participant
                .active_hand()
                .map(|hand| (hand.len(), participant.has_stood()))
        }) else {
            return Ok(());
        };

        match cards {
            0 => {
                absorb(id, game.take_card(id, false))?;
                game.end_turn(id);
                return Ok(());
            }
            1 => return absorb(id, game.take_card(id, false)),
            _ => {}
        }

        if stood {
            game.end_turn(id);
            return Ok(());
        }

        absorb(id, self.invoker.execute(id, game, gateway))
    }

    fn submit(&mut self, command: Command) -> bool {
        self.invoker.set(command);
        true
    }
}
