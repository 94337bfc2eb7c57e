//! Automated dealer.

use crate::betting::BettingGateway;
use crate::error::ActionError;
use crate::game::Game;
use crate::hand::Hand;
use crate::participant::ParticipantId;

use super::{Policy, absorb};

/// Stage of the dealer's sequence within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DealerState {
    /// Take the hole card face-down.
    #[default]
    FirstTurn,
    /// Take the up card.
    SecondTurn,
    /// Reveal the hole card.
    LastTurn,
    /// Hit once per turn while the match is still open.
    End,
}

/// Dealer driven by a timed four-state machine.
///
/// Each [`tick`](Policy::tick) is one decision point. When the dealer sees
/// its turn it waits `delay` ticks, then checks again that the turn is still
/// its own before acting, since a win elsewhere may have closed the match in
/// the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerPolicy {
    state: DealerState,
    delay: u32,
    /// Ticks left before the pending action, if waiting.
    waiting: Option<u32>,
}

impl DealerPolicy {
    /// Creates a dealer that waits `delay` ticks before each action.
    #[must_use]
    pub const fn new(delay: u32) -> Self {
        Self {
            state: DealerState::FirstTurn,
            delay,
            waiting: None,
        }
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn state(&self) -> DealerState {
        self.state
    }

    /// Returns whether the dealer is waiting to act.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }

    fn transition(&mut self, id: ParticipantId, next: DealerState) {
        tracing::debug!(participant = id.0, from = ?self.state, to = ?next, "dealer state");
        self.state = next;
    }

    fn act(&mut self, id: ParticipantId, game: &mut Game) -> Result<(), ActionError> {
        match self.state {
            DealerState::FirstTurn => {
                if game.is_current_turn(id) {
                    absorb(id, game.take_card(id, true))?;
                    game.end_turn(id);
                    self.transition(id, DealerState::SecondTurn);
                }
            }
            DealerState::SecondTurn => {
                if game.is_current_turn(id) {
                    absorb(id, game.take_card(id, false))?;
                    game.end_turn(id);
                    self.transition(id, DealerState::LastTurn);
                }
            }
            DealerState::LastTurn => {
                let hole_hidden = game
                    .participant(id)
                    .and_then(|dealer| dealer.hand(0))
                    .is_some_and(Hand::has_hidden_cards);

                if game.is_current_turn(id) && hole_hidden {
                    absorb(id, game.reveal_hand(id))?;
                }
                game.end_turn(id);
                self.transition(id, DealerState::End);
            }
            DealerState::End => {
                if game.is_current_turn(id) && game.check_turn(id) {
                    absorb(id, game.take_card(id, false))?;
                    game.end_turn(id);
                }
            }
        }

        Ok(())
    }
}

impl Default for DealerPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Policy for DealerPolicy {
    fn name(&self) -> &'static str {
        "dealer"
    }

    fn on_match_start(&mut self) {
        self.state = DealerState::FirstTurn;
        self.waiting = None;
    }

    fn on_match_complete(&mut self) {
        self.waiting = None;
    }

    fn tick(
        &mut self,
        id: ParticipantId,
        game: &mut Game,
        _gateway: &mut dyn BettingGateway,
    ) -> Result<(), ActionError> {
        if !game.is_in_game(id) {
            return Ok(());
        }

        match self.waiting {
            None => {
                if !game.is_current_turn(id) {
                    return Ok(());
                }
                if self.delay > 0 {
                    self.waiting = Some(self.delay);
                    return Ok(());
                }
            }
            Some(ticks) if ticks > 1 => {
                self.waiting = Some(ticks - 1);
                return Ok(());
            }
            Some(_) => self.waiting = None,
        }

        self.act(id, game)
    }
}
