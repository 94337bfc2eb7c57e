//! Notifications for a presentation layer.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::card::Card;
use crate::participant::ParticipantId;

/// Something that happened during a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A match started.
    MatchStarted,
    /// A participant's opening bet was accepted.
    ParticipantJoined {
        /// The admitted participant.
        participant: ParticipantId,
    },
    /// The turn passed to a participant.
    TurnStarted {
        /// The participant now acting.
        participant: ParticipantId,
        /// The current round.
        round: u32,
    },
    /// A participant took a card.
    CardTaken {
        /// The participant.
        participant: ParticipantId,
        /// Index of the hand that received the card.
        hand: usize,
        /// The card, with its face state.
        card: Card,
    },
    /// Card face states or hand layout changed.
    CardsUpdated {
        /// The participant whose cards changed.
        participant: ParticipantId,
    },
    /// A hand was split.
    HandSplit {
        /// The participant.
        participant: ParticipantId,
        /// Index of the hand that was split.
        hand: usize,
    },
    /// A hand's bet was doubled.
    BetDoubled {
        /// The participant.
        participant: ParticipantId,
        /// Index of the doubled hand.
        hand: usize,
        /// The new bet amount.
        bet: usize,
    },
    /// A participant won the match.
    MatchWon {
        /// The winner.
        participant: ParticipantId,
    },
    /// The match ended.
    MatchEnded {
        /// The winner, if any.
        winner: Option<ParticipantId>,
    },
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Fire-and-forget fan-out to subscribed listeners.
#[derive(Default)]
pub(crate) struct Listeners(Vec<Listener>);

impl Listeners {
    pub(crate) fn push(&mut self, listener: Listener) {
        self.0.push(listener);
    }

    pub(crate) fn emit(&mut self, event: &GameEvent) {
        for listener in &mut self.0 {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.0.len())
            .finish()
    }
}
