//! Error types for game operations.

use thiserror::Error;

/// Errors a betting gateway reports when it declines a stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// The gateway holds no account for this participant.
    #[error("participant has no account")]
    UnknownParticipant,
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
}

/// Errors that can occur when starting a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// A match is already running.
    #[error("a match is already in progress")]
    InProgress,
    /// No participant could place a bet.
    #[error("no participant could place a bet")]
    NoBets,
    /// The previous match has completed but was not settled.
    #[error("the previous match has not been settled")]
    Unsettled,
}

/// Errors that can occur during participant actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Participant is not part of the running match.
    #[error("participant is not in the match")]
    NotInMatch,
    /// Not this participant's turn.
    #[error("not this participant's turn")]
    NotYourTurn,
    /// Participant has no active hand.
    #[error("no active hand")]
    NoActiveHand,
    /// The active hand has already stood.
    #[error("hand has already stood")]
    HandStood,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// The betting gateway declined the stake for a new or doubled hand.
    #[error("bet declined: {0}")]
    BetDeclined(BetError),
    /// No remaining card has the requested value.
    #[error("no card with the requested value left in the deck")]
    NoMatchingCard,
    /// The deck ran out of cards.
    #[error("the deck is exhausted")]
    DeckExhausted,
}

impl ActionError {
    /// Returns whether the error signals a configuration fault rather than an
    /// illegal action.
    ///
    /// Illegal actions leave the game untouched and can be ignored. An
    /// exhausted deck means the configured card set cannot support the
    /// match and should stop the caller.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::DeckExhausted)
    }
}

/// Errors that can occur during settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettleError {
    /// The match has not completed.
    #[error("the match has not completed")]
    InvalidState,
    /// The match was already settled.
    #[error("the match was already settled")]
    AlreadySettled,
}
