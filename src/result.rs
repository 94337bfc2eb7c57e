//! Match result types.

use alloc::vec::Vec;

use crate::participant::ParticipantId;

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    /// The winner's active hand reached exactly 21.
    TwentyOne,
    /// Every opponent busted.
    OpponentsBusted,
    /// Every opponent stood and the winner holds the strictly highest score.
    OutscoredStandingOpponents,
    /// Everyone stood; the highest score not over 21 wins, earliest
    /// registered participant on ties.
    HighestScore,
    /// Everyone stood and everyone busted.
    AllBusted,
}

/// Final position of one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    /// The participant.
    pub participant: ParticipantId,
    /// Score of the participant's active hand when the match ended.
    pub score: u8,
    /// Number of hands the participant held.
    pub hands: usize,
    /// Whether every hand had stood.
    pub stood: bool,
}

/// Result of a completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// The winner, if any.
    pub winner: Option<ParticipantId>,
    /// Why the match ended.
    pub reason: WinReason,
    /// Round counter when the match ended.
    pub rounds: u32,
    /// Standings of every admitted participant in registration order.
    pub standings: Vec<Standing>,
}
