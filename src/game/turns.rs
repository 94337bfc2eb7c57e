use alloc::vec::Vec;

use crate::event::GameEvent;
use crate::participant::{Participant, ParticipantId};
use crate::result::{MatchOutcome, Standing, WinReason};

use super::{Game, GameState};

impl Game {
    /// Returns whether `id` is at the head of the turn queue.
    #[must_use]
    pub fn is_current_turn(&self, id: ParticipantId) -> bool {
        self.turns.front() == Some(&id)
    }

    /// Evaluates the win conditions from the point of view of `id`.
    ///
    /// Returns `true` while the match goes on. Returns `false` if `id` is not
    /// the current participant, or if the match has just ended:
    ///
    /// 1. `id`'s active hand scores exactly 21;
    /// 2. every opponent scores over 21;
    /// 3. every opponent has stood and `id` holds a score of at most 21,
    ///    strictly above every opponent not over 21;
    /// 4. everyone has stood: the highest score not over 21 wins, ties going
    ///    to the earliest registered participant.
    pub fn check_turn(&mut self, id: ParticipantId) -> bool {
        if !self.is_current_turn(id) {
            return false;
        }

        match self.evaluate(id) {
            None => true,
            Some((winner, reason)) => {
                self.finish(winner, reason);
                false
            }
        }
    }

    /// Ends `id`'s turn and passes it to the next participant.
    ///
    /// Does nothing unless `id` is current and the match goes on after
    /// evaluating the win conditions. A participant reaching the head of the
    /// queue after standing on every hand is skipped straight away.
    pub fn end_turn(&mut self, id: ParticipantId) {
        let mut id = id;

        while self.check_turn(id) {
            self.rotate();

            match self.current {
                Some(next) if self.participant(next).is_some_and(Participant::has_stood) => {
                    tracing::trace!(participant = next.0, "skipping participant who has stood");
                    id = next;
                }
                _ => return,
            }
        }
    }

    fn rotate(&mut self) {
        self.turns.pop_front();

        if self.turns.is_empty() {
            self.turns.extend(self.roster.iter().copied());
            self.round += 1;
        }

        self.current = self.turns.front().copied();

        if let Some(participant) = self.current {
            tracing::debug!(participant = participant.0, round = self.round, "turn started");
            self.emit(GameEvent::TurnStarted {
                participant,
                round: self.round,
            });
        }
    }

    fn roster_participants(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.roster.iter().filter_map(|&id| self.participant(id))
    }

    fn opponents(&self, id: ParticipantId) -> impl Iterator<Item = &Participant> + '_ {
        self.roster_participants().filter(move |p| p.id() != id)
    }

    fn evaluate(&self, id: ParticipantId) -> Option<(Option<ParticipantId>, WinReason)> {
        let score = self.participant(id).map_or(0, Participant::score);

        if score == 21 {
            return Some((Some(id), WinReason::TwentyOne));
        }

        if self.opponents(id).all(|p| p.score() > 21) {
            return Some((Some(id), WinReason::OpponentsBusted));
        }

        if score <= 21
            && self.opponents(id).all(Participant::has_stood)
            && self
                .opponents(id)
                .all(|p| p.score() > 21 || p.score() < score)
        {
            return Some((Some(id), WinReason::OutscoredStandingOpponents));
        }

        if self.roster_participants().all(Participant::has_stood) {
            let best = self
                .roster_participants()
                .filter(|p| p.score() <= 21)
                .fold(None::<&Participant>, |best, p| match best {
                    Some(leader) if leader.score() >= p.score() => Some(leader),
                    _ => Some(p),
                });

            return Some(best.map_or((None, WinReason::AllBusted), |p| {
                (Some(p.id()), WinReason::HighestScore)
            }));
        }

        None
    }

    fn finish(&mut self, winner: Option<ParticipantId>, reason: WinReason) {
        self.turns.clear();
        self.current = None;
        self.state = GameState::Complete;

        let standings: Vec<Standing> = self
            .roster_participants()
            .map(|p| Standing {
                participant: p.id(),
                score: p.score(),
                hands: p.total_hands(),
                stood: p.has_stood(),
            })
            .collect();

        tracing::info!(
            winner = ?winner.map(|id| id.0),
            ?reason,
            round = self.round,
            "match finished"
        );

        self.outcome = Some(MatchOutcome {
            winner,
            reason,
            rounds: self.round,
            standings,
        });

        if let Some(participant) = winner {
            self.emit(GameEvent::MatchWon { participant });
        }

        for participant in &mut self.participants {
            participant.leave_match();
            if let Some(policy) = participant.policy.as_mut() {
                policy.on_match_complete();
            }
        }

        self.emit(GameEvent::MatchEnded { winner });
    }
}
