use alloc::vec::Vec;

use crate::betting::BettingGateway;
use crate::error::{SettleError, StartError};
use crate::event::GameEvent;
use crate::hand::Hand;
use crate::result::MatchOutcome;

use super::{Game, GameState};

impl Game {
    /// Starts a match with every participant whose opening stake the gateway
    /// accepts.
    ///
    /// Participants are offered a fresh hand in registration order. If any
    /// stake is accepted, the deck is reset to the configured cards,
    /// face-down, and every participant whose stake was declined is left
    /// without hands and outside the match. Admitted participants form the
    /// turn queue and the first of them acts first.
    ///
    /// # Errors
    ///
    /// Returns an error if a match is already running, if the last completed
    /// match was not settled, or if no participant could place a bet. The
    /// deck and every participant's hands are left untouched in each case.
    pub fn start_match(&mut self, gateway: &mut dyn BettingGateway) -> Result<(), StartError> {
        match self.state {
            GameState::InProgress => return Err(StartError::InProgress),
            GameState::Complete if !self.settled => return Err(StartError::Unsettled),
            _ => {}
        }

        let mut staged = Vec::with_capacity(self.participants.len());
        for index in 0..self.participants.len() {
            let id = self.participants[index].id();
            let mut hand = Hand::new(self.next_hand_id());

            match gateway.try_place_bet(id, &mut hand) {
                Ok(()) => staged.push(Some(hand)),
                Err(err) => {
                    tracing::info!(participant = id.0, %err, "participant sits out the match");
                    staged.push(None);
                }
            }
        }

        if staged.iter().all(Option::is_none) {
            tracing::info!("no participant could place a bet; match not started");
            return Err(StartError::NoBets);
        }

        self.deck = self.options.deck();

        let mut admitted = Vec::new();
        for (participant, hand) in self.participants.iter_mut().zip(staged) {
            match hand {
                Some(hand) => {
                    participant.admit(hand);
                    admitted.push(participant.id());
                }
                None => participant.exclude(),
            }
        }

        self.turns = admitted.iter().copied().collect();
        self.current = self.turns.front().copied();
        self.roster = admitted;
        self.round = 0;
        self.state = GameState::InProgress;
        self.outcome = None;
        self.settled = false;

        tracing::info!(
            participants = self.roster.len(),
            cards = self.deck.len(),
            "match started"
        );

        for id in self.roster.clone() {
            if let Some(policy) = self
                .participant_mut(id)
                .and_then(|participant| participant.policy.as_mut())
            {
                policy.on_match_start();
            }
            self.emit(GameEvent::ParticipantJoined { participant: id });
        }

        self.emit(GameEvent::MatchStarted);
        if let Some(participant) = self.current {
            self.emit(GameEvent::TurnStarted {
                participant,
                round: 0,
            });
        }

        Ok(())
    }

    /// Reports every hand of the last match to the gateway.
    ///
    /// A hand counts as won when it belongs to the winner and is not over 21.
    /// Returns the outcome that was settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the match has not completed or was already
    /// settled.
    pub fn settle(
        &mut self,
        gateway: &mut dyn BettingGateway,
    ) -> Result<MatchOutcome, SettleError> {
        if self.state != GameState::Complete {
            return Err(SettleError::InvalidState);
        }

        if self.settled {
            return Err(SettleError::AlreadySettled);
        }

        let outcome = self.outcome.clone().ok_or(SettleError::InvalidState)?;

        for &id in &self.roster {
            let Some(participant) = self.participant(id) else {
                continue;
            };
            let is_winner = outcome.winner == Some(id);

            for hand in participant.hands() {
                gateway.bet_ended(id, hand, is_winner && !hand.is_bust());
            }
        }

        self.settled = true;

        Ok(outcome)
    }
}
