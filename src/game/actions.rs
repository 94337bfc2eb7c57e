use crate::betting::BettingGateway;
use crate::card::Card;
use crate::error::ActionError;
use crate::event::GameEvent;
use crate::hand::Hand;
use crate::participant::{Participant, ParticipantId};

use super::Game;

impl Game {
    fn ensure_turn(&self, id: ParticipantId) -> Result<(), ActionError> {
        if !self.is_in_game(id) {
            return Err(ActionError::NotInMatch);
        }

        if !self.is_current_turn(id) {
            return Err(ActionError::NotYourTurn);
        }

        Ok(())
    }

    /// Returns the active hand of a participant whose turn it is, if it can
    /// still take cards.
    fn open_hand(&self, id: ParticipantId) -> Result<&Hand, ActionError> {
        self.ensure_turn(id)?;

        let hand = self
            .participant(id)
            .and_then(Participant::active_hand)
            .ok_or(ActionError::NoActiveHand)?;

        if hand.has_stood() {
            return Err(ActionError::HandStood);
        }

        Ok(hand)
    }

    fn take(
        &mut self,
        id: ParticipantId,
        face_down: bool,
        value: Option<u8>,
    ) -> Result<Card, ActionError> {
        self.open_hand(id)?;

        let mut card = match value {
            Some(value) => self.draw_card_with_value(value)?,
            None => self.draw_card()?,
        };
        card.set_face_up(!face_down);

        let participant = self.participant_mut(id).ok_or(ActionError::NotInMatch)?;
        let index = participant.active_hand_index();
        let hand = participant
            .active_hand_mut()
            .ok_or(ActionError::NoActiveHand)?;

        hand.add_card(card);
        if hand.len() > 2 {
            hand.set_can_double(false);
        }
        let busted = hand.is_bust();
        if busted {
            hand.stand();
        }

        tracing::trace!(
            participant = id.0,
            hand = index,
            rank = card.rank,
            face_up = card.is_face_up(),
            score = hand.score(),
            "card taken"
        );

        self.emit(GameEvent::CardTaken {
            participant: id,
            hand: index,
            card,
        });

        if !self.check_turn(id) {
            if let Some(hand) = self.participant_mut(id).and_then(|p| p.hand_mut(index)) {
                hand.stand();
            }
        }

        if busted {
            if let Some(participant) = self.participant_mut(id) {
                participant.advance_active_hand();
            }
        }

        Ok(card)
    }

    /// Draws a random card into the active hand.
    ///
    /// A hand going over 21 stands. Once a hand holds more than two cards it
    /// can no longer double down. If the card ends the match, the hand stands
    /// as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not in the match, it is not
    /// their turn, there is no active hand, the hand has stood, or the deck
    /// is exhausted.
    pub fn take_card(&mut self, id: ParticipantId, face_down: bool) -> Result<Card, ActionError> {
        self.take(id, face_down, None)
    }

    /// Draws the first remaining card of bare value `value` into the active
    /// hand, following the same rules as [`take_card`](Self::take_card).
    ///
    /// # Errors
    ///
    /// Returns the errors of [`take_card`](Self::take_card), or
    /// [`ActionError::NoMatchingCard`] if no card of that value is left.
    pub fn take_card_with_value(
        &mut self,
        id: ParticipantId,
        face_down: bool,
        value: u8,
    ) -> Result<Card, ActionError> {
        self.take(id, face_down, Some(value))
    }

    /// Participant action: Double down (double bet, receive one card, then
    /// stand and end the turn).
    ///
    /// The extra stake is reserved through the gateway before the card is
    /// drawn, so a declined raise leaves the hand untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not in the match, it is not
    /// their turn, there is no active hand, the hand has stood or may not
    /// double, the gateway declines the extra stake, or the deck is
    /// exhausted.
    pub fn double_down(
        &mut self,
        id: ParticipantId,
        gateway: &mut dyn BettingGateway,
    ) -> Result<Card, ActionError> {
        if !self.open_hand(id)?.can_double() {
            return Err(ActionError::CannotDouble);
        }

        if self.deck.is_empty() {
            tracing::error!(round = self.round, "deck exhausted");
            return Err(ActionError::DeckExhausted);
        }

        let participant = self.participant_mut(id).ok_or(ActionError::NotInMatch)?;
        let index = participant.active_hand_index();
        let hand = participant
            .active_hand_mut()
            .ok_or(ActionError::NoActiveHand)?;
        if let Err(err) = gateway.try_raise_bet(id, hand) {
            tracing::debug!(participant = id.0, %err, "double declined");
            return Err(ActionError::BetDeclined(err));
        }

        let card = self.take_card(id, false)?;

        let mut bet = 0;
        if let Some(participant) = self.participant_mut(id) {
            if let Some(hand) = participant.hand_mut(index) {
                hand.set_can_double(false);
                hand.stand();
                bet = hand.bet();
            }
            if participant.active_hand_index() == index {
                participant.advance_active_hand();
            }
        }

        tracing::trace!(participant = id.0, hand = index, bet, "bet doubled");
        self.emit(GameEvent::BetDoubled {
            participant: id,
            hand: index,
            bet,
        });

        self.end_turn(id);

        Ok(card)
    }

    /// Participant action: Stand on the active hand.
    ///
    /// The next hand that has not stood becomes active. The turn ends once
    /// every hand has stood.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not in the match, it is not
    /// their turn, or there is no active hand.
    pub fn stand(&mut self, id: ParticipantId) -> Result<(), ActionError> {
        self.ensure_turn(id)?;

        let participant = self.participant_mut(id).ok_or(ActionError::NotInMatch)?;
        participant
            .active_hand_mut()
            .ok_or(ActionError::NoActiveHand)?
            .stand();
        participant.advance_active_hand();
        let done = participant.has_stood();

        tracing::trace!(participant = id.0, done, "hand stood");

        if done {
            self.end_turn(id);
        }

        Ok(())
    }

    /// Participant action: Split a pair into two hands.
    ///
    /// The stake for the new hand is authorised before any card moves, so a
    /// declined bet leaves the pair untouched. On success the second card
    /// moves to a new hand appended after the others, and both hands may
    /// double down. No cards are dealt; see
    /// [`deal_split_hands`](Self::deal_split_hands).
    ///
    /// Returns the index of the new hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not in the match, it is not
    /// their turn, there is no active hand, the hand has stood or is not a
    /// pair, or the gateway declines the stake.
    pub fn split(
        &mut self,
        id: ParticipantId,
        gateway: &mut dyn BettingGateway,
    ) -> Result<usize, ActionError> {
        if !self.open_hand(id)?.is_pair() {
            return Err(ActionError::CannotSplit);
        }

        let mut new_hand = Hand::new(self.next_hand_id());
        if let Err(err) = gateway.try_place_bet(id, &mut new_hand) {
            tracing::debug!(participant = id.0, %err, "split declined");
            return Err(ActionError::BetDeclined(err));
        }

        let participant = self.participant_mut(id).ok_or(ActionError::NotInMatch)?;
        let index = participant.active_hand_index();
        let hand = participant
            .active_hand_mut()
            .ok_or(ActionError::NoActiveHand)?;
        let card = hand.take_split_card().ok_or(ActionError::CannotSplit)?;
        hand.set_can_double(true);

        new_hand.add_card(card);
        new_hand.set_can_double(true);
        let new_index = participant.push_hand(new_hand);

        tracing::trace!(participant = id.0, hand = index, new_hand = new_index, "hand split");

        self.emit(GameEvent::CardsUpdated { participant: id });
        self.emit(GameEvent::HandSplit {
            participant: id,
            hand: index,
        });

        Ok(new_index)
    }

    /// Deals one face-up card to the active hand and one to `new_hand`, then
    /// makes the original hand active again.
    ///
    /// # Errors
    ///
    /// Returns the first error of the two [`take_card`](Self::take_card)
    /// calls.
    pub fn deal_split_hands(
        &mut self,
        id: ParticipantId,
        new_hand: usize,
    ) -> Result<(), ActionError> {
        let original = self
            .participant(id)
            .map(Participant::active_hand_index)
            .ok_or(ActionError::NotInMatch)?;

        let first = self.take_card(id, false);

        if let Some(participant) = self.participant_mut(id) {
            participant.set_active_hand(new_hand);
        }
        let second = self.take_card(id, false);

        if let Some(participant) = self.participant_mut(id) {
            participant.set_active_hand(original);
        }

        first.and(second).map(drop)
    }

    /// Turns every card of the active hand face-up.
    ///
    /// A hand whose revealed score is over 21 stands.
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not in the match, it is not
    /// their turn, or there is no active hand.
    pub fn reveal_hand(&mut self, id: ParticipantId) -> Result<(), ActionError> {
        self.ensure_turn(id)?;

        let hand = self
            .participant_mut(id)
            .and_then(Participant::active_hand_mut)
            .ok_or(ActionError::NoActiveHand)?;

        hand.reveal_all();
        if hand.is_bust() {
            hand.stand();
        }

        tracing::trace!(participant = id.0, score = hand.score(), "hand revealed");
        self.emit(GameEvent::CardsUpdated { participant: id });

        Ok(())
    }
}
