//! Hand representation.

use alloc::vec::Vec;

use crate::card::Card;

/// Unique identifier of a hand within a [`Game`](crate::Game).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandId(pub u32);

/// One bettable grouping of cards belonging to a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// Engine-assigned identifier.
    id: HandId,
    /// Cards in draw order.
    cards: Vec<Card>,
    /// Whether the hand takes no further cards.
    stand: bool,
    /// Whether the hand may still double down.
    can_double: bool,
    /// Stake bound to this hand by the betting gateway.
    bet: usize,
}

impl Hand {
    /// Creates a new empty hand with no stake.
    #[must_use]
    pub const fn new(id: HandId) -> Self {
        Self {
            id,
            cards: Vec::new(),
            stand: false,
            can_double: true,
            bet: 0,
        }
    }

    /// Returns the hand identifier.
    #[must_use]
    pub const fn id(&self) -> HandId {
        self.id
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the score of the face-up cards.
    ///
    /// Cards are folded in draw order, so an ace is valued against the total
    /// of the face-up cards drawn before it.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.cards
            .iter()
            .filter(|card| card.is_face_up())
            .fold(0, |total, card| card.score_contribution(total))
    }

    /// Returns whether the face-up score exceeds 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > 21
    }

    /// Returns whether any card is still face-down.
    #[must_use]
    pub fn has_hidden_cards(&self) -> bool {
        self.cards.iter().any(|card| !card.is_face_up())
    }

    /// Turns every card face-up.
    pub fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.reveal();
        }
    }

    /// Returns whether the hand is exactly two cards of equal bare value.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].bare_value() == self.cards[1].bare_value()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.is_pair() {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Returns whether the hand has stood.
    #[must_use]
    pub const fn has_stood(&self) -> bool {
        self.stand
    }

    /// Marks the hand as stood.
    pub const fn stand(&mut self) {
        self.stand = true;
    }

    /// Returns whether the hand may double down.
    #[must_use]
    pub const fn can_double(&self) -> bool {
        self.can_double
    }

    /// Sets whether the hand may double down.
    pub const fn set_can_double(&mut self, can_double: bool) {
        self.can_double = can_double;
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Binds a stake to the hand.
    pub const fn set_bet(&mut self, bet: usize) {
        self.bet = bet;
    }

    /// Doubles the bet amount.
    pub const fn double_bet(&mut self) {
        self.bet = self.bet.saturating_mul(2);
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
