//! Card types and deck utilities.

use alloc::vec::Vec;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

/// Scoring category of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pip {
    /// A number or court card worth a fixed value.
    Number(u8),
    /// An ace, worth 11 or 1 depending on the running total.
    Ace,
}

impl Pip {
    /// Folds this card into a running total and returns the new total.
    ///
    /// An ace counts as 11 when that keeps the running total at or below 21,
    /// otherwise as 1. The rule is applied against the total accumulated so
    /// far, so an ace folded in early may count as 11 even if later cards
    /// push the hand over 21.
    ///
    /// # Example
    ///
    /// ```
    /// use bjmatch::Pip;
    ///
    /// assert_eq!(Pip::Ace.add_score(10), 21);
    /// assert_eq!(Pip::Ace.add_score(15), 16);
    /// assert_eq!(Pip::Number(7).add_score(15), 22);
    /// ```
    #[must_use]
    pub const fn add_score(self, running_total: u8) -> u8 {
        match self {
            Self::Number(value) => running_total.saturating_add(value),
            Self::Ace => {
                if running_total <= 10 {
                    running_total + 11
                } else {
                    running_total.saturating_add(1)
                }
            }
        }
    }

    /// Returns the value the card contributes to an empty hand.
    #[must_use]
    pub const fn bare_value(self) -> u8 {
        self.add_score(0)
    }
}

/// A playing card together with its face state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
    face_up: bool,
}

impl Card {
    /// Creates a new face-down card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are scored as number cards worth their rank.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    /// Returns the scoring category of the card.
    #[must_use]
    pub const fn pip(&self) -> Pip {
        match self.rank {
            1 => Pip::Ace,
            11..=13 => Pip::Number(10),
            rank => Pip::Number(rank),
        }
    }

    /// Folds this card into a running total, ignoring its face state.
    #[must_use]
    pub const fn score_contribution(&self, running_total: u8) -> u8 {
        self.pip().add_score(running_total)
    }

    /// Returns the value the card contributes to an empty hand.
    #[must_use]
    pub const fn bare_value(&self) -> u8 {
        self.pip().bare_value()
    }

    /// Returns whether the card is face-up.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Sets the face state.
    pub const fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    /// Turns the card face-up.
    pub const fn reveal(&mut self) {
        self.face_up = true;
    }

    /// Turns the card face-down.
    pub const fn hide(&mut self) {
        self.face_up = false;
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Builds `decks` standard 52-card decks, every card face-down.
#[must_use]
pub fn standard_cards(decks: u8) -> Vec<Card> {
    let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

    for _ in 0..decks {
        for suit in Suit::ALL {
            for rank in 1..=13 {
                cards.push(Card::new(suit, rank));
            }
        }
    }

    cards
}
