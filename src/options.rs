//! Game configuration options.

use alloc::vec::Vec;

use crate::card::{Card, standard_cards};

/// Configuration options for a blackjack match.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjmatch::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(2)
///     .with_dealer_delay(3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of standard decks in the match deck.
    pub decks: u8,
    /// Ticks the dealer waits before each action.
    pub dealer_delay: u32,
    /// Explicit card set used instead of standard decks.
    pub cards: Option<Vec<Card>>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            dealer_delay: 1,
            cards: None,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjmatch::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets how many ticks the dealer waits before acting.
    ///
    /// A delay of 0 makes the dealer act on the tick it sees its turn.
    ///
    /// # Example
    ///
    /// ```
    /// use bjmatch::GameOptions;
    ///
    /// let options = GameOptions::default().with_dealer_delay(0);
    /// assert_eq!(options.dealer_delay, 0);
    /// ```
    #[must_use]
    pub const fn with_dealer_delay(mut self, ticks: u32) -> Self {
        self.dealer_delay = ticks;
        self
    }

    /// Replaces the standard decks with an explicit card set.
    ///
    /// # Example
    ///
    /// ```
    /// use bjmatch::{Card, GameOptions, Suit};
    ///
    /// let options = GameOptions::default().with_cards(vec![Card::new(Suit::Hearts, 1)]);
    /// assert_eq!(options.deck().len(), 1);
    /// ```
    #[must_use]
    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = Some(cards);
        self
    }

    /// Returns the configured card set, every card face-down.
    #[must_use]
    pub fn deck(&self) -> Vec<Card> {
        self.cards.as_ref().map_or_else(
            || standard_cards(self.decks),
            |cards| {
                cards
                    .iter()
                    .map(|card| Card::new(card.suit, card.rank))
                    .collect()
            },
        )
    }
}
