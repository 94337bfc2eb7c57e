//! Match participants.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::hand::Hand;
use crate::policy::Policy;

/// Identifier of a participant, assigned in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub usize);

/// A party in the match owning one or more hands.
///
/// The per-variant decision logic (human commands, dealer timing) lives in
/// the participant's [`Policy`]; hands and turn state are shared by every
/// variant.
pub struct Participant {
    id: ParticipantId,
    name: String,
    hands: Vec<Hand>,
    active_hand: usize,
    in_game: bool,
    pub(crate) policy: Option<Box<dyn Policy>>,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId, name: String, policy: Box<dyn Policy>) -> Self {
        Self {
            id,
            name,
            hands: Vec::new(),
            active_hand: 0,
            in_game: false,
            policy: Some(policy),
        }
    }

    /// Returns the participant identifier.
    #[must_use]
    pub const fn id(&self) -> ParticipantId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the participant takes part in the running match.
    #[must_use]
    pub const fn in_game(&self) -> bool {
        self.in_game
    }

    /// Returns all hands.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the hand at `index`.
    #[must_use]
    pub fn hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }

    /// Returns the number of hands.
    #[must_use]
    pub fn total_hands(&self) -> usize {
        self.hands.len()
    }

    /// Returns the index of the hand receiving actions.
    #[must_use]
    pub const fn active_hand_index(&self) -> usize {
        self.active_hand
    }

    /// Returns the hand receiving actions.
    #[must_use]
    pub fn active_hand(&self) -> Option<&Hand> {
        self.hands.get(self.active_hand)
    }

    /// Returns the score of the active hand, or 0 without one.
    #[must_use]
    pub fn score(&self) -> u8 {
        self.active_hand().map_or(0, Hand::score)
    }

    /// Returns whether every hand has stood.
    #[must_use]
    pub fn has_stood(&self) -> bool {
        self.hands.iter().all(Hand::has_stood)
    }

    /// Returns the name of the policy driving this participant.
    #[must_use]
    pub fn policy_name(&self) -> Option<&'static str> {
        self.policy.as_ref().map(|policy| policy.name())
    }

    pub(crate) fn active_hand_mut(&mut self) -> Option<&mut Hand> {
        self.hands.get_mut(self.active_hand)
    }

    pub(crate) fn hand_mut(&mut self, index: usize) -> Option<&mut Hand> {
        self.hands.get_mut(index)
    }

    pub(crate) fn push_hand(&mut self, hand: Hand) -> usize {
        self.hands.push(hand);
        self.hands.len() - 1
    }

    pub(crate) const fn set_active_hand(&mut self, index: usize) {
        self.active_hand = index;
    }

    /// Replaces every hand with the opening hand of a new match.
    pub(crate) fn admit(&mut self, hand: Hand) {
        self.hands.clear();
        self.hands.push(hand);
        self.active_hand = 0;
        self.in_game = true;
    }

    /// Drops every hand; used when the opening stake is declined.
    pub(crate) fn exclude(&mut self) {
        self.hands.clear();
        self.active_hand = 0;
        self.in_game = false;
    }

    pub(crate) const fn leave_match(&mut self) {
        self.in_game = false;
    }

    /// Moves the active index to the next hand that has not stood.
    ///
    /// Later hands are searched first, then earlier ones. When every hand has
    /// stood the index is clamped to the last hand.
    pub(crate) fn advance_active_hand(&mut self) {
        let count = self.hands.len();
        if count == 0 {
            self.active_hand = 0;
            return;
        }

        let next = (1..=count)
            .map(|offset| (self.active_hand + offset) % count)
            .find(|&index| !self.hands[index].has_stood());

        self.active_hand = next.unwrap_or(count - 1);
    }
}

impl fmt::Debug for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hands", &self.hands)
            .field("active_hand", &self.active_hand)
            .field("in_game", &self.in_game)
            .field("policy", &self.policy_name())
            .finish()
    }
}
