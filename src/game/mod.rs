//! Match engine and turn scheduling.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::betting::BettingGateway;
use crate::card::Card;
use crate::error::ActionError;
use crate::event::{GameEvent, Listeners};
use crate::hand::HandId;
use crate::options::GameOptions;
use crate::participant::{Participant, ParticipantId};
use crate::policy::{Command, DealerPolicy, HumanPolicy, ManualPolicy, Policy};
use crate::result::MatchOutcome;

mod actions;
mod lifecycle;
pub mod state;
mod turns;

pub use state::GameState;

/// A blackjack match engine that owns the deck, the participants and the
/// turn queue.
///
/// Participants join once and take part in every match started afterwards,
/// as long as the [`BettingGateway`] accepts their opening stake. Only the
/// participant at the head of the turn queue may act; every action is
/// followed by a check of the win conditions.
#[derive(Debug)]
pub struct Game {
    /// Game options.
    options: GameOptions,
    /// Cards left in the deck.
    deck: Vec<Card>,
    /// Random number generator for draws.
    rng: ChaCha8Rng,
    /// Registered participants, indexed by [`ParticipantId`].
    participants: Vec<Participant>,
    /// Participants admitted into the current match, in registration order.
    roster: Vec<ParticipantId>,
    /// Remaining turns of the current round.
    turns: VecDeque<ParticipantId>,
    /// Participant whose turn it is.
    current: Option<ParticipantId>,
    /// Round counter.
    round: u32,
    /// Lifecycle state.
    state: GameState,
    /// Outcome of the last completed match.
    outcome: Option<MatchOutcome>,
    /// Whether the last outcome was reported to a gateway.
    settled: bool,
    /// Next hand identifier to assign.
    next_hand_id: u32,
    /// Event listeners.
    listeners: Listeners,
}

impl Game {
    /// Creates a new game with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjmatch::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 42);
    /// assert_eq!(game.player_count(), 0);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let deck = options.deck();

        Self {
            options,
            deck,
            rng: ChaCha8Rng::seed_from_u64(seed),
            participants: Vec::new(),
            roster: Vec::new(),
            turns: VecDeque::new(),
            current: None,
            round: 0,
            state: GameState::Idle,
            outcome: None,
            settled: false,
            next_hand_id: 0,
            listeners: Listeners::default(),
        }
    }

    /// Registers a participant driven by `policy`.
    ///
    /// Returns the assigned participant ID.
    pub fn join(
        &mut self,
        name: impl Into<String>,
        policy: impl Policy + 'static,
    ) -> ParticipantId {
        let id = ParticipantId(self.participants.len());
        let participant = Participant::new(id, name.into(), Box::new(policy));
        tracing::debug!(
            participant = id.0,
            name = participant.name(),
            policy = participant.policy_name(),
            "participant registered"
        );
        self.participants.push(participant);
        id
    }

    /// Registers a participant controlled by [`Command`]s.
    pub fn join_human(&mut self, name: impl Into<String>) -> ParticipantId {
        self.join(name, HumanPolicy::new())
    }

    /// Registers an automated dealer using the configured delay.
    pub fn join_dealer(&mut self, name: impl Into<String>) -> ParticipantId {
        let delay = self.options.dealer_delay;
        self.join(name, DealerPolicy::new(delay))
    }

    /// Registers a participant that only acts through direct calls.
    pub fn join_manual(&mut self, name: impl Into<String>) -> ParticipantId {
        self.join(name, ManualPolicy)
    }

    /// Subscribes a listener to every [`GameEvent`].
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the game options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the round counter of the current or last match.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Returns the participant whose turn it is.
    ///
    /// Returns `None` when no match is running.
    #[must_use]
    pub const fn current_participant(&self) -> Option<ParticipantId> {
        self.current
    }

    /// Returns the outcome of the last completed match.
    #[must_use]
    pub const fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    /// Returns a participant.
    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.0)
    }

    /// Returns all registered participants in registration order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns the participants admitted into the current or last match.
    #[must_use]
    pub fn roster(&self) -> &[ParticipantId] {
        &self.roster
    }

    /// Returns the number of registered participants.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.participants.len()
    }

    /// Returns whether the participant takes part in the running match.
    #[must_use]
    pub fn is_in_game(&self, id: ParticipantId) -> bool {
        self.state == GameState::InProgress
            && self.participant(id).is_some_and(Participant::in_game)
    }

    /// Returns the number of cards remaining in the deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Removes a uniformly random card from the deck.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DeckExhausted`] if the deck is empty.
    pub fn draw_card(&mut self) -> Result<Card, ActionError> {
        if self.deck.is_empty() {
            tracing::error!(round = self.round, "deck exhausted");
            return Err(ActionError::DeckExhausted);
        }

        let index = self.rng.random_range(0..self.deck.len());
        Ok(self.deck.remove(index))
    }

    /// Removes the first remaining card whose bare value equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DeckExhausted`] if the deck is empty, or
    /// [`ActionError::NoMatchingCard`] if no remaining card has that value.
    pub fn draw_card_with_value(&mut self, value: u8) -> Result<Card, ActionError> {
        if self.deck.is_empty() {
            tracing::error!(round = self.round, "deck exhausted");
            return Err(ActionError::DeckExhausted);
        }

        let index = self
            .deck
            .iter()
            .position(|card| card.bare_value() == value)
            .ok_or(ActionError::NoMatchingCard)?;
        Ok(self.deck.remove(index))
    }

    /// Queues a command for a participant's policy.
    ///
    /// Returns `false` if the participant does not exist or its policy does
    /// not take commands.
    pub fn submit(&mut self, id: ParticipantId, command: Command) -> bool {
        self.participants
            .get_mut(id.0)
            .and_then(|participant| participant.policy.as_mut())
            .is_some_and(|policy| policy.submit(command))
    }

    /// Gives every participant's policy one decision point, in registration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ActionError`] raised by a policy. Illegal actions
    /// are absorbed by the policies.
    pub fn tick(&mut self, gateway: &mut dyn BettingGateway) -> Result<(), ActionError> {
        for index in 0..self.participants.len() {
            let id = ParticipantId(index);
            let Some(mut policy) = self.participants[index].policy.take() else {
                continue;
            };

            let was_running = self.state == GameState::InProgress;
            let result = policy.tick(id, self, gateway);

            // The policy was detached while the match finished.
            if was_running && self.state != GameState::InProgress {
                policy.on_match_complete();
            }
            self.participants[index].policy = Some(policy);

            result?;
        }

        Ok(())
    }

    pub(crate) fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(id.0)
    }

    pub(crate) const fn next_hand_id(&mut self) -> HandId {
        let id = HandId(self.next_hand_id);
        self.next_hand_id += 1;
        id
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.listeners.emit(&event);
    }
}
