//! Betting gateway interface and an in-memory bankroll.

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::BetError;
use crate::hand::{Hand, HandId};
use crate::participant::ParticipantId;

/// Authority that reserves stakes for hands.
///
/// The engine asks the gateway before any hand enters play. A declined stake
/// means the hand does not exist: the participant sits the match out, or the
/// split does not happen.
pub trait BettingGateway {
    /// Reserves a stake for `hand` and binds the amount with
    /// [`Hand::set_bet`].
    ///
    /// # Errors
    ///
    /// Returns an error if the stake is declined; the hand must then be left
    /// without a bet.
    fn try_place_bet(
        &mut self,
        participant: ParticipantId,
        hand: &mut Hand,
    ) -> Result<(), BetError>;

    /// Reserves a second stake equal to the hand's current bet and doubles
    /// it with [`Hand::double_bet`].
    ///
    /// # Errors
    ///
    /// Returns an error if the extra stake is declined; the hand's bet must
    /// then be left unchanged.
    fn try_raise_bet(
        &mut self,
        participant: ParticipantId,
        hand: &mut Hand,
    ) -> Result<(), BetError>;

    /// Returns whether `participant` could stake `amount` without reserving
    /// anything.
    fn can_place_bet(&self, participant: ParticipantId, amount: usize) -> bool;

    /// Reports the result of a hand once its match is over.
    fn bet_ended(&mut self, participant: ParticipantId, hand: &Hand, won: bool) {
        let _ = (participant, hand, won);
    }
}

/// A gateway holding per-participant balances in memory.
///
/// Every hand is staked the same configured amount; doubling reserves the
/// hand's bet a second time. A won hand returns everything reserved for it
/// plus winnings of the same amount.
#[derive(Debug, Clone)]
pub struct Bankroll {
    /// Stake placed on every new hand.
    stake: usize,
    /// Available balance per participant.
    balances: HashMap<ParticipantId, usize>,
    /// Stakes reserved per hand and not yet settled.
    reserved: HashMap<HandId, usize>,
}

impl Bankroll {
    /// Creates an empty bankroll staking `stake` per hand.
    #[must_use]
    pub fn new(stake: usize) -> Self {
        Self {
            stake,
            balances: HashMap::new(),
            reserved: HashMap::new(),
        }
    }

    /// Adds funds to a participant's balance, opening an account if needed.
    pub fn fund(&mut self, participant: ParticipantId, amount: usize) {
        let balance = self.balances.entry(participant).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Returns the available balance of a participant.
    #[must_use]
    pub fn balance(&self, participant: ParticipantId) -> Option<usize> {
        self.balances.get(&participant).copied()
    }

    /// Returns the stake placed on every new hand.
    #[must_use]
    pub const fn stake(&self) -> usize {
        self.stake
    }

    /// Sets the stake for hands placed from now on.
    pub const fn set_stake(&mut self, stake: usize) {
        self.stake = stake;
    }

    /// Returns the total of stakes reserved and not yet settled.
    #[must_use]
    pub fn reserved(&self) -> usize {
        self.reserved.values().sum()
    }
}

impl BettingGateway for Bankroll {
    fn try_place_bet(
        &mut self,
        participant: ParticipantId,
        hand: &mut Hand,
    ) -> Result<(), BetError> {
        if self.stake == 0 {
            return Err(BetError::ZeroBet);
        }

        let balance = self
            .balances
            .get_mut(&participant)
            .ok_or(BetError::UnknownParticipant)?;

        if *balance < self.stake {
            return Err(BetError::InsufficientFunds);
        }

        *balance -= self.stake;
        self.reserved.insert(hand.id(), self.stake);
        hand.set_bet(self.stake);

        tracing::debug!(
            participant = participant.0,
            hand = hand.id().0,
            stake = self.stake,
            "stake reserved"
        );

        Ok(())
    }

    fn try_raise_bet(
        &mut self,
        participant: ParticipantId,
        hand: &mut Hand,
    ) -> Result<(), BetError> {
        let extra = hand.bet();
        if extra == 0 {
            return Err(BetError::ZeroBet);
        }

        let balance = self
            .balances
            .get_mut(&participant)
            .ok_or(BetError::UnknownParticipant)?;

        if *balance < extra {
            return Err(BetError::InsufficientFunds);
        }

        *balance -= extra;
        let reserved = self.reserved.entry(hand.id()).or_insert(0);
        *reserved = reserved.saturating_add(extra);
        hand.double_bet();

        tracing::debug!(
            participant = participant.0,
            hand = hand.id().0,
            bet = hand.bet(),
            "stake raised"
        );

        Ok(())
    }

    fn can_place_bet(&self, participant: ParticipantId, amount: usize) -> bool {
        amount > 0
            && self
                .balances
                .get(&participant)
                .is_some_and(|&balance| balance >= amount)
    }

    fn bet_ended(&mut self, participant: ParticipantId, hand: &Hand, won: bool) {
        let Some(stake) = self.reserved.remove(&hand.id()) else {
            return;
        };

        if won {
            self.fund(participant, stake.saturating_mul(2));
        }
    }
}
