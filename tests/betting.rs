//! In-memory bankroll behaviour.

use bjmatch::{Bankroll, BetError, BettingGateway, Hand, HandId, ParticipantId};

#[test]
fn bet_reserves_the_stake() {
    let player = ParticipantId(0);
    let mut bank = Bankroll::new(25);
    bank.fund(player, 100);

    let mut hand = Hand::new(HandId(1));
    bank.try_place_bet(player, &mut hand).unwrap();

    assert_eq!(hand.bet(), 25);
    assert_eq!(bank.balance(player), Some(75));
    assert_eq!(bank.reserved(), 25);
}

#[test]
fn declined_bets_leave_the_hand_unstaked() {
    let player = ParticipantId(0);
    let stranger = ParticipantId(1);
    let mut bank = Bankroll::new(50);
    bank.fund(player, 40);

    let mut hand = Hand::new(HandId(0));
    assert_eq!(
        bank.try_place_bet(stranger, &mut hand),
        Err(BetError::UnknownParticipant)
    );
    assert_eq!(
        bank.try_place_bet(player, &mut hand),
        Err(BetError::InsufficientFunds)
    );

    bank.set_stake(0);
    assert_eq!(bank.try_place_bet(player, &mut hand), Err(BetError::ZeroBet));

    assert_eq!(hand.bet(), 0);
    assert_eq!(bank.balance(player), Some(40));
    assert_eq!(bank.reserved(), 0);
}

#[test]
fn can_place_bet_does_not_reserve() {
    let player = ParticipantId(0);
    let mut bank = Bankroll::new(10);
    bank.fund(player, 30);

    assert!(bank.can_place_bet(player, 30));
    assert!(!bank.can_place_bet(player, 31));
    assert!(!bank.can_place_bet(player, 0));
    assert!(!bank.can_place_bet(ParticipantId(5), 1));
    assert_eq!(bank.balance(player), Some(30));
}

#[test]
fn won_hand_returns_stake_and_winnings() {
    let player = ParticipantId(0);
    let mut bank = Bankroll::new(10);
    bank.fund(player, 100);

    let mut won = Hand::new(HandId(0));
    let mut lost = Hand::new(HandId(1));
    bank.try_place_bet(player, &mut won).unwrap();
    bank.try_place_bet(player, &mut lost).unwrap();

    bank.bet_ended(player, &won, true);
    bank.bet_ended(player, &lost, false);
    assert_eq!(bank.balance(player), Some(100));
    assert_eq!(bank.reserved(), 0);

    // A settled hand is not paid twice.
    bank.bet_ended(player, &won, true);
    assert_eq!(bank.balance(player), Some(100));
}

#[test]
fn raising_reserves_the_extra_stake() {
    let player = ParticipantId(0);
    let mut bank = Bankroll::new(10);
    bank.fund(player, 100);

    let mut won = Hand::new(HandId(0));
    let mut lost = Hand::new(HandId(1));
    bank.try_place_bet(player, &mut won).unwrap();
    bank.try_place_bet(player, &mut lost).unwrap();
    bank.try_raise_bet(player, &mut won).unwrap();
    bank.try_raise_bet(player, &mut lost).unwrap();

    assert_eq!(won.bet(), 20);
    assert_eq!(bank.balance(player), Some(60));
    assert_eq!(bank.reserved(), 40);

    bank.bet_ended(player, &won, true);
    bank.bet_ended(player, &lost, false);
    assert_eq!(bank.balance(player), Some(100));
    assert_eq!(bank.reserved(), 0);
}

#[test]
fn declined_raise_keeps_the_bet() {
    let player = ParticipantId(0);
    let mut bank = Bankroll::new(10);
    bank.fund(player, 15);

    let mut hand = Hand::new(HandId(0));
    bank.try_place_bet(player, &mut hand).unwrap();
    assert_eq!(
        bank.try_raise_bet(player, &mut hand),
        Err(BetError::InsufficientFunds)
    );
    assert_eq!(hand.bet(), 10);
    assert_eq!(bank.balance(player), Some(5));
    assert_eq!(bank.reserved(), 10);

    let mut unstaked = Hand::new(HandId(1));
    assert_eq!(
        bank.try_raise_bet(player, &mut unstaked),
        Err(BetError::ZeroBet)
    );
}

#[test]
fn funding_saturates() {
    let player = ParticipantId(0);
    let mut bank = Bankroll::new(10);
    bank.fund(player, usize::MAX);
    bank.fund(player, 1);
    assert_eq!(bank.balance(player), Some(usize::MAX));

    let mut hand = Hand::new(HandId(0));
    hand.set_bet(usize::MAX);
    hand.double_bet();
    assert_eq!(hand.bet(), usize::MAX);
}
