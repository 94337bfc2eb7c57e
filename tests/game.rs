//! Match engine tests driven through direct action calls.

extern crate alloc;

use alloc::rc::Rc;
use core::cell::RefCell;

use bjmatch::{
    ActionError, Bankroll, BetError, Card, Game, GameEvent, GameOptions, GameState, ParticipantId,
    SettleError, StartError, Suit, WinReason,
};

fn cards(ranks: &[u8]) -> Vec<Card> {
    ranks
        .iter()
        .zip(Suit::ALL.iter().cycle())
        .map(|(&rank, &suit)| Card::new(suit, rank))
        .collect()
}

fn table(options: GameOptions, players: usize) -> (Game, Bankroll, Vec<ParticipantId>) {
    let mut game = Game::new(options, 7);
    let mut bank = Bankroll::new(10);
    let ids: Vec<_> = (0..players)
        .map(|i| {
            let id = game.join_manual(format!("p{i}"));
            bank.fund(id, 100);
            id
        })
        .collect();

    game.start_match(&mut bank).unwrap();
    (game, bank, ids)
}

fn pair() -> (Game, Bankroll, ParticipantId, ParticipantId) {
    let (game, bank, ids) = table(GameOptions::default(), 2);
    (game, bank, ids[0], ids[1])
}

fn score(game: &Game, id: ParticipantId) -> u8 {
    game.participant(id).unwrap().score()
}

#[test]
fn start_match_admits_funded_participants() {
    let mut game = Game::new(GameOptions::default(), 1);
    let p1 = game.join_manual("p1");
    let p2 = game.join_manual("p2");
    let p3 = game.join_manual("p3");

    let mut bank = Bankroll::new(10);
    bank.fund(p1, 100);
    bank.fund(p3, 100);

    game.start_match(&mut bank).unwrap();

    assert_eq!(game.state(), GameState::InProgress);
    assert_eq!(game.roster(), &[p1, p3]);
    assert_eq!(game.current_participant(), Some(p1));
    assert_eq!(game.round(), 0);

    assert!(game.is_in_game(p1));
    assert!(!game.is_in_game(p2));
    assert_eq!(game.participant(p2).unwrap().total_hands(), 0);

    let hand = game.participant(p1).unwrap().active_hand().unwrap();
    assert_eq!(hand.bet(), 10);
    assert!(hand.is_empty());
    assert_eq!(bank.balance(p1), Some(90));
    assert_eq!(bank.reserved(), 20);
}

#[test]
fn start_match_without_any_bet_fails() {
    let mut game = Game::new(GameOptions::default(), 1);
    game.join_manual("p1");
    let mut bank = Bankroll::new(10);

    assert_eq!(game.start_match(&mut bank), Err(StartError::NoBets));
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.current_participant(), None);
}

#[test]
fn start_match_rejects_running_match() {
    let (mut game, mut bank, _, _) = pair();
    assert_eq!(game.start_match(&mut bank), Err(StartError::InProgress));
}

#[test]
fn turns_rotate_in_registration_order() {
    let (mut game, _, ids) = table(GameOptions::default(), 3);

    let mut order = Vec::new();
    for _ in 0..6 {
        let current = game.current_participant().unwrap();
        order.push((current, game.round()));
        game.end_turn(current);
    }

    assert_eq!(
        order,
        vec![
            (ids[0], 0),
            (ids[1], 0),
            (ids[2], 0),
            (ids[0], 1),
            (ids[1], 1),
            (ids[2], 1),
        ]
    );
}

#[test]
fn end_turn_out_of_turn_does_nothing() {
    let (mut game, _, p1, p2) = pair();
    game.end_turn(p2);
    assert_eq!(game.current_participant(), Some(p1));
}

#[test]
fn actions_require_the_turn() {
    let (mut game, mut bank, _, p2) = pair();
    let remaining = game.cards_remaining();

    assert_eq!(game.take_card(p2, false), Err(ActionError::NotYourTurn));
    assert_eq!(game.stand(p2), Err(ActionError::NotYourTurn));
    assert_eq!(game.double_down(p2, &mut bank), Err(ActionError::NotYourTurn));
    assert_eq!(game.reveal_hand(p2), Err(ActionError::NotYourTurn));
    assert_eq!(game.split(p2, &mut bank), Err(ActionError::NotYourTurn));
    assert_eq!(game.cards_remaining(), remaining);
}

#[test]
fn face_down_card_does_not_score() {
    let (mut game, _, p1, _) = pair();
    let events = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);
    game.subscribe(move |event| log.borrow_mut().push(event.clone()));

    let card = game.take_card_with_value(p1, true, 10).unwrap();
    assert!(!card.is_face_up());
    assert_eq!(score(&game, p1), 0);

    events.borrow_mut().clear();
    game.reveal_hand(p1).unwrap();
    assert_eq!(score(&game, p1), 10);
    assert_eq!(
        *events.borrow(),
        vec![GameEvent::CardsUpdated { participant: p1 }]
    );
}

#[test]
fn reveal_requires_a_running_match() {
    let (mut game, _, p1, _) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.take_card_with_value(p1, false, 11).unwrap();

    assert_eq!(game.reveal_hand(p1), Err(ActionError::NotInMatch));
}

#[test]
fn twenty_one_wins_immediately() {
    let (mut game, _, p1, p2) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.take_card_with_value(p1, false, 11).unwrap();

    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.winner, Some(p1));
    assert_eq!(outcome.reason, WinReason::TwentyOne);
    assert_eq!(outcome.standings.len(), 2);
    assert_eq!(outcome.standings[0].score, 21);

    assert_eq!(game.state(), GameState::Complete);
    assert_eq!(game.current_participant(), None);
    assert!(game.participant(p1).unwrap().has_stood());
    assert_eq!(game.take_card(p2, false), Err(ActionError::NotInMatch));
}

#[test]
fn bust_then_stand_wins_for_opponent() {
    let (mut game, _, p1, p2) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.end_turn(p1);

    game.take_card_with_value(p2, false, 10).unwrap();
    game.take_card_with_value(p2, false, 8).unwrap();
    game.end_turn(p2);

    game.take_card_with_value(p1, false, 5).unwrap();
    game.take_card_with_value(p1, false, 10).unwrap();
    assert_eq!(score(&game, p1), 25);
    assert!(game.participant(p1).unwrap().has_stood());
    assert_eq!(game.state(), GameState::InProgress);
    assert_eq!(game.take_card(p1, false), Err(ActionError::HandStood));

    game.end_turn(p1);
    assert_eq!(game.current_participant(), Some(p2));
    game.stand(p2).unwrap();

    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.winner, Some(p2));
    assert_eq!(outcome.reason, WinReason::OpponentsBusted);
}

#[test]
fn outscoring_standing_opponents_wins() {
    let (mut game, _, p1, p2) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.end_turn(p1);
    game.take_card_with_value(p2, false, 10).unwrap();
    game.end_turn(p2);

    game.take_card_with_value(p1, false, 7).unwrap();
    game.stand(p1).unwrap();
    assert_eq!(game.current_participant(), Some(p2));

    game.take_card_with_value(p2, false, 8).unwrap();

    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.winner, Some(p2));
    assert_eq!(outcome.reason, WinReason::OutscoredStandingOpponents);
    assert_eq!(outcome.rounds, 1);
}

#[test]
fn tie_goes_to_first_registered() {
    let (mut game, _, p1, p2) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.end_turn(p1);
    game.take_card_with_value(p2, false, 10).unwrap();
    game.end_turn(p2);

    game.take_card_with_value(p1, false, 9).unwrap();
    game.stand(p1).unwrap();
    game.take_card_with_value(p2, false, 9).unwrap();
    assert_eq!(game.state(), GameState::InProgress);
    game.stand(p2).unwrap();

    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.winner, Some(p1));
    assert_eq!(outcome.reason, WinReason::HighestScore);
}

#[test]
fn stood_participants_are_skipped() {
    let (mut game, _, ids) = table(GameOptions::default(), 3);

    game.take_card_with_value(ids[0], false, 2).unwrap();
    game.stand(ids[0]).unwrap();
    game.end_turn(ids[1]);
    assert_eq!(game.current_participant(), Some(ids[2]));
    game.end_turn(ids[2]);

    assert_eq!(game.current_participant(), Some(ids[1]));
    assert_eq!(game.round(), 1);
}

#[test]
fn double_down_doubles_the_bet_and_ends_the_turn() {
    let options = GameOptions::default().with_cards(cards(&[5, 5, 5, 5, 5, 5, 6, 6]));
    let (mut game, mut bank, ids) = table(options, 2);
    let (p1, p2) = (ids[0], ids[1]);
    let events = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);
    game.subscribe(move |event| log.borrow_mut().push(event.clone()));

    game.take_card_with_value(p1, false, 5).unwrap();
    game.take_card_with_value(p1, false, 6).unwrap();
    events.borrow_mut().clear();
    let card = game.double_down(p1, &mut bank).unwrap();

    let hand = game.participant(p1).unwrap().hand(0).unwrap();
    assert_eq!(hand.len(), 3);
    assert_eq!(hand.bet(), 20);
    assert!(hand.has_stood());
    assert!(!hand.can_double());
    assert_eq!(game.current_participant(), Some(p2));

    assert_eq!(bank.balance(p1), Some(80));
    assert_eq!(bank.reserved(), 30);
    assert_eq!(
        *events.borrow(),
        vec![
            GameEvent::CardTaken {
                participant: p1,
                hand: 0,
                card,
            },
            GameEvent::BetDoubled {
                participant: p1,
                hand: 0,
                bet: 20,
            },
            GameEvent::TurnStarted {
                participant: p2,
                round: 0,
            },
        ]
    );
}

#[test]
fn declined_double_leaves_the_hand() {
    let mut game = Game::new(GameOptions::default(), 3);
    let p1 = game.join_manual("p1");
    let p2 = game.join_manual("p2");
    let mut bank = Bankroll::new(10);
    bank.fund(p1, 10);
    bank.fund(p2, 100);
    game.start_match(&mut bank).unwrap();

    game.take_card_with_value(p1, false, 5).unwrap();
    game.take_card_with_value(p1, false, 6).unwrap();
    let remaining = game.cards_remaining();

    assert_eq!(
        game.double_down(p1, &mut bank),
        Err(ActionError::BetDeclined(BetError::InsufficientFunds))
    );

    let hand = game.participant(p1).unwrap().active_hand().unwrap();
    assert_eq!(hand.len(), 2);
    assert_eq!(hand.bet(), 10);
    assert!(hand.can_double());
    assert!(!hand.has_stood());
    assert_eq!(game.cards_remaining(), remaining);
    assert_eq!(game.current_participant(), Some(p1));
    assert_eq!(bank.balance(p1), Some(0));
    assert_eq!(bank.reserved(), 20);
}

#[test]
fn doubled_win_pays_the_doubled_stake() {
    let options = GameOptions::default().with_cards(cards(&[5, 5, 1]));
    let (mut game, mut bank, ids) = table(options, 2);
    let (p1, p2) = (ids[0], ids[1]);

    game.take_card_with_value(p1, false, 5).unwrap();
    game.take_card_with_value(p1, false, 5).unwrap();
    game.double_down(p1, &mut bank).unwrap();
    assert_eq!(bank.balance(p1), Some(80));

    let outcome = game.settle(&mut bank).unwrap();
    assert_eq!(outcome.winner, Some(p1));
    assert_eq!(outcome.reason, WinReason::TwentyOne);
    assert_eq!(bank.balance(p1), Some(120));
    assert_eq!(bank.balance(p2), Some(90));
    assert_eq!(bank.reserved(), 0);
}

#[test]
fn doubled_loss_costs_the_doubled_stake() {
    let options = GameOptions::default().with_cards(cards(&[2, 3, 10, 10, 1, 1]));
    let (mut game, mut bank, ids) = table(options, 2);
    let (p1, p2) = (ids[0], ids[1]);

    game.take_card_with_value(p1, false, 2).unwrap();
    game.take_card_with_value(p1, false, 3).unwrap();
    game.double_down(p1, &mut bank).unwrap();
    assert_eq!(game.current_participant(), Some(p2));

    game.take_card_with_value(p2, false, 10).unwrap();
    game.take_card_with_value(p2, false, 11).unwrap();

    let outcome = game.settle(&mut bank).unwrap();
    assert_eq!(outcome.winner, Some(p2));
    assert_eq!(bank.balance(p1), Some(80));
    assert_eq!(bank.balance(p2), Some(110));
    assert_eq!(bank.reserved(), 0);
}

#[test]
fn third_card_removes_double_eligibility() {
    let (mut game, mut bank, p1, _) = pair();

    game.take_card_with_value(p1, false, 2).unwrap();
    game.take_card_with_value(p1, false, 3).unwrap();
    assert!(game.participant(p1).unwrap().active_hand().unwrap().can_double());
    game.take_card_with_value(p1, false, 4).unwrap();

    assert_eq!(
        game.double_down(p1, &mut bank),
        Err(ActionError::CannotDouble)
    );
}

#[test]
fn split_moves_the_second_card() {
    let (mut game, mut bank, p1, _) = pair();
    let events = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);
    game.subscribe(move |event| log.borrow_mut().push(event.clone()));

    game.take_card_with_value(p1, false, 8).unwrap();
    game.take_card_with_value(p1, false, 8).unwrap();
    events.borrow_mut().clear();
    let new_hand = game.split(p1, &mut bank).unwrap();

    assert_eq!(new_hand, 1);
    assert_eq!(
        *events.borrow(),
        vec![
            GameEvent::CardsUpdated { participant: p1 },
            GameEvent::HandSplit {
                participant: p1,
                hand: 0,
            },
        ]
    );
    let participant = game.participant(p1).unwrap();
    assert_eq!(participant.total_hands(), 2);
    assert_eq!(participant.active_hand_index(), 0);
    for hand in participant.hands() {
        assert_eq!(hand.len(), 1);
        assert_eq!(hand.bet(), 10);
        assert!(hand.can_double());
    }
    assert_eq!(bank.balance(p1), Some(80));

    game.deal_split_hands(p1, new_hand).unwrap();
    let participant = game.participant(p1).unwrap();
    assert_eq!(participant.hand(0).unwrap().len(), 2);
    assert_eq!(participant.hand(1).unwrap().len(), 2);
    assert_eq!(participant.active_hand_index(), 0);
}

#[test]
fn declined_split_leaves_the_pair() {
    let mut game = Game::new(GameOptions::default(), 3);
    let p1 = game.join_manual("p1");
    let p2 = game.join_manual("p2");
    let mut bank = Bankroll::new(10);
    bank.fund(p1, 10);
    bank.fund(p2, 100);
    game.start_match(&mut bank).unwrap();

    game.take_card_with_value(p1, false, 8).unwrap();
    game.take_card_with_value(p1, false, 8).unwrap();

    assert_eq!(
        game.split(p1, &mut bank),
        Err(ActionError::BetDeclined(BetError::InsufficientFunds))
    );
    let participant = game.participant(p1).unwrap();
    assert_eq!(participant.total_hands(), 1);
    assert_eq!(participant.active_hand().unwrap().len(), 2);
}

#[test]
fn split_requires_a_pair() {
    let (mut game, mut bank, p1, _) = pair();

    game.take_card_with_value(p1, false, 8).unwrap();
    game.take_card_with_value(p1, false, 9).unwrap();

    assert_eq!(game.split(p1, &mut bank), Err(ActionError::CannotSplit));
    assert_eq!(bank.balance(p1), Some(90));
}

#[test]
fn standing_walks_through_split_hands() {
    let (mut game, mut bank, p1, p2) = pair();

    game.take_card_with_value(p1, false, 8).unwrap();
    game.take_card_with_value(p1, false, 8).unwrap();
    let new_hand = game.split(p1, &mut bank).unwrap();
    game.deal_split_hands(p1, new_hand).unwrap();

    game.stand(p1).unwrap();
    assert_eq!(game.current_participant(), Some(p1));
    assert_eq!(game.participant(p1).unwrap().active_hand_index(), 1);

    game.stand(p1).unwrap();
    assert_eq!(game.current_participant(), Some(p2));
}

#[test]
fn exhausted_deck_is_fatal() {
    let options = GameOptions::default().with_cards(cards(&[5]));
    let (mut game, _, ids) = table(options, 2);

    game.take_card(ids[0], false).unwrap();
    let err = game.take_card(ids[0], false).unwrap_err();

    assert_eq!(err, ActionError::DeckExhausted);
    assert!(err.is_fatal());
}

#[test]
fn missing_value_is_not_fatal() {
    let options = GameOptions::default().with_cards(cards(&[5, 5, 5]));
    let (mut game, _, ids) = table(options, 2);

    let err = game.take_card_with_value(ids[0], false, 10).unwrap_err();
    assert_eq!(err, ActionError::NoMatchingCard);
    assert!(!err.is_fatal());
    assert_eq!(game.cards_remaining(), 3);
}

#[test]
fn events_follow_the_match() {
    let mut game = Game::new(GameOptions::default(), 9);
    let p1 = game.join_manual("p1");
    let p2 = game.join_manual("p2");
    let mut bank = Bankroll::new(10);
    bank.fund(p1, 100);
    bank.fund(p2, 100);

    let events = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);
    game.subscribe(move |event| log.borrow_mut().push(event.clone()));

    game.start_match(&mut bank).unwrap();
    assert_eq!(
        *events.borrow(),
        vec![
            GameEvent::ParticipantJoined { participant: p1 },
            GameEvent::ParticipantJoined { participant: p2 },
            GameEvent::MatchStarted,
            GameEvent::TurnStarted {
                participant: p1,
                round: 0,
            },
        ]
    );

    events.borrow_mut().clear();
    let ten = game.take_card_with_value(p1, false, 10).unwrap();
    let ace = game.take_card_with_value(p1, false, 11).unwrap();
    assert_eq!(
        *events.borrow(),
        vec![
            GameEvent::CardTaken {
                participant: p1,
                hand: 0,
                card: ten,
            },
            GameEvent::CardTaken {
                participant: p1,
                hand: 0,
                card: ace,
            },
            GameEvent::MatchWon { participant: p1 },
            GameEvent::MatchEnded { winner: Some(p1) },
        ]
    );
}

#[test]
fn settle_pays_the_winner_once() {
    let (mut game, mut bank, p1, p2) = pair();

    assert_eq!(game.settle(&mut bank), Err(SettleError::InvalidState));

    game.take_card_with_value(p1, false, 10).unwrap();
    game.take_card_with_value(p1, false, 11).unwrap();

    let outcome = game.settle(&mut bank).unwrap();
    assert_eq!(outcome.winner, Some(p1));
    assert_eq!(bank.balance(p1), Some(110));
    assert_eq!(bank.balance(p2), Some(90));
    assert_eq!(bank.reserved(), 0);

    assert_eq!(game.settle(&mut bank), Err(SettleError::AlreadySettled));
}

#[test]
fn a_completed_game_can_start_again() {
    let (mut game, mut bank, p1, p2) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.take_card_with_value(p1, false, 11).unwrap();
    game.settle(&mut bank).unwrap();

    game.start_match(&mut bank).unwrap();
    assert_eq!(game.state(), GameState::InProgress);
    assert_eq!(game.round(), 0);
    assert_eq!(game.current_participant(), Some(p1));
    assert!(game.outcome().is_none());
    assert_eq!(game.cards_remaining(), 52);
    assert!(game.participant(p1).unwrap().active_hand().unwrap().is_empty());
    assert!(game.is_in_game(p2));
}

#[test]
fn restart_waits_for_settlement() {
    let (mut game, mut bank, p1, p2) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.take_card_with_value(p1, false, 11).unwrap();
    let remaining = game.cards_remaining();

    assert_eq!(game.start_match(&mut bank), Err(StartError::Unsettled));
    assert_eq!(game.state(), GameState::Complete);
    assert_eq!(game.cards_remaining(), remaining);
    assert_eq!(game.participant(p1).unwrap().active_hand().unwrap().len(), 2);

    game.settle(&mut bank).unwrap();
    assert_eq!(bank.balance(p1), Some(110));
    assert_eq!(bank.balance(p2), Some(90));
    assert_eq!(bank.reserved(), 0);
}

#[test]
fn failed_start_keeps_the_last_match() {
    let (mut game, mut bank, p1, _) = pair();

    game.take_card_with_value(p1, false, 10).unwrap();
    game.take_card_with_value(p1, false, 11).unwrap();
    game.settle(&mut bank).unwrap();
    let remaining = game.cards_remaining();

    bank.set_stake(1_000);
    assert_eq!(game.start_match(&mut bank), Err(StartError::NoBets));

    assert_eq!(game.state(), GameState::Complete);
    assert_eq!(game.cards_remaining(), remaining);
    assert_eq!(game.participant(p1).unwrap().active_hand().unwrap().len(), 2);
    assert_eq!(game.outcome().unwrap().winner, Some(p1));
    assert_eq!(bank.reserved(), 0);
}

#[test]
fn lone_participant_wins_at_once() {
    let (mut game, _, ids) = table(GameOptions::default(), 1);

    game.take_card_with_value(ids[0], false, 5).unwrap();

    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.winner, Some(ids[0]));
    assert_eq!(outcome.reason, WinReason::OpponentsBusted);
}
