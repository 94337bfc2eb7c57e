//! CLI blackjack: one human against an automated dealer.
//!
//! Set `RUST_LOG=bjmatch=debug` to follow the engine.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjmatch::{
    Bankroll, Card, Command, Game, GameEvent, GameOptions, GameState, Hand, ParticipantId, Suit,
};
use tracing_subscriber::EnvFilter;

const TICK_LIMIT: usize = 10_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = Game::new(GameOptions::default().with_dealer_delay(0), seed);

    let player = game.join_human("you");
    let dealer = game.join_dealer("dealer");
    game.subscribe(move |event| announce(event, player));

    let mut bank = Bankroll::new(10);
    bank.fund(player, 100);
    bank.fund(dealer, 1_000);

    loop {
        let money = bank.balance(player).unwrap_or(0);
        println!("\nBalance: {money} (stake {})", bank.stake());

        if let Err(err) = game.start_match(&mut bank) {
            println!("Cannot start: {err}");
            break;
        }
        if !game.is_in_game(player) {
            println!("You are out of money. Game over.");
            break;
        }

        if !play_match(&mut game, &mut bank, player, dealer) {
            println!("Goodbye.");
            return;
        }

        print_table(&game, player, dealer);
        match game.settle(&mut bank) {
            Ok(outcome) => match outcome.winner {
                Some(winner) if winner == player => println!("You win ({:?}).", outcome.reason),
                Some(_) => println!("Dealer wins ({:?}).", outcome.reason),
                None => println!("Nobody wins."),
            },
            Err(err) => println!("Settle error: {err}"),
        }

        if prompt_line("Play again? (y/n): ") != "y" {
            break;
        }
    }
}

/// Ticks the game until the match ends. Returns `false` if the user quits.
fn play_match(
    game: &mut Game,
    bank: &mut Bankroll,
    player: ParticipantId,
    dealer: ParticipantId,
) -> bool {
    for _ in 0..TICK_LIMIT {
        if game.state() != GameState::InProgress {
            return true;
        }

        if awaits_command(game, player) {
            print_table(game, player, dealer);
            let command = match prompt_line("[h]it [s]tand [d]ouble s[p]lit: ").as_str() {
                "h" | "hit" => Command::Hit,
                "s" | "stand" => Command::Stand,
                "d" | "double" => Command::Double,
                "p" | "split" => Command::Split,
                "q" | "quit" => return false,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };
            game.submit(player, command);
        }

        if let Err(err) = game.tick(bank) {
            println!("Engine error: {err}");
            return true;
        }
    }

    true
}

fn awaits_command(game: &Game, player: ParticipantId) -> bool {
    game.is_current_turn(player)
        && game
            .participant(player)
            .and_then(|participant| participant.active_hand())
            .is_some_and(|hand| hand.len() >= 2 && !hand.has_stood())
}

fn announce(event: &GameEvent, player: ParticipantId) {
    match event {
        GameEvent::CardTaken {
            participant, card, ..
        } => {
            let who = if *participant == player { "You" } else { "Dealer" };
            println!("{who} took {}", format_card(card));
        }
        GameEvent::HandSplit { .. } => println!("Hand split."),
        GameEvent::BetDoubled { bet, .. } => println!("Bet doubled to {bet}."),
        _ => {}
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn print_table(game: &Game, player: ParticipantId, dealer: ParticipantId) {
    println!("\nDeck: {} cards remaining", game.cards_remaining());

    if let Some(dealer) = game.participant(dealer) {
        for hand in dealer.hands() {
            println!("Dealer: {} (value {})", format_hand(hand), hand.score());
        }
    }

    if let Some(participant) = game.participant(player) {
        for (index, hand) in participant.hands().iter().enumerate() {
            let marker = if index == participant.active_hand_index() {
                "*"
            } else {
                " "
            };
            println!(
                "{marker} Hand {index}: {} | value {} | bet {}{}",
                format_hand(hand),
                hand.score(),
                hand.bet(),
                if hand.has_stood() { " | stood" } else { "" }
            );
        }
    }
    println!();
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    if !card.is_face_up() {
        return colorize("??", "90");
    }

    let (suit, color_code) = match card.suit {
        Suit::Hearts => ("H", "31"),
        Suit::Diamonds => ("D", "31"),
        Suit::Clubs => ("C", "32"),
        Suit::Spades => ("S", "34"),
    };

    let rank = match card.rank {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        _ => card.rank.to_string(),
    };

    colorize(&format!("{rank}{suit}"), color_code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
