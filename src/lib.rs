//! A turn-based multiplayer blackjack match engine with optional `no_std`
//! support.
//!
//! The crate provides a [`Game`] type that owns the deck, a round-robin turn
//! queue and the win conditions of a match between any number of
//! participants. Participants are driven by a [`Policy`]: an automated
//! [`DealerPolicy`], a [`HumanPolicy`] fed with [`Command`]s, or direct
//! calls through [`ManualPolicy`]. Stakes go through a [`BettingGateway`],
//! and a presentation layer can follow the match through [`GameEvent`]s.
//!
//! # Example
//!
//! ```
//! use bjmatch::{Bankroll, Command, Game, GameOptions, GameState};
//!
//! let mut game = Game::new(GameOptions::default(), 42);
//! let player = game.join_human("player");
//! let dealer = game.join_dealer("dealer");
//!
//! let mut bank = Bankroll::new(10);
//! bank.fund(player, 100);
//! bank.fund(dealer, 100);
//!
//! game.start_match(&mut bank).unwrap();
//! for _ in 0..200 {
//!     if game.state() != GameState::InProgress {
//!         break;
//!     }
//!     game.submit(player, Command::Stand);
//!     game.tick(&mut bank).unwrap();
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod betting;
pub mod card;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod participant;
pub mod policy;
pub mod result;

// Re-export main types
pub use betting::{Bankroll, BettingGateway};
pub use card::{Card, DECK_SIZE, Pip, Suit, standard_cards};
pub use error::{ActionError, BetError, SettleError, StartError};
pub use event::GameEvent;
pub use game::{Game, GameState};
pub use hand::{Hand, HandId};
pub use options::GameOptions;
pub use participant::{Participant, ParticipantId};
pub use policy::{
    Command, CommandInvoker, DealerPolicy, DealerState, HumanPolicy, ManualPolicy, Policy,
};
pub use result::{MatchOutcome, Standing, WinReason};
