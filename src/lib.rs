//! A single-deck blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`Table`] type that runs rounds for any number of
//! players concurrently: dealing, hits, stands, a single split, automatic
//! dealer play, and payout. Live rounds and player balances are held in
//! concurrency-safe in-memory stores.
//!
//! # Example
//!
//! ```
//! use bjtable::{GameStatus, Table, TableOptions};
//!
//! let table = Table::new(TableOptions::default(), 42);
//! let player = table.create_player();
//!
//! let round = table.start_round(player.id(), 10).unwrap();
//! let round = if round.status() == GameStatus::PlayerTurn {
//!     table.stand(round.id()).unwrap()
//! } else {
//!     round
//! };
//! assert!(round.is_finished());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod player;
pub mod repository;
pub mod result;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use deck::Deck;
pub use error::{ActionError, BalanceError, EmptyDeckError, SplitRejection, StartError};
pub use game::{Action, GameId, GameState, GameStatus, Table, should_dealer_hit};
pub use hand::{Hand, is_bust, score};
pub use options::{RoundingMode, TableOptions};
pub use player::Player;
pub use repository::{GameRepository, PlayerRepository};
pub use result::{HandOutcome, HandResult};
