//! Error types for table operations.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

use crate::game::{Action, GameId, GameStatus};

/// The deck ran out of cards.
///
/// A single deck always covers one round with at most one split, so reaching
/// this means the round was fed a short deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no cards left in the deck")]
pub struct EmptyDeckError;

/// Errors from player balance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// Player not found.
    #[error("player {player_id} not found")]
    PlayerNotFound {
        /// The unknown player.
        player_id: String,
    },
    /// The adjustment would make the balance negative.
    #[error("player {player_id} has insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The player being debited.
        player_id: String,
        /// Balance at the time of the request.
        balance: usize,
        /// Amount that was requested.
        requested: usize,
    },
    /// The credit would exceed the largest representable balance.
    #[error("crediting {amount} to player {player_id} would overflow a balance of {balance}")]
    Overflow {
        /// The player being credited.
        player_id: String,
        /// Balance at the time of the request.
        balance: usize,
        /// Amount that was credited.
        amount: usize,
    },
}

/// Errors that can occur when starting a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    /// Bet is outside the table limits or too large to pay out.
    #[error("bet of {amount} from player {player_id} is outside the table limits")]
    InvalidBet {
        /// The player placing the bet.
        player_id: String,
        /// The rejected amount.
        amount: usize,
    },
    /// Player not found.
    #[error("player {player_id} not found")]
    PlayerNotFound {
        /// The unknown player.
        player_id: String,
    },
    /// Player cannot cover the bet.
    #[error("player {player_id} cannot cover a bet of {requested} with a balance of {balance}")]
    InsufficientFunds {
        /// The player placing the bet.
        player_id: String,
        /// Balance at the time of the bet.
        balance: usize,
        /// The requested bet.
        requested: usize,
    },
    /// Paying out would overflow the player's balance.
    #[error("paying {amount} to player {player_id} would overflow a balance of {balance}")]
    BalanceOverflow {
        /// The player being paid.
        player_id: String,
        /// Balance at the time of the payout.
        balance: usize,
        /// The payout.
        amount: usize,
    },
    /// The deck could not supply the initial deal.
    #[error("deck ran out during the initial deal for player {player_id}")]
    EmptyDeck {
        /// The player whose round was aborted.
        player_id: String,
    },
}

impl From<BalanceError> for StartError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::PlayerNotFound { player_id } => Self::PlayerNotFound { player_id },
            BalanceError::InsufficientFunds {
                player_id,
                balance,
                requested,
            } => Self::InsufficientFunds {
                player_id,
                balance,
                requested,
            },
            BalanceError::Overflow {
                player_id,
                balance,
                amount,
            } => Self::BalanceOverflow {
                player_id,
                balance,
                amount,
            },
        }
    }
}

/// Why a split was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitRejection {
    /// The round has already been split once.
    #[error("the hand has already been split")]
    AlreadySplit,
    /// The primary hand does not hold exactly two cards.
    #[error("only a two-card hand can be split")]
    NotTwoCards,
    /// The two cards differ in rank.
    #[error("only cards of the same rank can be split")]
    RanksDiffer,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No round with this id.
    #[error("game {game_id} not found")]
    GameNotFound {
        /// The unknown round.
        game_id: GameId,
    },
    /// The round is not waiting for this action.
    #[error("cannot {action} in game {game_id} while it is {status}")]
    InvalidState {
        /// The round.
        game_id: GameId,
        /// The attempted action.
        action: Action,
        /// Status at the time of the attempt.
        status: GameStatus,
    },
    /// Split preconditions are not met.
    #[error("cannot split in game {game_id}: {reason}")]
    InvalidAction {
        /// The round.
        game_id: GameId,
        /// The unmet precondition.
        reason: SplitRejection,
    },
    /// The round's player no longer exists.
    #[error("player {player_id} not found")]
    PlayerNotFound {
        /// The unknown player.
        player_id: String,
    },
    /// Player cannot cover the split stake.
    #[error("player {player_id} cannot cover a split stake of {requested} with a balance of {balance}")]
    InsufficientFunds {
        /// The player.
        player_id: String,
        /// Balance at the time of the split.
        balance: usize,
        /// The second stake.
        requested: usize,
    },
    /// Paying out would overflow the player's balance.
    #[error("paying {amount} to player {player_id} would overflow a balance of {balance}")]
    BalanceOverflow {
        /// The player being paid.
        player_id: String,
        /// Balance at the time of the payout.
        balance: usize,
        /// The payout.
        amount: usize,
    },
    /// The deck ran out mid-round; the round has been aborted.
    #[error("deck ran out in game {game_id}; the round was aborted")]
    EmptyDeck {
        /// The aborted round.
        game_id: GameId,
    },
}

impl From<BalanceError> for ActionError {
    fn from(err: BalanceError) -> Self {
        match err {
            BalanceError::PlayerNotFound { player_id } => Self::PlayerNotFound { player_id },
            BalanceError::InsufficientFunds {
                player_id,
                balance,
                requested,
            } => Self::InsufficientFunds {
                player_id,
                balance,
                requested,
            },
            BalanceError::Overflow {
                player_id,
                balance,
                amount,
            } => Self::BalanceOverflow {
                player_id,
                balance,
                amount,
            },
        }
    }
}
