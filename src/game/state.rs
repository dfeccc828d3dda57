//! Round state types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use uuid::Uuid;

use crate::card::Card;
use crate::deck::Deck;
use crate::hand::Hand;
use crate::result::HandResult;

/// Identifier of a round.
pub type GameId = Uuid;

/// Round status.
///
/// `PlayerTurn` may move to `DealerTurn` or straight to a terminal status;
/// `DealerTurn` only moves to a terminal status. Terminal statuses are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GameStatus {
    /// Waiting for the player to hit, stand or split.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round over, summarised as a player win.
    PlayerWon,
    /// Round over, summarised as a dealer win.
    DealerWon,
    /// Round over, summarised as neither side winning.
    Push,
}

impl GameStatus {
    /// Returns whether the round is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::PlayerWon | Self::DealerWon | Self::Push)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PlayerTurn => "PlayerTurn",
            Self::DealerTurn => "DealerTurn",
            Self::PlayerWon => "PlayerWon",
            Self::DealerWon => "DealerWon",
            Self::Push => "Push",
        };
        f.write_str(label)
    }
}

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Action {
    /// Draw a card to the active hand.
    Hit,
    /// Lock in the active hand.
    Stand,
    /// Split a pair into two hands.
    Split,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Split => "split",
        };
        f.write_str(label)
    }
}

/// One round of play.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameState {
    pub(super) id: GameId,
    pub(super) player_id: String,
    pub(super) bet: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(super) deck: Deck,
    pub(super) player_hand: Hand,
    pub(super) split_hand: Option<Hand>,
    pub(super) dealer_hand: Hand,
    pub(super) current_hand_index: usize,
    pub(super) status: GameStatus,
    pub(super) payout: usize,
    pub(super) results: Vec<HandResult>,
}

impl GameState {
    pub(super) fn new(id: GameId, player_id: String, bet: usize, deck: Deck) -> Self {
        Self {
            id,
            player_id,
            bet,
            deck,
            player_hand: Hand::new(),
            split_hand: None,
            dealer_hand: Hand::new(),
            current_hand_index: 0,
            status: GameStatus::PlayerTurn,
            payout: 0,
            results: Vec::new(),
        }
    }

    /// Returns the round id.
    #[must_use]
    pub const fn id(&self) -> GameId {
        self.id
    }

    /// Returns the id of the player in this round.
    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Returns the stake placed on each player hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns the undealt cards.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the primary player hand.
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    /// Returns the split hand, if the round has been split.
    #[must_use]
    pub const fn split_hand(&self) -> Option<&Hand> {
        self.split_hand.as_ref()
    }

    /// Returns the dealer's full hand, hole card included.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// Returns which hand receives the next player action (0 or 1).
    #[must_use]
    pub const fn current_hand_index(&self) -> usize {
        self.current_hand_index
    }

    /// Returns the round status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the amount credited back to the player (0 until resolved).
    #[must_use]
    pub const fn payout(&self) -> usize {
        self.payout
    }

    /// Returns per-hand results, empty until the round resolves.
    #[must_use]
    pub fn results(&self) -> &[HandResult] {
        &self.results
    }

    /// Returns the total stake placed on the round.
    #[must_use]
    pub const fn total_bet(&self) -> usize {
        if self.split_hand.is_some() {
            self.bet * 2
        } else {
            self.bet
        }
    }

    /// Returns whether the round is over.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the player hands in order.
    pub fn player_hands(&self) -> impl Iterator<Item = &Hand> {
        core::iter::once(&self.player_hand).chain(self.split_hand.as_ref())
    }

    /// Returns the dealer's face-up card.
    #[must_use]
    pub fn dealer_up_card(&self) -> Option<&Card> {
        self.dealer_hand.cards().first()
    }

    /// Returns the dealer cards a player may see: only the up card while the
    /// round is in progress, all cards once it is over.
    #[must_use]
    pub fn dealer_visible_cards(&self) -> &[Card] {
        let cards = self.dealer_hand.cards();
        if self.is_finished() {
            cards
        } else {
            &cards[..cards.len().min(1)]
        }
    }

    /// Returns the dealer score once the round is over.
    #[must_use]
    pub const fn dealer_visible_score(&self) -> Option<u16> {
        if self.is_finished() {
            Some(self.dealer_hand.score())
        } else {
            None
        }
    }

    pub(super) fn active_hand_mut(&mut self) -> &mut Hand {
        match (self.current_hand_index, self.split_hand.as_mut()) {
            (1, Some(hand)) => hand,
            _ => &mut self.player_hand,
        }
    }
}
