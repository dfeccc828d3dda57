//! Hands and blackjack scoring.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Highest non-bust total.
pub const BLACKJACK: u16 = 21;

fn evaluate_cards(cards: &[Card]) -> (u16, bool) {
    let mut value: u16 = 0;
    let mut aces: usize = 0;

    for card in cards {
        if card.rank.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(u16::from(card.rank.value()));
    }

    // Demote one ace from 11 to 1 at a time
    while value > BLACKJACK && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    (value, aces > 0)
}

/// Scores `cards` under blackjack ace rules.
///
/// Returns the best total not exceeding 21 when one exists, otherwise the
/// smallest bust total. An empty slice scores 0. Totals saturate at
/// `u16::MAX`, which no real card count reaches.
#[must_use]
pub fn score(cards: &[Card]) -> u16 {
    evaluate_cards(cards).0
}

/// Scores `cards` with every ace counted as 1.
#[must_use]
pub fn min_score(cards: &[Card]) -> u16 {
    cards.iter().fold(0, |total: u16, card| {
        let value = if card.rank.is_ace() {
            1
        } else {
            u16::from(card.rank.value())
        };
        total.saturating_add(value)
    })
}

/// Returns whether a score is over 21.
#[must_use]
pub const fn is_bust(score: u16) -> bool {
    score > BLACKJACK
}

/// An ordered set of cards with its score kept current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Score after the last card was added.
    score: u16,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            score: 0,
        }
    }

    /// Creates a hand holding the given cards.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let cards: Vec<Card> = cards.into_iter().collect();
        let score = score(&cards);
        Self { cards, score }
    }

    /// Adds a card and rescores the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.score = score(&self.cards);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> u16 {
        self.score
    }

    /// Returns the score with every ace counted as 1.
    #[must_use]
    pub fn min_score(&self) -> u16 {
        min_score(&self.cards)
    }

    /// Returns whether the hand is soft (an ace is currently counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        is_bust(self.score)
    }

    /// Returns whether the hand is a two-card 21.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.score == BLACKJACK
    }

    /// Returns whether the hand is a pair that may be split.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            let card = self.cards.pop();
            self.score = score(&self.cards);
            card
        } else {
            None
        }
    }
}
