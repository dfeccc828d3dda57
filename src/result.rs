//! Per-hand results recorded when a round resolves.

/// Result of a single hand after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural blackjack against a dealer without one.
    Blackjack,
}

impl HandOutcome {
    /// Returns whether the player came out ahead on this hand.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HandResult {
    /// 0 for the primary hand, 1 for the split hand.
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The stake backing this hand.
    pub bet: usize,
    /// The amount credited back for this hand.
    pub payout: usize,
    /// The player's hand value.
    pub player_value: u16,
    /// The dealer's hand value.
    pub dealer_value: u16,
}
