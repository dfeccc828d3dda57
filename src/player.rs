//! Player accounts.

extern crate alloc;

use alloc::string::String;

/// A player account.
///
/// Values handed out by the table are snapshots; balances only change through
/// the player repository's atomic adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Player {
    id: String,
    balance: usize,
}

impl Player {
    /// Creates a player with the given id and balance.
    #[must_use]
    pub fn new(id: impl Into<String>, balance: usize) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }

    /// Returns the player's id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the player's balance.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    pub(crate) const fn set_balance(&mut self, balance: usize) {
        self.balance = balance;
    }
}
