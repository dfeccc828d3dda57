//! Table configuration options.

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::TableOptions;
///
/// let options = TableOptions::default()
///     .with_min_bet(5)
///     .with_max_bet(Some(500))
///     .with_starting_balance(1_000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Smallest accepted bet. A bet of 0 is always rejected.
    pub min_bet: usize,
    /// Largest accepted bet, or `None` for no cap.
    pub max_bet: Option<usize>,
    /// Balance given to newly created players and on reset.
    pub starting_balance: usize,
    /// Whether an unknown player is created with the starting balance when
    /// they start a round.
    pub auto_register_players: bool,
    /// Whether a player with a zero balance is topped back up to the starting
    /// balance when they start a round.
    pub refill_when_broke: bool,
    /// Winnings ratio for a natural blackjack, on top of the returned stake.
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            min_bet: 1,
            max_bet: None,
            starting_balance: 100,
            auto_register_players: false,
            refill_when_broke: false,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
        }
    }
}

impl TableOptions {
    /// Sets the minimum bet.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_min_bet(10);
    /// assert_eq!(options.min_bet, 10);
    /// ```
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: usize) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the maximum bet.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_max_bet(Some(50));
    /// assert_eq!(options.max_bet, Some(50));
    /// ```
    #[must_use]
    pub const fn with_max_bet(mut self, max_bet: Option<usize>) -> Self {
        self.max_bet = max_bet;
        self
    }

    /// Sets the starting balance.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_starting_balance(250);
    /// assert_eq!(options.starting_balance, 250);
    /// ```
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: usize) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets whether unknown players are registered on their first round.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_auto_register_players(true);
    /// assert!(options.auto_register_players);
    /// ```
    #[must_use]
    pub const fn with_auto_register_players(mut self, enabled: bool) -> Self {
        self.auto_register_players = enabled;
        self
    }

    /// Sets whether broke players are refilled on their next round.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_refill_when_broke(true);
    /// assert!(options.refill_when_broke);
    /// ```
    #[must_use]
    pub const fn with_refill_when_broke(mut self, enabled: bool) -> Self {
        self.refill_when_broke = enabled;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{RoundingMode, TableOptions};
    ///
    /// let options = TableOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Returns whether `amount` is an acceptable bet at this table.
    #[must_use]
    pub fn accepts_bet(&self, amount: usize) -> bool {
        amount > 0 && amount >= self.min_bet && self.max_bet.is_none_or(|max| amount <= max)
    }
}
