extern crate alloc;

use alloc::string::{String, ToString};

use crate::error::BalanceError;
use crate::player::Player;
use crate::sync::{HashMap, Mutex};

/// Keyed store of player accounts.
///
/// Every balance change runs its sufficiency check and its write under one
/// lock acquisition, so concurrent debits can never jointly overdraw an
/// account.
pub struct PlayerRepository {
    players: Mutex<HashMap<String, Player>>,
}

impl PlayerRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a player, returning the account it replaced.
    pub fn insert(&self, player: Player) -> Option<Player> {
        self.players
            .lock()
            .insert(player.id().to_string(), player)
    }

    /// Returns a snapshot of the player.
    pub fn get(&self, id: &str) -> Option<Player> {
        self.players.lock().get(id).cloned()
    }

    /// Returns whether the player exists.
    pub fn contains(&self, id: &str) -> bool {
        self.players.lock().contains_key(id)
    }

    /// Returns the player, creating it with `balance` if it does not exist.
    pub fn get_or_insert(&self, id: &str, balance: usize) -> Player {
        self.players
            .lock()
            .entry(id.to_string())
            .or_insert_with(|| Player::new(id, balance))
            .clone()
    }

    /// Applies a signed balance change and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist, a negative `delta`
    /// exceeds the balance, or a positive `delta` would overflow it. The
    /// balance is unchanged on error.
    pub fn adjust(&self, id: &str, delta: isize) -> Result<usize, BalanceError> {
        if delta < 0 {
            self.debit(id, delta.unsigned_abs())
        } else {
            self.credit(id, delta.unsigned_abs())
        }
    }

    /// Subtracts `amount` from the balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist or cannot cover `amount`.
    pub fn debit(&self, id: &str, amount: usize) -> Result<usize, BalanceError> {
        self.with_player(id, |player| {
            let balance = player
                .balance()
                .checked_sub(amount)
                .ok_or_else(|| BalanceError::InsufficientFunds {
                    player_id: id.to_string(),
                    balance: player.balance(),
                    requested: amount,
                })?;
            player.set_balance(balance);
            Ok(balance)
        })
    }

    /// Adds `amount` to the balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist or the new balance would
    /// overflow. The balance is unchanged on error.
    pub fn credit(&self, id: &str, amount: usize) -> Result<usize, BalanceError> {
        self.with_player(id, |player| {
            let balance =
                player
                    .balance()
                    .checked_add(amount)
                    .ok_or_else(|| BalanceError::Overflow {
                        player_id: id.to_string(),
                        balance: player.balance(),
                        amount,
                    })?;
            player.set_balance(balance);
            Ok(balance)
        })
    }

    /// Overwrites the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist.
    pub fn set_balance(&self, id: &str, balance: usize) -> Result<Player, BalanceError> {
        self.with_player(id, |player| {
            player.set_balance(balance);
            Ok(player.clone())
        })
    }

    /// Sets the balance to `balance` if it is currently zero.
    ///
    /// Returns whether a refill happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist.
    pub fn refill_if_empty(&self, id: &str, balance: usize) -> Result<bool, BalanceError> {
        self.with_player(id, |player| {
            if player.balance() == 0 {
                player.set_balance(balance);
                Ok(true)
            } else {
                Ok(false)
            }
        })
    }

    /// Returns the number of players.
    pub fn len(&self) -> usize {
        self.players.lock().len()
    }

    /// Returns whether there are no players.
    pub fn is_empty(&self) -> bool {
        self.players.lock().is_empty()
    }

    fn with_player<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Player) -> Result<T, BalanceError>,
    ) -> Result<T, BalanceError> {
        let mut players = self.players.lock();
        let player = players
            .get_mut(id)
            .ok_or_else(|| BalanceError::PlayerNotFound {
                player_id: id.to_string(),
            })?;
        f(player)
    }
}

impl Default for PlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}
