//! Table engine and round orchestration.

extern crate alloc;

use alloc::string::ToString;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};
use uuid::Builder;

use crate::deck::Deck;
use crate::error::{ActionError, BalanceError};
use crate::options::TableOptions;
use crate::player::Player;
use crate::repository::{GameRepository, PlayerRepository};
use crate::sync::Mutex;

mod actions;
mod dealer;
mod round;
pub mod state;

pub use dealer::should_dealer_hit;
pub use state::{Action, GameId, GameState, GameStatus};

/// A blackjack table: the round engine plus the stores it reads and writes.
///
/// Every operation is synchronous and safe to call from many threads at once.
/// Actions on the same round are serialized; actions on different rounds do
/// not wait on each other.
pub struct Table {
    /// Table options.
    options: TableOptions,
    /// Live rounds.
    games: GameRepository,
    /// Player accounts.
    players: PlayerRepository,
    /// Random number generator, seeded once per table.
    rng: Mutex<ChaCha8Rng>,
}

impl Table {
    /// Creates a new table with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Table, TableOptions};
    ///
    /// let table = Table::new(TableOptions::default(), 42);
    /// let player = table.create_player();
    /// assert_eq!(player.balance(), 100);
    /// ```
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        Self::with_rng(options, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a new table seeded from operating system entropy.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[must_use]
    pub fn from_entropy(options: TableOptions) -> Self {
        Self::with_rng(options, ChaCha8Rng::from_os_rng())
    }

    /// Creates a new table drawing from the given generator.
    #[must_use]
    pub fn with_rng(options: TableOptions, rng: ChaCha8Rng) -> Self {
        Self {
            options,
            games: GameRepository::new(),
            players: PlayerRepository::new(),
            rng: Mutex::new(rng),
        }
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the round store.
    #[must_use]
    pub const fn games(&self) -> &GameRepository {
        &self.games
    }

    /// Returns the player store.
    #[must_use]
    pub const fn players(&self) -> &PlayerRepository {
        &self.players
    }

    /// Creates a player with a fresh id and the starting balance.
    pub fn create_player(&self) -> Player {
        let id = self.next_id().to_string();
        let player = Player::new(id, self.options.starting_balance);
        self.players.insert(player.clone());
        info!(player_id = %player.id(), balance = player.balance(), "player created");
        player
    }

    /// Registers a player under a caller-chosen id, replacing any existing
    /// account with that id.
    pub fn register_player(&self, id: &str, balance: usize) -> Player {
        let player = Player::new(id, balance);
        self.players.insert(player.clone());
        info!(player_id = %id, balance, "player registered");
        player
    }

    /// Returns a snapshot of the player.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist.
    pub fn get_player(&self, id: &str) -> Result<Player, BalanceError> {
        self.players
            .get(id)
            .ok_or_else(|| BalanceError::PlayerNotFound {
                player_id: id.to_string(),
            })
    }

    /// Applies a signed change to the player's balance and returns the new
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist or the change would make
    /// the balance negative or overflow it.
    pub fn adjust_balance(&self, id: &str, delta: isize) -> Result<usize, BalanceError> {
        self.players.adjust(id, delta)
    }

    /// Resets the player's balance to the starting balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist.
    pub fn reset_balance(&self, id: &str) -> Result<Player, BalanceError> {
        let player = self
            .players
            .set_balance(id, self.options.starting_balance)?;
        info!(player_id = %id, balance = player.balance(), "balance reset");
        Ok(player)
    }

    /// Returns a snapshot of the round.
    pub fn get_game(&self, id: GameId) -> Option<GameState> {
        self.games.get(id)
    }

    /// Drops every finished round from the store.
    ///
    /// Returns the number of rounds removed.
    pub fn evict_finished(&self) -> usize {
        self.games.retain(|state| !state.is_finished())
    }

    /// Builds and shuffles a deck from the table generator.
    fn shuffled_deck(&self) -> Deck {
        let mut rng = self.rng.lock();
        Deck::shuffled(&mut *rng)
    }

    /// Draws a random version 4 id from the table generator.
    fn next_id(&self) -> GameId {
        let mut bytes = [0u8; 16];
        self.rng.lock().fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Runs an action against a stored round.
    ///
    /// A round whose deck runs dry is removed from the store: there is no
    /// sound way to finish it.
    fn act<T>(
        &self,
        game_id: GameId,
        f: impl FnOnce(&mut GameState) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        let result = self
            .games
            .update(game_id, f)
            .ok_or(ActionError::GameNotFound { game_id })?;

        if let Err(ActionError::EmptyDeck { .. }) = &result {
            self.games.remove(game_id);
            error!(game_id = %game_id, "deck exhausted mid-round, round aborted");
        }

        result
    }
}
