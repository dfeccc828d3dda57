extern crate alloc;

use alloc::sync::Arc;

use crate::game::{GameId, GameState};
use crate::sync::{HashMap, Mutex, RwLock};

/// Keyed store of live rounds.
///
/// Each round sits behind its own lock, so updates to one round are
/// linearized while updates to different rounds proceed independently. The
/// outer map lock is only held long enough to find an entry.
pub struct GameRepository {
    games: RwLock<HashMap<GameId, Arc<Mutex<GameState>>>>,
}

impl GameRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Stores a round under its id, replacing any previous round with that id.
    pub fn insert(&self, state: GameState) {
        let id = state.id();
        self.games.write().insert(id, Arc::new(Mutex::new(state)));
    }

    /// Returns a snapshot of the round.
    pub fn get(&self, id: GameId) -> Option<GameState> {
        let entry = self.entry(id)?;
        let state = entry.lock().clone();
        Some(state)
    }

    /// Runs `f` against the round with exclusive access.
    ///
    /// `f` works on a copy; the copy replaces the stored round only when `f`
    /// returns `Ok`, so a failed action leaves the round exactly as it was.
    /// Returns `None` if no round has this id.
    #[expect(
        clippy::significant_drop_tightening,
        reason = "the round lock is held across inspection, mutation and commit"
    )]
    pub fn update<T, E>(
        &self,
        id: GameId,
        f: impl FnOnce(&mut GameState) -> Result<T, E>,
    ) -> Option<Result<T, E>> {
        let entry = self.entry(id)?;
        let mut stored = entry.lock();

        let mut working = stored.clone();
        let result = f(&mut working);
        if result.is_ok() {
            *stored = working;
        }

        Some(result)
    }

    /// Removes a round, returning its last state.
    pub fn remove(&self, id: GameId) -> Option<GameState> {
        let entry = self.games.write().remove(&id)?;
        let state = entry.lock().clone();
        Some(state)
    }

    /// Removes every round for which `keep` returns `false`.
    ///
    /// Returns the number of rounds removed.
    pub fn retain(&self, mut keep: impl FnMut(&GameState) -> bool) -> usize {
        let mut games = self.games.write();
        let before = games.len();
        games.retain(|_, entry| keep(&*entry.lock()));
        before - games.len()
    }

    /// Returns the number of stored rounds.
    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    /// Returns whether no rounds are stored.
    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }

    fn entry(&self, id: GameId) -> Option<Arc<Mutex<GameState>>> {
        self.games.read().get(&id).cloned()
    }
}

impl Default for GameRepository {
    fn default() -> Self {
        Self::new()
    }
}
