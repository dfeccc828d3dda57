//! In-memory stores for live rounds and player balances.
//!
//! Both stores hand out clones rather than references, so the only way to
//! change stored state is through their atomic operations.

mod games;
mod players;

pub use games::GameRepository;
pub use players::PlayerRepository;
