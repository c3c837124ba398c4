//! Pure rules for the tower leveling game.
//!
//! Everything in this crate is synchronous, allocation-light, and free of
//! I/O: callers load [`TowerProfile`] records from wherever they keep them,
//! run the rules, and write the results back. Randomness enters only through
//! the `Rng` handed to [`duel::roll_outcome`].

/// Tunable game-balance constants.
pub mod config;
/// Duel eligibility, outcome rolls, and resolution.
pub mod duel;
/// Ranking of all towers into standings.
pub mod leaderboard;
/// The per-user tower record.
pub mod profile;
/// XP thresholds and level-up cascades.
pub mod progression;
/// Flavor titles per level.
pub mod titles;

pub use config::GameConfig;
pub use duel::{DuelOutcome, DuelRejection, DuelReport, SpecialRule};
pub use leaderboard::Standings;
pub use profile::TowerProfile;
pub use progression::{LevelUp, grant_xp, xp_to_next_level};
pub use titles::{Title, title_for_level};
