/// Game-balance constants.
///
/// The defaults are the rule set the bot ships with; `babel-bot` may
/// override individual values from the environment at startup. Values are
/// fixed for the life of the process; changing them mid-game would skew
/// standings that were earned under the old rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// XP granted per non-bot message.
    pub xp_per_message: i64,
    /// XP granted per reaction added.
    pub xp_per_reaction: i64,
    /// XP needed to leave level 1.
    pub base_xp: i64,
    /// Additional XP needed for each subsequent level.
    pub xp_increment: i64,
    /// Ceiling on the per-level XP requirement.
    pub xp_cap: i64,
    /// Height every new tower starts at, and the floor no duel loss can breach.
    pub base_height: i64,
    /// Height gained per level-up.
    pub height_per_level: i64,
    /// Duel outcome weights: challenger wins / defender wins / the tower wins.
    pub duel_weights: (u32, u32, u32),
    /// Fraction of the loser's height moved by a duel.
    pub duel_transfer_rate: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            xp_per_message: 5,
            xp_per_reaction: 2,
            base_xp: 50,
            xp_increment: 50,
            xp_cap: 500,
            base_height: 5,
            height_per_level: 3,
            duel_weights: (30, 30, 40),
            duel_transfer_rate: 0.10,
        }
    }
}
