use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// One tower per user, keyed by the platform account id.
///
/// The record is created lazily on a user's first qualifying event and only
/// ever rewritten by an explicit reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerProfile {
    pub user_id: u64,
    /// Banked XP toward the next level. After any mutation this is strictly
    /// below the current level's requirement.
    pub xp: i64,
    pub level: i64,
    /// Tower height in feet.
    pub height: i64,
    pub wins: i64,
    pub losses: i64,
    /// Unix seconds when this profile last increased to its current height.
    /// Earlier arrival ranks higher on height ties; decreases leave it alone.
    pub height_reached_at: i64,
}

impl TowerProfile {
    /// A fresh tower at starting values.
    pub fn new(user_id: u64, config: &GameConfig, now: i64) -> Self {
        Self {
            user_id,
            xp: 0,
            level: 1,
            height: config.base_height,
            wins: 0,
            losses: 0,
            height_reached_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TowerProfile;
    use crate::config::GameConfig;

    #[test]
    fn fresh_towers_start_at_base_values() {
        let config = GameConfig::default();
        let profile = TowerProfile::new(42, &config, 1_700_000_000);

        assert_eq!(profile.user_id, 42);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.height, config.base_height);
        assert_eq!(profile.wins, 0);
        assert_eq!(profile.losses, 0);
        assert_eq!(profile.height_reached_at, 1_700_000_000);
    }
}
