use crate::config::GameConfig;
use crate::profile::TowerProfile;

/// XP required to advance from `level` to `level + 1`.
pub fn xp_to_next_level(config: &GameConfig, level: i64) -> i64 {
    (config.base_xp + (level - 1).max(0) * config.xp_increment).min(config.xp_cap)
}

/// Result of an XP grant that crossed at least one level threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: i64,
    pub new_height: i64,
    pub levels_gained: i64,
}

/// Add XP to a profile and cascade level-ups while the bank covers the
/// current requirement. One large grant may cross several levels; the
/// final state is the same whether the XP arrives in one call or many.
pub fn grant_xp(
    profile: &mut TowerProfile,
    amount: i64,
    now: i64,
    config: &GameConfig,
) -> Option<LevelUp> {
    profile.xp += amount.max(0);

    let mut levels_gained = 0;
    while profile.xp >= xp_to_next_level(config, profile.level) {
        profile.xp -= xp_to_next_level(config, profile.level);
        profile.level += 1;
        profile.height += config.height_per_level;
        profile.height_reached_at = now;
        levels_gained += 1;
    }

    (levels_gained > 0).then_some(LevelUp {
        new_level: profile.level,
        new_height: profile.height,
        levels_gained,
    })
}

#[cfg(test)]
mod tests {
    use super::{grant_xp, xp_to_next_level};
    use crate::config::GameConfig;
    use crate::profile::TowerProfile;

    const NOW: i64 = 1_700_000_000;

    fn fresh(user_id: u64) -> TowerProfile {
        TowerProfile::new(user_id, &GameConfig::default(), NOW)
    }

    #[test]
    fn requirement_grows_linearly_then_caps() {
        let config = GameConfig::default();

        assert_eq!(xp_to_next_level(&config, 1), 50);
        assert_eq!(xp_to_next_level(&config, 2), 100);
        assert_eq!(xp_to_next_level(&config, 9), 450);
        assert_eq!(xp_to_next_level(&config, 10), 500);
        assert_eq!(xp_to_next_level(&config, 20), 500);
    }

    #[test]
    fn small_grants_bank_without_leveling() {
        let config = GameConfig::default();
        let mut profile = fresh(1);

        for _ in 0..5 {
            assert!(grant_xp(&mut profile, config.xp_per_message, NOW, &config).is_none());
        }

        assert_eq!(profile.xp, 25);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.height, 5);
    }

    #[test]
    fn reaching_the_threshold_levels_up() {
        let config = GameConfig::default();
        let mut profile = fresh(1);

        grant_xp(&mut profile, 25, NOW, &config);
        let level_up = grant_xp(&mut profile, 25, NOW + 10, &config).expect("should level");

        assert_eq!(level_up.new_level, 2);
        assert_eq!(level_up.new_height, 8);
        assert_eq!(level_up.levels_gained, 1);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.height_reached_at, NOW + 10);
    }

    #[test]
    fn one_large_grant_cascades_multiple_levels() {
        let config = GameConfig::default();
        let mut profile = fresh(1);

        let level_up = grant_xp(&mut profile, 1000, NOW, &config).expect("should level");

        // 50 + 100 + 150 + 200 + 250 = 750 consumed; 250 banked, short of 300.
        assert_eq!(level_up.new_level, 6);
        assert_eq!(level_up.levels_gained, 5);
        assert_eq!(profile.xp, 250);
        assert_eq!(profile.height, 5 + 5 * 3);
    }

    #[test]
    fn cascade_is_independent_of_batching() {
        let config = GameConfig::default();

        let mut in_one = fresh(1);
        grant_xp(&mut in_one, 1000, NOW, &config);

        let mut in_two = fresh(1);
        grant_xp(&mut in_two, 500, NOW, &config);
        grant_xp(&mut in_two, 500, NOW, &config);

        assert_eq!(in_one, in_two);
    }

    #[test]
    fn grants_never_shrink_a_profile() {
        let config = GameConfig::default();
        let mut profile = fresh(1);

        for amount in [0, 3, 49, 500, 1, 777] {
            let level_before = profile.level;
            let height_before = profile.height;

            grant_xp(&mut profile, amount, NOW, &config);

            assert!(profile.level >= level_before);
            assert!(profile.height >= height_before);
            assert!(profile.xp < xp_to_next_level(&config, profile.level));
        }
    }

    #[test]
    fn negative_amounts_are_ignored() {
        let config = GameConfig::default();
        let mut profile = fresh(1);

        assert!(grant_xp(&mut profile, -50, NOW, &config).is_none());
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 1);
    }
}
