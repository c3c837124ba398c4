use crate::profile::TowerProfile;

/// A ranked snapshot of every known tower.
///
/// Standings are rebuilt from the full profile set on every call rather
/// than maintained incrementally; profile counts are small and duel
/// eligibility must always see the latest store state.
#[derive(Clone, Debug)]
pub struct Standings {
    entries: Vec<TowerProfile>,
}

impl Standings {
    /// Rank profiles by height, tallest first. Ties go to whoever reached
    /// the height first; user id breaks exact ties so the order is total.
    pub fn rank(mut profiles: Vec<TowerProfile>) -> Self {
        profiles.sort_unstable_by(|left, right| {
            right
                .height
                .cmp(&left.height)
                .then_with(|| left.height_reached_at.cmp(&right.height_reached_at))
                .then_with(|| left.user_id.cmp(&right.user_id))
        });

        Self { entries: profiles }
    }

    /// 1-based rank of a user, if they have a tower.
    pub fn position(&self, user_id: u64) -> Option<usize> {
        self.entries
            .iter()
            .position(|profile| profile.user_id == user_id)
            .map(|index| index + 1)
    }

    /// Profiles in rank order.
    pub fn entries(&self) -> &[TowerProfile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Standings;
    use crate::config::GameConfig;
    use crate::profile::TowerProfile;

    fn profile(user_id: u64, height: i64, height_reached_at: i64) -> TowerProfile {
        TowerProfile {
            height,
            height_reached_at,
            ..TowerProfile::new(user_id, &GameConfig::default(), 0)
        }
    }

    #[test]
    fn taller_towers_rank_first() {
        let standings = Standings::rank(vec![
            profile(1, 8, 100),
            profile(2, 20, 100),
            profile(3, 11, 100),
        ]);

        let order: Vec<u64> = standings.entries().iter().map(|p| p.user_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(standings.position(2), Some(1));
        assert_eq!(standings.position(1), Some(3));
    }

    #[test]
    fn height_ties_go_to_the_earlier_arrival() {
        let standings = Standings::rank(vec![profile(1, 20, 500), profile(2, 20, 100)]);

        assert_eq!(standings.position(2), Some(1));
        assert_eq!(standings.position(1), Some(2));
    }

    #[test]
    fn exact_ties_order_by_user_id() {
        let standings = Standings::rank(vec![profile(9, 20, 100), profile(4, 20, 100)]);

        assert_eq!(standings.position(4), Some(1));
        assert_eq!(standings.position(9), Some(2));
    }

    #[test]
    fn ranking_is_deterministic_across_calls() {
        let profiles = vec![
            profile(1, 14, 300),
            profile(2, 14, 300),
            profile(3, 8, 100),
            profile(4, 20, 50),
        ];

        let first = Standings::rank(profiles.clone());
        let second = Standings::rank(profiles);

        assert_eq!(first.entries(), second.entries());
    }

    #[test]
    fn unknown_users_have_no_position() {
        let standings = Standings::rank(vec![profile(1, 5, 0)]);

        assert_eq!(standings.position(99), None);
        assert!(!standings.is_empty());
        assert_eq!(standings.len(), 1);
    }
}
