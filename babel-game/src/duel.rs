use rand::Rng;
use thiserror::Error;

use crate::config::GameConfig;
use crate::leaderboard::Standings;
use crate::profile::TowerProfile;

/// The ladder rule that permits a duel the plain height comparison refuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialRule {
    /// Anyone may challenge whoever holds 3rd place.
    AnyoneChallengesThird,
    /// 3rd place may challenge 2nd.
    ThirdChallengesSecond,
    /// 2nd place may challenge 1st.
    SecondChallengesFirst,
}

/// The ladder rule that would be needed to duel a defender at this rank,
/// if one exists for that rank at all.
pub fn special_rule_for(defender_rank: usize) -> Option<SpecialRule> {
    match defender_rank {
        1 => Some(SpecialRule::SecondChallengesFirst),
        2 => Some(SpecialRule::ThirdChallengesSecond),
        3 => Some(SpecialRule::AnyoneChallengesThird),
        _ => None,
    }
}

/// Why a duel was refused. A rejected duel changes no state.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DuelRejection {
    #[error("a tower cannot duel itself")]
    SelfChallenge,
    #[error("the challenger has no tower")]
    UnknownChallenger,
    #[error("the defender has no tower")]
    UnknownDefender,
    #[error("challenger at rank {challenger_rank} may not duel rank {defender_rank}")]
    Ineligible {
        challenger_rank: usize,
        defender_rank: usize,
    },
}

/// Check the ladder rules for a challenge.
///
/// A challenger may always punch down (equal or taller tower); punching up
/// requires one of the [`SpecialRule`] slots near the top of the standings.
pub fn check_eligibility(
    challenger: &TowerProfile,
    defender: &TowerProfile,
    standings: &Standings,
) -> Result<(), DuelRejection> {
    if challenger.user_id == defender.user_id {
        return Err(DuelRejection::SelfChallenge);
    }

    let challenger_rank = standings
        .position(challenger.user_id)
        .ok_or(DuelRejection::UnknownChallenger)?;
    let defender_rank = standings
        .position(defender.user_id)
        .ok_or(DuelRejection::UnknownDefender)?;

    let allowed = challenger.height >= defender.height
        || defender_rank == 3
        || (challenger_rank == 3 && defender_rank == 2)
        || (challenger_rank == 2 && defender_rank == 1);

    if allowed {
        Ok(())
    } else {
        Err(DuelRejection::Ineligible {
            challenger_rank,
            defender_rank,
        })
    }
}

/// Who a duel roll favored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuelOutcome {
    ChallengerWins,
    DefenderWins,
    TowerWins,
}

/// Draw an outcome from the configured three-way weights.
pub fn roll_outcome(rng: &mut impl Rng, config: &GameConfig) -> DuelOutcome {
    let (challenger, defender, tower) = config.duel_weights;
    // All-zero weights collapse to a 0..1 draw that always lands on the tower.
    let total = (challenger + defender + tower).max(1);

    let roll = rng.gen_range(0..total);
    if roll < challenger {
        DuelOutcome::ChallengerWins
    } else if roll < challenger + defender {
        DuelOutcome::DefenderWins
    } else {
        DuelOutcome::TowerWins
    }
}

/// A resolved duel: the rolled outcome, the feet that moved, and both
/// profiles after the exchange.
#[derive(Clone, Debug)]
pub struct DuelReport {
    pub outcome: DuelOutcome,
    /// Feet moved to the winner, or surrendered to the tower.
    pub transfer: i64,
    pub challenger: TowerProfile,
    pub defender: TowerProfile,
}

/// Apply a rolled outcome to both towers.
///
/// Player wins move `max(1, round(loser.height * rate))` feet; the loser is
/// floored at the base height while the winner keeps the nominal gain, so
/// the exchange stops being zero-sum exactly when the floor bites. When the
/// tower wins, the challenger alone pays a rounded share with no minimum
/// (a 5 ft tower rounds to a 1 ft loss that the floor immediately refunds)
/// and the defender walks away untouched.
pub fn resolve(
    mut challenger: TowerProfile,
    mut defender: TowerProfile,
    outcome: DuelOutcome,
    now: i64,
    config: &GameConfig,
) -> DuelReport {
    let transfer = match outcome {
        DuelOutcome::ChallengerWins => {
            transfer_height(&mut defender, &mut challenger, now, config)
        }
        DuelOutcome::DefenderWins => transfer_height(&mut challenger, &mut defender, now, config),
        DuelOutcome::TowerWins => {
            let loss = rounded_share(challenger.height, config.duel_transfer_rate);
            challenger.height = (challenger.height - loss).max(config.base_height);
            challenger.losses += 1;
            loss
        }
    };

    DuelReport {
        outcome,
        transfer,
        challenger,
        defender,
    }
}

fn transfer_height(
    loser: &mut TowerProfile,
    winner: &mut TowerProfile,
    now: i64,
    config: &GameConfig,
) -> i64 {
    let transfer = rounded_share(loser.height, config.duel_transfer_rate).max(1);

    winner.height += transfer;
    winner.height_reached_at = now;
    winner.wins += 1;

    loser.height = (loser.height - transfer).max(config.base_height);
    loser.losses += 1;

    transfer
}

fn rounded_share(height: i64, rate: f64) -> i64 {
    (height as f64 * rate).round() as i64
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{
        DuelOutcome, DuelRejection, SpecialRule, check_eligibility, resolve, roll_outcome,
        special_rule_for,
    };
    use crate::config::GameConfig;
    use crate::leaderboard::Standings;
    use crate::profile::TowerProfile;

    const NOW: i64 = 1_700_000_000;

    fn profile(user_id: u64, height: i64) -> TowerProfile {
        TowerProfile {
            height,
            ..TowerProfile::new(user_id, &GameConfig::default(), 100)
        }
    }

    /// Four towers: #1 = user 1 (50 ft), #2 = user 2 (40 ft),
    /// #3 = user 3 (30 ft), #4 = user 4 (8 ft).
    fn ladder() -> Standings {
        Standings::rank(vec![
            profile(1, 50),
            profile(2, 40),
            profile(3, 30),
            profile(4, 8),
        ])
    }

    #[test]
    fn equal_or_taller_towers_may_always_challenge() {
        let standings = Standings::rank(vec![
            profile(1, 50),
            profile(2, 40),
            profile(3, 30),
            profile(4, 8),
            profile(5, 8),
        ]);

        assert!(check_eligibility(&profile(1, 50), &profile(4, 8), &standings).is_ok());
        assert!(check_eligibility(&profile(5, 8), &profile(4, 8), &standings).is_ok());
    }

    #[test]
    fn anyone_may_challenge_third_place() {
        let standings = ladder();

        assert!(check_eligibility(&profile(4, 8), &profile(3, 30), &standings).is_ok());
    }

    #[test]
    fn third_may_challenge_second_but_fourth_may_not() {
        let standings = ladder();

        assert!(check_eligibility(&profile(3, 30), &profile(2, 40), &standings).is_ok());
        assert_eq!(
            check_eligibility(&profile(4, 8), &profile(2, 40), &standings),
            Err(DuelRejection::Ineligible {
                challenger_rank: 4,
                defender_rank: 2,
            })
        );
    }

    #[test]
    fn second_may_challenge_first_but_third_may_not() {
        let standings = ladder();

        assert!(check_eligibility(&profile(2, 40), &profile(1, 50), &standings).is_ok());
        assert_eq!(
            check_eligibility(&profile(3, 30), &profile(1, 50), &standings),
            Err(DuelRejection::Ineligible {
                challenger_rank: 3,
                defender_rank: 1,
            })
        );
    }

    #[test]
    fn self_challenges_are_rejected() {
        let standings = ladder();

        assert_eq!(
            check_eligibility(&profile(2, 40), &profile(2, 40), &standings),
            Err(DuelRejection::SelfChallenge)
        );
    }

    #[test]
    fn unranked_parties_are_rejected() {
        let standings = ladder();

        assert_eq!(
            check_eligibility(&profile(9, 99), &profile(3, 30), &standings),
            Err(DuelRejection::UnknownChallenger)
        );
        assert_eq!(
            check_eligibility(&profile(1, 50), &profile(9, 1), &standings),
            Err(DuelRejection::UnknownDefender)
        );
    }

    #[test]
    fn special_rules_map_to_defender_rank() {
        assert_eq!(special_rule_for(1), Some(SpecialRule::SecondChallengesFirst));
        assert_eq!(special_rule_for(2), Some(SpecialRule::ThirdChallengesSecond));
        assert_eq!(special_rule_for(3), Some(SpecialRule::AnyoneChallengesThird));
        assert_eq!(special_rule_for(4), None);
    }

    #[test]
    fn degenerate_weights_always_pick_the_surviving_outcome() {
        let mut rng = StdRng::seed_from_u64(7);

        let only_challenger = GameConfig {
            duel_weights: (1, 0, 0),
            ..GameConfig::default()
        };
        let only_defender = GameConfig {
            duel_weights: (0, 1, 0),
            ..GameConfig::default()
        };
        let only_tower = GameConfig {
            duel_weights: (0, 0, 1),
            ..GameConfig::default()
        };

        for _ in 0..50 {
            assert_eq!(
                roll_outcome(&mut rng, &only_challenger),
                DuelOutcome::ChallengerWins
            );
            assert_eq!(
                roll_outcome(&mut rng, &only_defender),
                DuelOutcome::DefenderWins
            );
            assert_eq!(roll_outcome(&mut rng, &only_tower), DuelOutcome::TowerWins);
        }
    }

    #[test]
    fn player_wins_transfer_height_zero_sum_above_the_floor() {
        let config = GameConfig::default();
        let report = resolve(
            profile(1, 50),
            profile(2, 40),
            DuelOutcome::ChallengerWins,
            NOW,
            &config,
        );

        assert_eq!(report.transfer, 4);
        assert_eq!(report.challenger.height, 54);
        assert_eq!(report.defender.height, 36);
        assert_eq!(report.challenger.wins, 1);
        assert_eq!(report.defender.losses, 1);
        assert_eq!(report.challenger.height_reached_at, NOW);
        // The loser's arrival timestamp is untouched by a decrease.
        assert_eq!(report.defender.height_reached_at, 100);
    }

    #[test]
    fn defender_wins_mirror_the_transfer() {
        let config = GameConfig::default();
        let report = resolve(
            profile(1, 50),
            profile(2, 40),
            DuelOutcome::DefenderWins,
            NOW,
            &config,
        );

        assert_eq!(report.transfer, 5);
        assert_eq!(report.challenger.height, 45);
        assert_eq!(report.defender.height, 45);
        assert_eq!(report.defender.wins, 1);
        assert_eq!(report.challenger.losses, 1);
    }

    #[test]
    fn short_towers_still_surrender_at_least_one_foot() {
        let config = GameConfig::default();
        let report = resolve(
            profile(1, 6),
            profile(2, 6),
            DuelOutcome::ChallengerWins,
            NOW,
            &config,
        );

        // round(6 * 0.10) = 1 after the minimum-transfer clamp.
        assert_eq!(report.transfer, 1);
        assert_eq!(report.challenger.height, 7);
        assert_eq!(report.defender.height, 5);
    }

    #[test]
    fn the_floor_caps_the_loss_but_not_the_gain() {
        let config = GameConfig::default();
        let report = resolve(
            profile(1, 20),
            profile(2, 5),
            DuelOutcome::ChallengerWins,
            NOW,
            &config,
        );

        // The loser is already at the floor, yet the winner keeps the
        // nominal 1 ft transfer.
        assert_eq!(report.transfer, 1);
        assert_eq!(report.challenger.height, 21);
        assert_eq!(report.defender.height, config.base_height);
    }

    #[test]
    fn no_duel_sequence_drops_a_tower_below_the_floor() {
        let config = GameConfig::default();
        let mut challenger = profile(1, 7);
        let mut defender = profile(2, 6);

        for outcome in [
            DuelOutcome::DefenderWins,
            DuelOutcome::TowerWins,
            DuelOutcome::DefenderWins,
            DuelOutcome::TowerWins,
        ] {
            let report = resolve(challenger, defender, outcome, NOW, &config);
            challenger = report.challenger;
            defender = report.defender;

            assert!(challenger.height >= config.base_height);
            assert!(defender.height >= config.base_height);
        }
    }

    #[test]
    fn the_tower_penalizes_only_the_challenger() {
        let config = GameConfig::default();
        let report = resolve(
            profile(1, 50),
            profile(2, 40),
            DuelOutcome::TowerWins,
            NOW,
            &config,
        );

        assert_eq!(report.transfer, 5);
        assert_eq!(report.challenger.height, 45);
        assert_eq!(report.challenger.losses, 1);
        assert_eq!(report.defender, profile(2, 40));
    }

    #[test]
    fn tower_losses_have_no_minimum() {
        // Unlike player wins, the tower branch never clamps the rounded
        // share up to 1 ft: a share that rounds to zero costs nothing.
        let config = GameConfig {
            duel_transfer_rate: 0.01,
            ..GameConfig::default()
        };
        let report = resolve(
            profile(1, 40),
            profile(2, 40),
            DuelOutcome::TowerWins,
            NOW,
            &config,
        );

        assert_eq!(report.transfer, 0);
        assert_eq!(report.challenger.height, 40);
        assert_eq!(report.challenger.losses, 1);
    }
}
