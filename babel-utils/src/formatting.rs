/// Format a tower height for display (e.g. 42 -> "42ft").
pub fn format_height(feet: i64) -> String {
    format!("{}ft", feet)
}

/// Format banked XP against the next level's requirement (e.g. "25/50 XP").
pub fn format_xp_progress(banked: i64, needed: i64) -> String {
    format!("{}/{} XP", banked, needed)
}

/// Format a win/loss record (e.g. "3W / 1L").
pub fn format_duel_record(wins: i64, losses: i64) -> String {
    format!("{}W / {}L", wins, losses)
}

/// Label for a leaderboard position: medals for the podium, numbers below.
pub fn rank_label(rank: usize) -> String {
    match rank {
        1 => "🥇".to_owned(),
        2 => "🥈".to_owned(),
        3 => "🥉".to_owned(),
        other => format!("{}.", other),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_duel_record, format_height, format_xp_progress, rank_label};

    #[test]
    fn heights_carry_the_feet_suffix() {
        assert_eq!(format_height(5), "5ft");
        assert_eq!(format_height(142), "142ft");
    }

    #[test]
    fn xp_progress_shows_bank_over_requirement() {
        assert_eq!(format_xp_progress(25, 50), "25/50 XP");
        assert_eq!(format_xp_progress(0, 500), "0/500 XP");
    }

    #[test]
    fn duel_records_pair_wins_and_losses() {
        assert_eq!(format_duel_record(0, 0), "0W / 0L");
        assert_eq!(format_duel_record(3, 1), "3W / 1L");
    }

    #[test]
    fn podium_ranks_get_medals() {
        assert_eq!(rank_label(1), "🥇");
        assert_eq!(rank_label(2), "🥈");
        assert_eq!(rank_label(3), "🥉");
        assert_eq!(rank_label(4), "4.");
        assert_eq!(rank_label(10), "10.");
    }
}
