use poise::serenity_prelude as serenity;

use babel_game::duel::{DuelOutcome, DuelRejection, DuelReport, SpecialRule, special_rule_for};
use babel_game::{GameConfig, TowerProfile, title_for_level, xp_to_next_level};
use babel_utils::embed::DEFAULT_EMBED_COLOR;
use babel_utils::formatting::{format_duel_record, format_height, format_xp_progress, rank_label};

// One color per duel outcome so results read at a glance.
const CHALLENGER_WIN_COLOR: u32 = 0x2e_cc_71;
const DEFENDER_WIN_COLOR: u32 = 0xe7_4c_3c;
const TOWER_WIN_COLOR: u32 = 0xf1_c4_0f;

pub fn display_name_of(user: &serenity::User) -> String {
    user.global_name.clone().unwrap_or_else(|| user.name.clone())
}

/// Resolve a display name over HTTP, falling back to a plain id label for
/// deleted or unreachable accounts.
pub async fn fetch_display_name(http: &serenity::Http, user_id: u64) -> String {
    match http.get_user(serenity::UserId::new(user_id)).await {
        Ok(user) => display_name_of(&user),
        Err(_) => format!("User {}", user_id),
    }
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn no_tower_message(display_name: &str) -> String {
    format!("{display_name} hasn't started building their tower yet. Send a message to begin!")
}

pub fn empty_leaderboard_message() -> &'static str {
    "No towers have been built yet. Send a message to lay the first brick!"
}

pub fn stats_embed(
    profile: &TowerProfile,
    display_name: &str,
    config: &GameConfig,
) -> serenity::CreateEmbed {
    let title = title_for_level(profile.level);
    let needed = xp_to_next_level(config, profile.level);

    let description = format!(
        "**{} [Lv. {}]** — Tower Height: **{}**\nXP: `{}`\nDuels: `{}`\n\n*\"{}\"*",
        title.name,
        profile.level,
        format_height(profile.height),
        format_xp_progress(profile.xp, needed),
        format_duel_record(profile.wins, profile.losses),
        title.flavor,
    );

    serenity::CreateEmbed::new()
        .title(format!("{display_name}'s Tower Stats"))
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
        .footer(serenity::CreateEmbedFooter::new("The Tower watches... always."))
}

pub fn level_up_embed(display_name: &str, profile: &TowerProfile) -> serenity::CreateEmbed {
    let title = title_for_level(profile.level);

    serenity::CreateEmbed::new()
        .title(format!("🔮 {display_name} has leveled up!"))
        .color(DEFAULT_EMBED_COLOR)
        .description(format!(
            "**{} [Lv. {}] — Tower Height: {}**\n*{}*",
            title.name,
            profile.level,
            format_height(profile.height),
            title.flavor,
        ))
}

pub fn duel_report_embed(
    report: &DuelReport,
    challenger_name: &str,
    defender_name: &str,
) -> serenity::CreateEmbed {
    match report.outcome {
        DuelOutcome::ChallengerWins => serenity::CreateEmbed::new()
            .title("⚔️ Duel Result")
            .color(CHALLENGER_WIN_COLOR)
            .description(format!(
                "{} has defeated {} and stolen {} of tower!\n{} now stands at {}.",
                challenger_name,
                defender_name,
                format_height(report.transfer),
                challenger_name,
                format_height(report.challenger.height),
            )),
        DuelOutcome::DefenderWins => serenity::CreateEmbed::new()
            .title("⚔️ Duel Result")
            .color(DEFENDER_WIN_COLOR)
            .description(format!(
                "{} was defeated by {}! {} of tower changes hands, leaving the challenger at {}.",
                challenger_name,
                defender_name,
                format_height(report.transfer),
                format_height(report.challenger.height),
            )),
        DuelOutcome::TowerWins => serenity::CreateEmbed::new()
            .title("🌩️ The Tower Strikes!")
            .color(TOWER_WIN_COLOR)
            .description(format!(
                "The Tower has judged {} unworthy.\nThey lose {} of their own tower.",
                challenger_name,
                format_height(report.transfer),
            )),
    }
}

/// Turn a duel rejection into user-facing text, naming the ladder rule that
/// would have been needed where one exists.
pub fn rejection_message(rejection: &DuelRejection, defender_name: &str) -> String {
    match rejection {
        DuelRejection::SelfChallenge => "You can't duel yourself, tower weirdo.".to_owned(),
        DuelRejection::UnknownChallenger => {
            "You don't have a tower yet. Send some messages first!".to_owned()
        }
        DuelRejection::UnknownDefender => {
            format!("{defender_name} doesn't have a tower yet.")
        }
        DuelRejection::Ineligible {
            challenger_rank,
            defender_rank,
        } => {
            let hint = match special_rule_for(*defender_rank) {
                Some(SpecialRule::SecondChallengesFirst) => format!(
                    "Only 2nd place may challenge 1st, and you hold rank {challenger_rank}."
                ),
                Some(SpecialRule::ThirdChallengesSecond) => format!(
                    "Only 3rd place may challenge 2nd, and you hold rank {challenger_rank}."
                ),
                Some(SpecialRule::AnyoneChallengesThird) => {
                    "Third place is always fair game.".to_owned()
                }
                None => "Grow your tower or pick on someone your own size.".to_owned(),
            };

            format!("You can only duel an equal or smaller tower. {hint}")
        }
    }
}

pub fn leaderboard_line(rank: usize, display_name: &str, profile: &TowerProfile) -> String {
    format!(
        "{} {} — {} (Lv. {})",
        rank_label(rank),
        display_name,
        format_height(profile.height),
        profile.level,
    )
}

pub fn reset_confirm_embed(display_name: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("Tear down this tower?")
        .color(DEFAULT_EMBED_COLOR)
        .description(format!(
            "{display_name}'s tower, levels, XP, and duel record will be rebuilt from the ground up. \
             This cannot be undone."
        ))
}

pub fn reset_done_message(display_name: &str, base_height: i64) -> String {
    format!(
        "{display_name}'s tower has been rebuilt at {}. A humble new beginning.",
        format_height(base_height)
    )
}

pub fn faq_description(config: &GameConfig) -> String {
    let steal_percent = (config.duel_transfer_rate * 100.0).round() as i64;

    format!(
        "**🧱 Starting Out**\n\
         • Every tower begins at {} and Lv. 1.\n\
         • Gain XP by chatting (+{} XP) or reacting (+{} XP).\n\n\
         **🧙 Leveling Up**\n\
         • Each level needs {} more XP than the last, capped at {} per level.\n\
         • A level-up adds {} of height.\n\
         • `!towerstats` shows your progress.\n\n\
         **⚔️ Duels**\n\
         • `!duel @someone` challenges their tower.\n\
         • You may challenge an equal or smaller tower — plus three ladder \
         exceptions: anyone may duel 3rd place, 3rd may duel 2nd, and 2nd may duel 1st.\n\
         • A winner steals {}% of the loser's height (at least 1ft). \
         Losers never drop below {}.\n\
         • Sometimes the Tower itself wins, and the challenger alone pays tribute.\n\n\
         **🏆 Leaderboard**\n\
         • `!leaderboard` ranks the tallest towers.\n\
         • Ties go to whoever reached the height first.",
        format_height(config.base_height),
        config.xp_per_message,
        config.xp_per_reaction,
        config.xp_increment,
        config.xp_cap,
        format_height(config.height_per_level),
        steal_percent,
        format_height(config.base_height),
    )
}

#[cfg(test)]
mod tests {
    use super::{faq_description, leaderboard_line, no_tower_message, rejection_message};
    use babel_game::duel::DuelRejection;
    use babel_game::{GameConfig, TowerProfile};

    fn profile(user_id: u64, height: i64, level: i64) -> TowerProfile {
        TowerProfile {
            height,
            level,
            ..TowerProfile::new(user_id, &GameConfig::default(), 0)
        }
    }

    #[test]
    fn rejections_name_the_ladder_rule_that_was_needed() {
        let needs_second = rejection_message(
            &DuelRejection::Ineligible {
                challenger_rank: 5,
                defender_rank: 1,
            },
            "Zik",
        );
        assert!(needs_second.contains("Only 2nd place may challenge 1st"));
        assert!(needs_second.contains("rank 5"));

        let needs_third = rejection_message(
            &DuelRejection::Ineligible {
                challenger_rank: 9,
                defender_rank: 2,
            },
            "Zik",
        );
        assert!(needs_third.contains("Only 3rd place may challenge 2nd"));

        let no_rule = rejection_message(
            &DuelRejection::Ineligible {
                challenger_rank: 9,
                defender_rank: 6,
            },
            "Zik",
        );
        assert!(no_rule.contains("equal or smaller tower"));
    }

    #[test]
    fn unknown_parties_get_distinct_messages() {
        let challenger = rejection_message(&DuelRejection::UnknownChallenger, "Zik");
        let defender = rejection_message(&DuelRejection::UnknownDefender, "Zik");

        assert!(challenger.contains("You don't have a tower"));
        assert!(defender.contains("Zik doesn't have a tower"));
        assert!(no_tower_message("Zik").contains("Zik"));
    }

    #[test]
    fn leaderboard_lines_show_medal_height_and_level() {
        let line = leaderboard_line(1, "Ada", &profile(1, 42, 12));

        assert_eq!(line, "🥇 Ada — 42ft (Lv. 12)");
        assert_eq!(
            leaderboard_line(4, "Bo", &profile(2, 5, 1)),
            "4. Bo — 5ft (Lv. 1)"
        );
    }

    #[test]
    fn faq_text_tracks_the_live_config() {
        let text = faq_description(&GameConfig {
            xp_per_message: 7,
            ..GameConfig::default()
        });

        assert!(text.contains("+7 XP"));
        assert!(text.contains("10%"));
        assert!(text.contains("5ft"));
    }
}
