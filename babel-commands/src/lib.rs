pub mod game;
pub mod utility;

use babel_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    game::stats::META,
    game::duel::META,
    game::leaderboard::META,
    game::reset::META,
    game::faq::META,
    utility::help::META,
    utility::ping::META,
];

// Each command is registered here exactly once; a duplicate name would be a
// registration error at startup rather than a silent shadow.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        game::stats::towerstats(),
        game::duel::duel(),
        game::leaderboard::leaderboard(),
        game::reset::reset(),
        game::faq::faq(),
        utility::help::help(),
        utility::ping::ping(),
    ]
}
