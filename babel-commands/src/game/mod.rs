pub mod duel;
pub mod embeds;
pub mod faq;
pub mod leaderboard;
pub mod reset;
pub mod stats;
