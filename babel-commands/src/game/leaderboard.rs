use crate::CommandMeta;
use crate::game::embeds::{empty_leaderboard_message, fetch_display_name, leaderboard_line};
use babel_core::{Context, Error};
use babel_database::impls::profiles::all_profiles;
use babel_game::Standings;
use babel_utils::pagination::paginate_embed_pages;

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "Rank the tallest towers.",
    category: "game",
    usage: "!leaderboard [page]",
};

const ENTRIES_PER_PAGE: usize = 10;
// Display names are resolved over HTTP one by one, so the board stops here.
const MAX_ENTRIES: usize = 50;

#[poise::command(prefix_command, slash_command, category = "Game")]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[description = "Page number"] page: Option<u32>,
) -> Result<(), Error> {
    let profiles = all_profiles(&ctx.data().db).await?;
    if profiles.is_empty() {
        ctx.say(empty_leaderboard_message()).await?;
        return Ok(());
    }

    let standings = Standings::rank(profiles);

    let mut lines = Vec::with_capacity(standings.len().min(MAX_ENTRIES));
    for (index, profile) in standings.entries().iter().take(MAX_ENTRIES).enumerate() {
        let display_name = fetch_display_name(ctx.http(), profile.user_id).await;
        lines.push(leaderboard_line(index + 1, &display_name, profile));
    }

    let pages: Vec<String> = lines
        .chunks(ENTRIES_PER_PAGE)
        .map(|chunk| chunk.join("\n"))
        .collect();

    let requested_page = page.unwrap_or(1).max(1) as usize;
    paginate_embed_pages(ctx, "🏆 Tower Leaderboard", &pages, requested_page).await?;

    Ok(())
}
