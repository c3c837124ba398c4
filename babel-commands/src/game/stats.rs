use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::game::embeds::{display_name_of, no_tower_message, stats_embed};
use babel_core::{Context, Error};
use babel_database::impls::profiles::get_profile;

pub const META: CommandMeta = CommandMeta {
    name: "towerstats",
    desc: "View a tower's level, XP, height, and duel record.",
    category: "game",
    usage: "!towerstats [user]",
};

#[poise::command(prefix_command, slash_command, category = "Game")]
pub async fn towerstats(
    ctx: Context<'_>,
    #[description = "The user to inspect"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let display_name = display_name_of(target);

    // A missing profile is "no progress yet", not an error.
    let Some(profile) = get_profile(&ctx.data().db, target.id.get()).await? else {
        ctx.say(no_tower_message(&display_name)).await?;
        return Ok(());
    };

    let embed = stats_embed(&profile, &display_name, &ctx.data().game);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
