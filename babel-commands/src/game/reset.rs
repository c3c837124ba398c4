use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::game::embeds::{
    display_name_of, guild_only_message, reset_confirm_embed, reset_done_message,
};
use babel_core::{Context, Error};
use babel_database::impls::profiles::reset_profile;
use babel_utils::confirmation::confirm_destructive_action;
use babel_utils::permissions::has_user_permission;

pub const META: CommandMeta = CommandMeta {
    name: "reset",
    desc: "Rebuild a tower from the ground up.",
    category: "game",
    usage: "!reset [user]",
};

#[poise::command(prefix_command, slash_command, category = "Game")]
pub async fn reset(
    ctx: Context<'_>,
    #[description = "The user to reset (requires Manage Server)"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());

    if target.id != ctx.author().id {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say(guild_only_message()).await?;
            return Ok(());
        };

        if !has_user_permission(
            ctx.http(),
            guild_id,
            ctx.author().id,
            serenity::Permissions::MANAGE_GUILD,
        )
        .await?
        {
            ctx.say("You need the Manage Server permission to reset someone else's tower.")
                .await?;
            return Ok(());
        }
    }

    let display_name = display_name_of(target);
    let confirmed = confirm_destructive_action(
        ctx,
        reset_confirm_embed(&display_name),
        "Reset timed out; the tower still stands.",
        "Reset declined; the tower still stands.",
        "Tearing the tower down...",
    )
    .await?;

    if !confirmed {
        return Ok(());
    }

    let profile = reset_profile(&ctx.data().db, &ctx.data().game, target.id.get()).await?;
    ctx.say(reset_done_message(&display_name, profile.height))
        .await?;

    Ok(())
}
