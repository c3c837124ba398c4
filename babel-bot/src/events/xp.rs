use poise::serenity_prelude as serenity;
use tracing::error;

use babel_commands::game::embeds::{display_name_of, level_up_embed};
use babel_core::Data;
use babel_database::impls::profiles::award_xp;

/// Grant message XP to the author and announce any level-up in the channel
/// the message landed in.
pub async fn handle_message_xp(ctx: &serenity::Context, data: &Data, message: &serenity::Message) {
    // Ignore bots and webhooks.
    if message.author.bot || message.webhook_id.is_some() {
        return;
    }

    let (profile, level_up) = match award_xp(
        &data.db,
        &data.game,
        message.author.id.get(),
        data.game.xp_per_message,
    )
    .await
    {
        Ok(result) => result,
        Err(source) => {
            error!(?source, "failed to award message XP");
            return;
        }
    };

    if level_up.is_none() {
        return;
    }

    let embed = level_up_embed(&display_name_of(&message.author), &profile);
    if let Err(source) = message
        .channel_id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, "failed to announce level-up");
    }
}

/// Grant reaction XP to the reacting user and announce any level-up in the
/// channel the reaction happened in.
pub async fn handle_reaction_xp(
    ctx: &serenity::Context,
    data: &Data,
    reaction: &serenity::Reaction,
) {
    let user = match reaction.user(&ctx.http).await {
        Ok(user) => user,
        Err(source) => {
            error!(?source, "failed to resolve reacting user");
            return;
        }
    };

    if user.bot {
        return;
    }

    let (profile, level_up) = match award_xp(
        &data.db,
        &data.game,
        user.id.get(),
        data.game.xp_per_reaction,
    )
    .await
    {
        Ok(result) => result,
        Err(source) => {
            error!(?source, "failed to award reaction XP");
            return;
        }
    };

    if level_up.is_none() {
        return;
    }

    let embed = level_up_embed(&display_name_of(&user), &profile);
    if let Err(source) = reaction
        .channel_id
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, "failed to announce level-up");
    }
}
