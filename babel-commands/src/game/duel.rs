use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::game::embeds::{
    display_name_of, duel_report_embed, rejection_message, usage_message,
};
use babel_core::{Context, Error};
use babel_database::impls::duels::{DuelExecution, execute_duel};

pub const META: CommandMeta = CommandMeta {
    name: "duel",
    desc: "Challenge another tower to a duel for height.",
    category: "game",
    usage: "!duel <user>",
};

#[poise::command(prefix_command, slash_command, category = "Game")]
pub async fn duel(
    ctx: Context<'_>,
    #[description = "The tower to challenge"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(opponent) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if opponent.bot {
        ctx.say("Bots do not build towers.").await?;
        return Ok(());
    }

    let data = ctx.data();
    let execution = execute_duel(
        &data.db,
        &data.game,
        ctx.author().id.get(),
        opponent.id.get(),
    )
    .await?;

    let challenger_name = display_name_of(ctx.author());
    let defender_name = display_name_of(&opponent);

    match execution {
        DuelExecution::Rejected(rejection) => {
            ctx.say(rejection_message(&rejection, &defender_name)).await?;
        }
        DuelExecution::Resolved(report) => {
            let embed = duel_report_embed(&report, &challenger_name, &defender_name);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}
