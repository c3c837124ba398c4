use crate::CommandMeta;
use crate::game::embeds::faq_description;
use babel_core::{Context, Error};
use babel_utils::embed::build_embed_with_footer;

pub const META: CommandMeta = CommandMeta {
    name: "faq",
    desc: "How the tower game works.",
    category: "game",
    usage: "!faq",
};

#[poise::command(prefix_command, slash_command, category = "Game")]
pub async fn faq(ctx: Context<'_>) -> Result<(), Error> {
    // Numbers come from the live config so this text never drifts from the rules.
    let embed = build_embed_with_footer(
        "📜 Tower of Babel — FAQ",
        faq_description(&ctx.data().game),
        "Level up. Duel boldly. Grow your tower.",
    );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
