use std::time::Duration;

use poise::serenity_prelude as serenity;

const CONFIRMATION_TIMEOUT_SECS: u64 = 60;

/// Prompt the invoking user with Confirm/Decline buttons and resolve the
/// prompt message in place.
///
/// Returns `true` only on an explicit confirm; declines and timeouts edit
/// the prompt to the matching text and return `false`.
pub async fn confirm_destructive_action<U, E>(
    ctx: poise::Context<'_, U, E>,
    embed: serenity::CreateEmbed,
    timed_out_text: &str,
    declined_text: &str,
    processing_text: &str,
) -> Result<bool, serenity::Error>
where
    U: Send + Sync,
    E: Send + Sync,
{
    let ctx_id = ctx.id();
    let confirm_id = format!("{}_confirm", ctx_id);
    let decline_id = format!("{}_decline", ctx_id);

    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(embed)
                .components(vec![serenity::CreateActionRow::Buttons(vec![
                    serenity::CreateButton::new(&confirm_id)
                        .label("Confirm")
                        .style(serenity::ButtonStyle::Danger),
                    serenity::CreateButton::new(&decline_id)
                        .label("Decline")
                        .style(serenity::ButtonStyle::Secondary),
                ])]),
        )
        .await?;

    let message = reply.message().await?.into_owned();
    let interaction = message
        .await_component_interaction(ctx)
        .author_id(ctx.author().id)
        .timeout(Duration::from_secs(CONFIRMATION_TIMEOUT_SECS))
        .await;

    let Some(interaction) = interaction else {
        message
            .channel_id
            .edit_message(
                ctx.http(),
                message.id,
                serenity::EditMessage::new()
                    .content(timed_out_text)
                    .embeds(vec![])
                    .components(vec![]),
            )
            .await?;
        return Ok(false);
    };

    let confirmed = interaction.data.custom_id == confirm_id;
    let resolved_text = if confirmed {
        processing_text
    } else {
        declined_text
    };

    interaction
        .create_response(
            ctx.http(),
            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .content(resolved_text)
                    .embeds(vec![])
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(confirmed)
}
