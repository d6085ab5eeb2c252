//! The `/killa` command and its subcommands.

use crate::framework::{Context, Error};
use crate::message::KillaView;
use killa_common::UserId;
use tracing::info;

/// Confirmation shown after `/killa reset`.
pub const RESET_CONFIRMATION: &str = "Today's Killa counter and pace have been reset.";

/// Track your Killa kills
#[poise::command(
    slash_command,
    guild_only,
    subcommands("show", "reset"),
    subcommand_required
)]
pub async fn killa(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Show your Killa progress
#[poise::command(slash_command, guild_only)]
pub async fn show(ctx: Context<'_>) -> Result<(), Error> {
    let user = UserId(ctx.author().id.get());
    let stats = ctx.data().tracker.get_stats(user).await?;
    let view = KillaView::new(user, &stats, &ctx.data().config.killa);

    ctx.send(view.to_reply()).await?;

    info!("Killa show command executed by user {}", user);
    Ok(())
}

/// Reset today's Killa counter & pace for yourself
#[poise::command(slash_command, guild_only)]
pub async fn reset(ctx: Context<'_>) -> Result<(), Error> {
    let user = UserId(ctx.author().id.get());
    let stats = ctx.data().tracker.reset_today(user).await?;
    let view = KillaView::new(user, &stats, &ctx.data().config.killa).with_content(RESET_CONFIRMATION);

    ctx.send(view.to_reply()).await?;

    info!("Killa reset command executed by user {}", user);
    Ok(())
}
