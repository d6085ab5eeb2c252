//! Small utility commands.

use crate::framework::{Context, Error};
use chrono::{DateTime, Utc};
use killa_common::format_timestamp;
use tracing::info;

/// Replies with Pong!
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Pong!").await?;
    info!("Ping command executed by user {}", ctx.author().id);
    Ok(())
}

/// Provides information about the user.
#[poise::command(slash_command, guild_only)]
pub async fn user(ctx: Context<'_>) -> Result<(), Error> {
    let joined_at = ctx
        .author_member()
        .await
        .and_then(|member| member.joined_at)
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts.unix_timestamp(), 0));

    ctx.say(describe_user(&ctx.author().tag(), joined_at)).await?;

    info!("User command executed by user {}", ctx.author().id);
    Ok(())
}

/// The `/user` reply text.
pub fn describe_user(tag: &str, joined_at: Option<DateTime<Utc>>) -> String {
    let joined = joined_at.map_or_else(|| "an unknown date".to_string(), format_timestamp);
    format!("This command was run by {tag}, who joined on {joined}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use killa_common::test_utils::mock_timestamp;

    #[test]
    fn test_describe_user() {
        let joined = mock_timestamp(2023, 12, 24, 18, 30, 0);
        assert_eq!(
            describe_user("operator#0001", Some(joined)),
            "This command was run by operator#0001, who joined on 2023-12-24 18:30:00 UTC."
        );
    }

    #[test]
    fn test_describe_user_without_join_date() {
        assert_eq!(
            describe_user("operator", None),
            "This command was run by operator, who joined on an unknown date."
        );
    }
}
