//! Small display helpers shared by the command handlers.

use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Renders a Discord user mention.
pub fn user_mention(user_id: UserId) -> String {
    format!("<@{user_id}>")
}
