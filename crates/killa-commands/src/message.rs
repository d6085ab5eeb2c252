//! The counter message: an embed with the user's stats and the button row.
//!
//! [`KillaView`] holds plain strings so it can be inspected in tests; the
//! `to_*` methods turn it into serenity builders.

use crate::buttons::{ButtonAction, KillaButton};
use killa_common::{user_mention, UserId};
use killa_config::KillaConfig;
use killa_stats::{format_last_kill, format_today_average, render_progress_bar, KillaStats};
use poise::serenity_prelude as serenity;

/// One embed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewField {
    /// Field heading.
    pub name: String,
    /// Field body, Discord markdown.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

impl ViewField {
    fn new(name: &str, value: String, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value,
            inline,
        }
    }
}

/// Framework-independent rendering of one user's counter.
#[derive(Debug, Clone, PartialEq)]
pub struct KillaView {
    /// Optional text line above the embed.
    pub content: Option<String>,
    /// Embed title.
    pub title: String,
    /// Embed description.
    pub description: String,
    /// Embed fields in display order.
    pub fields: Vec<ViewField>,
    /// Footer text.
    pub footer: String,
    /// Accent colour as `0xRRGGBB`.
    pub colour: u32,
    /// Buttons, all bound to the counter's owner.
    pub buttons: Vec<KillaButton>,
}

impl KillaView {
    /// Builds the view of `owner`'s counter.
    pub fn new(owner: UserId, stats: &KillaStats, settings: &KillaConfig) -> Self {
        let progress = render_progress_bar(
            stats.total_kills as u64,
            settings.goal,
            settings.progress_bar_size,
        );

        let fields = vec![
            ViewField::new(
                "Total kills",
                format!("**{} / {}**", stats.total_kills, settings.goal),
                true,
            ),
            ViewField::new("Kills today", format!("**{}**", stats.kills_today), true),
            ViewField::new(
                "Progress",
                format!("`{}` {}%", progress.bar, progress.percent),
                false,
            ),
            ViewField::new(
                "Pace (Today)",
                format!(
                    "Last kill: **{}**\nAverage: **{}**",
                    format_last_kill(stats),
                    format_today_average(stats)
                ),
                false,
            ),
        ];

        Self {
            content: None,
            title: format!("{} Counter", settings.emoji),
            description: format!("Operator {}", user_mention(owner)),
            fields,
            footer: settings.footer.clone(),
            colour: settings.color,
            buttons: ButtonAction::ALL
                .iter()
                .map(|action| KillaButton::new(*action, owner))
                .collect(),
        }
    }

    /// Adds a text line shown above the embed.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// The embed, stamped with the current time.
    pub fn to_embed(&self) -> serenity::CreateEmbed {
        self.fields.iter().fold(
            serenity::CreateEmbed::new()
                .title(&self.title)
                .description(&self.description)
                .footer(serenity::CreateEmbedFooter::new(&self.footer))
                .colour(self.colour)
                .timestamp(serenity::Timestamp::now()),
            |embed, field| embed.field(&field.name, &field.value, field.inline),
        )
    }

    /// A single action row holding every button.
    pub fn to_components(&self) -> Vec<serenity::CreateActionRow> {
        let buttons = self
            .buttons
            .iter()
            .map(|button| {
                serenity::CreateButton::new(button.custom_id())
                    .label(button.action.label())
                    .style(button.action.style())
            })
            .collect();
        vec![serenity::CreateActionRow::Buttons(buttons)]
    }

    /// Reply to a slash command.
    pub fn to_reply(&self) -> poise::CreateReply {
        let reply = poise::CreateReply::default()
            .embed(self.to_embed())
            .components(self.to_components());
        match &self.content {
            Some(content) => reply.content(content),
            None => reply,
        }
    }

    /// Replacement contents for the message a button sits on.
    ///
    /// Always sets the content so a stale confirmation line is cleared.
    pub fn to_message_update(&self) -> serenity::CreateInteractionResponseMessage {
        serenity::CreateInteractionResponseMessage::new()
            .content(self.content.clone().unwrap_or_default())
            .embed(self.to_embed())
            .components(self.to_components())
    }
}
