//! Counter buttons: custom id encoding, ownership checks and the
//! interaction handler.
//!
//! Custom ids have the form `killa:{add|remove|reset}:{owner_user_id}`.
//! Only the owner may press the buttons on their counter.

use crate::framework::{Data, Error};
use crate::message::KillaView;
use killa_common::{KillaError, Result, UserId};
use killa_stats::KillaStats;
use killa_store::KillTracker;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

/// Leading segment of every counter button id.
pub const BUTTON_PREFIX: &str = "killa";

/// Shown when a button fails for reasons the user cannot fix.
pub const BUTTON_ERROR_MESSAGE: &str = "There was an error while handling this button.";

/// What a counter button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// Record a kill.
    Add,
    /// Undo the most recent kill.
    Remove,
    /// Move today's cutoff to now.
    Reset,
}

impl ButtonAction {
    /// Every action, in the order the buttons are laid out.
    pub const ALL: [Self; 3] = [Self::Add, Self::Remove, Self::Reset];

    /// Segment used in the custom id.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Reset => "reset",
        }
    }

    /// Button label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "+1",
            Self::Remove => "-1",
            Self::Reset => "Reset today",
        }
    }

    /// Button colour.
    pub const fn style(self) -> serenity::ButtonStyle {
        match self {
            Self::Add => serenity::ButtonStyle::Primary,
            Self::Remove => serenity::ButtonStyle::Secondary,
            Self::Reset => serenity::ButtonStyle::Danger,
        }
    }

    /// Ephemeral notice for someone pressing another user's button.
    pub const fn not_owner_message(self) -> &'static str {
        match self {
            Self::Add | Self::Remove => {
                "You can only update your own Killa counter. Use /killa show to start your own."
            }
            Self::Reset => {
                "You can only reset your own Killa counter. Use /killa show to start your own."
            }
        }
    }

    fn parse(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == segment)
    }
}

/// A button on a counter message, bound to the counter's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillaButton {
    /// What pressing it does.
    pub action: ButtonAction,
    /// Whose counter it belongs to.
    pub owner: UserId,
}

impl KillaButton {
    /// Creates a button for `owner`'s counter.
    pub const fn new(action: ButtonAction, owner: UserId) -> Self {
        Self { action, owner }
    }

    /// Encodes the button as a Discord custom id.
    pub fn custom_id(&self) -> String {
        format!("{BUTTON_PREFIX}:{}:{}", self.action.as_str(), self.owner)
    }

    /// Decodes a custom id. Returns `None` for ids this bot did not create.
    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split(':');
        if parts.next()? != BUTTON_PREFIX {
            return None;
        }
        let action = ButtonAction::parse(parts.next()?)?;
        let owner = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(action, owner))
    }

    /// Checks that `actor` owns this counter.
    pub fn authorize(&self, actor: UserId) -> Result<()> {
        if actor == self.owner {
            Ok(())
        } else {
            Err(KillaError::unauthorized(actor, self.owner))
        }
    }

    /// Presses the button as `actor`: checks ownership, then mutates.
    ///
    /// Fails with [`KillaError::Unauthorized`] and leaves the counter
    /// untouched when `actor` is not the owner.
    pub async fn press(&self, actor: UserId, tracker: &KillTracker) -> Result<KillaStats> {
        self.authorize(actor)?;
        self.apply(tracker).await
    }

    /// Performs the button's mutation and returns the owner's new stats.
    pub async fn apply(&self, tracker: &KillTracker) -> Result<KillaStats> {
        match self.action {
            ButtonAction::Add => tracker.add_kill(self.owner).await,
            ButtonAction::Remove => tracker.remove_last_kill(self.owner).await,
            ButtonAction::Reset => tracker.reset_today(self.owner).await,
        }
    }
}

/// Handles a component interaction if it is one of the counter buttons.
///
/// Presses by anyone but the owner get an ephemeral notice and change
/// nothing. Storage failures are logged and reported ephemerally.
pub async fn handle_component(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &Data,
) -> std::result::Result<(), Error> {
    let Some(button) = KillaButton::parse(&component.data.custom_id) else {
        return Ok(());
    };

    let actor = UserId(component.user.id.get());
    match button.press(actor, &data.tracker).await {
        Ok(stats) => {
            info!(
                "User {} pressed {} on their counter",
                actor,
                button.action.as_str()
            );
            let view = KillaView::new(button.owner, &stats, &data.config.killa);
            component
                .create_response(
                    &ctx.http,
                    serenity::CreateInteractionResponse::UpdateMessage(view.to_message_update()),
                )
                .await?;
            Ok(())
        }
        Err(e) if e.is_user_facing() => {
            warn!("Rejected button press: {}", e);
            respond_ephemeral(ctx, component, button.action.not_owner_message()).await
        }
        Err(e) => {
            error!("Button {} failed: {:?}", component.data.custom_id, e);
            respond_ephemeral(ctx, component, BUTTON_ERROR_MESSAGE).await
        }
    }
}

async fn respond_ephemeral(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    content: &str,
) -> std::result::Result<(), Error> {
    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use killa_common::test_utils::discord_fixtures::{other_user_id, test_user_id};

    #[test]
    fn test_custom_id_format() {
        let button = KillaButton::new(ButtonAction::Remove, UserId(42));
        assert_eq!(button.custom_id(), "killa:remove:42");
    }

    #[test]
    fn test_parse_every_action() {
        let owner = test_user_id();
        for action in ButtonAction::ALL {
            let button = KillaButton::new(action, owner);
            assert_eq!(KillaButton::parse(&button.custom_id()), Some(button));
        }
    }

    #[test]
    fn test_parse_rejects_foreign_ids() {
        assert_eq!(KillaButton::parse("other:add:42"), None);
        assert_eq!(KillaButton::parse("killa:explode:42"), None);
        assert_eq!(KillaButton::parse("killa:add:not-a-number"), None);
        assert_eq!(KillaButton::parse("killa:add"), None);
        assert_eq!(KillaButton::parse("killa:add:42:extra"), None);
        assert_eq!(KillaButton::parse(""), None);
    }

    #[test]
    fn test_authorize() {
        let button = KillaButton::new(ButtonAction::Add, test_user_id());
        assert!(button.authorize(test_user_id()).is_ok());

        let error = button.authorize(other_user_id()).unwrap_err();
        assert!(matches!(
            error,
            KillaError::Unauthorized { actor, owner }
                if actor == other_user_id() && owner == test_user_id()
        ));
    }

    #[test]
    fn test_labels_and_styles() {
        assert_eq!(ButtonAction::Add.label(), "+1");
        assert_eq!(ButtonAction::Remove.label(), "-1");
        assert_eq!(ButtonAction::Reset.label(), "Reset today");
        assert_eq!(ButtonAction::Reset.style(), serenity::ButtonStyle::Danger);
    }

    #[test]
    fn test_not_owner_messages() {
        assert!(ButtonAction::Add
            .not_owner_message()
            .starts_with("You can only update your own Killa counter."));
        assert!(ButtonAction::Reset
            .not_owner_message()
            .starts_with("You can only reset your own Killa counter."));
    }
}
