use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::list::virtualizer::SlotId;
use crate::report::{AccountId, ActionId, ActionPayload, DeliveryStatus, PersonalDetails, ReportAction};

pub const CHAT_MESSAGE_HINT: &str = "accessibilityHints.chatMessage";

/// Resolves a localization key to display text.
pub type Translate = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// English fallback for the keys the list uses.
pub fn default_translate() -> Translate {
    Arc::new(|key: &str| match key {
        CHAT_MESSAGE_HINT => "Chat message".to_string(),
        other => other.to_string(),
    })
}

pub fn author_name(details: &HashMap<AccountId, PersonalDetails>, actor: AccountId) -> String {
    match details.get(&actor) {
        Some(d) if !d.display_name.is_empty() => d.display_name.clone(),
        Some(d) if !d.login.is_empty() => d.login.clone(),
        _ => format!("Account {actor}"),
    }
}

pub fn time_label(created: DateTime<Utc>) -> String {
    created.format("%H:%M").to_string()
}

/// A mounted row as the host draws it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem {
    pub id: ActionId,
    pub index: usize,
    pub slot: SlotId,
    pub top: f64,
    pub height: f64,
    /// `height` is a real measurement. Rows still on an estimate expect an
    /// `ItemMeasured` reply once drawn.
    pub measured: bool,
    pub accessibility_label: String,
    pub author: String,
    pub time_label: String,
    pub payload: ActionPayload,
    pub status: DeliveryStatus,
    pub is_own: bool,
    /// Folded under the previous row's author header.
    pub is_grouped: bool,
    /// Props changed (or the row just entered) since it was last drawn.
    pub needs_render: bool,
}

/// What a row render depends on, hashed to decide whether it must redraw.
#[derive(Hash)]
pub struct RowProps<'a> {
    pub action: &'a ReportAction,
    pub author: &'a str,
    pub is_grouped: bool,
    pub is_own: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn author_falls_back_to_login_then_account() {
        let mut details = HashMap::new();
        details.insert(
            AccountId(1),
            PersonalDetails {
                account_id: AccountId(1),
                display_name: String::new(),
                login: "one@test.com".into(),
            },
        );
        assert_eq!(author_name(&details, AccountId(1)), "one@test.com");
        assert_eq!(author_name(&details, AccountId(9)), "Account 9");
    }

    #[test]
    fn translate_resolves_chat_hint() {
        let t = default_translate();
        assert_eq!(t(CHAT_MESSAGE_HINT), "Chat message");
        assert_eq!(t("unknown.key"), "unknown.key");
    }

    #[test]
    fn time_label_is_hours_and_minutes() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();
        assert_eq!(time_label(created), "09:05");
    }
}
