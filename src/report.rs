use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u64);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionPayload {
    Text { body: String },
    Attachment { name: String, url: String },
    /// Membership changes, renames and the like. Never grouped with neighbours.
    SystemEvent { description: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryStatus {
    #[default]
    Sent,
    /// Optimistically added, not yet confirmed by the server.
    Pending,
    Error(String),
}

/// One entry of a report's timeline.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAction {
    pub id: ActionId,
    pub created: DateTime<Utc>,
    pub actor: AccountId,
    pub payload: ActionPayload,
    #[serde(default)]
    pub status: DeliveryStatus,
}

impl ReportAction {
    pub fn is_system(&self) -> bool {
        matches!(self.payload, ActionPayload::SystemEvent { .. })
    }

    pub fn cursor(&self) -> Cursor {
        Cursor {
            id: self.id,
            created: self.created,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u64,
    pub name: String,
    pub participants: Vec<AccountId>,
    /// Archived or closed reports get a placeholder footer instead of a composer.
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub account_id: AccountId,
    pub display_name: String,
    pub login: String,
}

/// A batch of actions returned by a loader.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub actions: Vec<ReportAction>,
    pub has_more: bool,
}

/// Boundary of the loaded range in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub id: ActionId,
    pub created: DateTime<Utc>,
}

/// Which end of the sequence holds the newest action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Index 0 is the oldest action; older pages are prepended.
    #[default]
    OldestFirst,
    /// Index 0 is the newest action (inverted chat list); older pages are appended.
    NewestFirst,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Older,
    Newer,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Older => "older",
            Direction::Newer => "newer",
        }
    }
}

impl SortOrder {
    /// Whether `direction` maps to the start (offset 0) of the content.
    pub fn is_leading(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (SortOrder::OldestFirst, Direction::Older) | (SortOrder::NewestFirst, Direction::Newer)
        )
    }
}
