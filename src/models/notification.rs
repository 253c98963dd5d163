//! Notification record model for one composed broadcast.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card-schema version stamped on newly composed notifications.
pub const DEFAULT_MESSAGE_VERSION: &str = "1.0";

/// How often a recurring notification repeats.
///
/// Tags that are not recognised are preserved verbatim in [`Repeats::Other`]
/// so that they round-trip through storage unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Repeats {
    /// Monday through Friday.
    EveryWeekday,
    /// Every day.
    Daily,
    /// Once a week.
    Weekly,
    /// Once a month.
    Monthly,
    /// Once a year.
    Yearly,
    /// Interval driven by `repeat_for` and `repeat_frequency`.
    Custom,
    /// Unrecognised tag kept as literal text.
    Other(String),
}

impl Repeats {
    /// Tag text as persisted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::EveryWeekday => "EveryWeekday",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
            Self::Custom => "Custom",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Repeats {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "EveryWeekday" => Self::EveryWeekday,
            "Daily" => Self::Daily,
            "Weekly" => Self::Weekly,
            "Monthly" => Self::Monthly,
            "Yearly" => Self::Yearly,
            "Custom" => Self::Custom,
            _ => Self::Other(tag),
        }
    }
}

impl From<Repeats> for String {
    fn from(repeats: Repeats) -> Self {
        match repeats {
            Repeats::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for Repeats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval unit for a [`Repeats::Custom`] recurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepeatFrequency {
    /// Every `repeat_for` days.
    Day,
    /// Every `repeat_for` weeks on the selected weekdays.
    Week,
    /// Every `repeat_for` months.
    Month,
    /// Unrecognised tag kept as literal text.
    Other(String),
}

impl RepeatFrequency {
    /// Tag text as persisted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for RepeatFrequency {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Day" => Self::Day,
            "Week" => Self::Week,
            "Month" => Self::Month,
            _ => Self::Other(tag),
        }
    }
}

impl From<RepeatFrequency> for String {
    fn from(frequency: RepeatFrequency) -> Self {
        match frequency {
            RepeatFrequency::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for RepeatFrequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state derived from a record's flags and timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SendState {
    /// Composed but not yet dispatched or scheduled.
    Draft,
    /// Draft waiting for its schedule date.
    Scheduled,
    /// Dispatch has begun; counters are accumulating.
    Dispatching,
    /// Every recipient has been processed.
    Completed,
}

/// Listing tab a record appears under in the message overview.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageTab {
    /// Unscheduled drafts.
    Drafts,
    /// Drafts waiting for their schedule date.
    Scheduled,
    /// Dispatched or completed sends.
    Sent,
}

impl MessageTab {
    /// Whether `record` is listed under this tab.
    #[must_use]
    pub fn includes(self, record: &NotificationRecord) -> bool {
        match self {
            Self::Drafts => record.is_draft && !record.is_scheduled,
            Self::Scheduled => record.is_draft && record.is_scheduled,
            Self::Sent => !record.is_draft,
        }
    }
}

/// An open-URL button attached to the message card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageButton {
    /// Button caption.
    pub title: String,
    /// Target URL.
    pub link: String,
}

impl MessageButton {
    /// A button exists only when both its caption and link are non-empty.
    fn from_parts(title: Option<&str>, link: Option<&str>) -> Option<Self> {
        match (title, link) {
            (Some(title), Some(link)) if !title.is_empty() && !link.is_empty() => Some(Self {
                title: title.to_owned(),
                link: link.to_owned(),
            }),
            _ => None,
        }
    }
}

/// Per-outcome delivery counters written by the delivery pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryCounters {
    /// Recipients that received the message.
    pub succeeded: u32,
    /// Recipients that could not be reached.
    pub failed: u32,
    /// Attempts deferred by rate limiting.
    pub throttled: u32,
    /// Recipients that acknowledged (read) the message.
    pub message_acknowledged: u32,
}

/// One composed broadcast with its configuration and delivery outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NotificationRecord {
    /// Unique record identifier.
    pub id: String,
    /// Card title; required.
    pub title: String,
    /// Hero image URL.
    #[serde(default)]
    pub image_link: Option<String>,
    /// Body text.
    #[serde(default)]
    pub summary: Option<String>,
    /// Author line.
    #[serde(default)]
    pub author: Option<String>,
    /// Primary button caption.
    #[serde(default)]
    pub button_title: Option<String>,
    /// Primary button URL.
    #[serde(default)]
    pub button_link: Option<String>,
    /// Secondary button caption.
    #[serde(default)]
    pub button_title2: Option<String>,
    /// Secondary button URL.
    #[serde(default)]
    pub button_link2: Option<String>,

    /// Whether the send waits for `schedule_date`.
    #[serde(default)]
    pub is_scheduled: bool,
    /// Scheduled dispatch time; meaningful only when `is_scheduled`.
    #[serde(default)]
    pub schedule_date: Option<DateTime<Utc>>,

    /// Whether the message recurs.
    #[serde(default)]
    pub is_recurrence: bool,
    /// Recurrence pattern.
    #[serde(default)]
    pub repeats: Option<Repeats>,
    /// Number of interval units between occurrences.
    #[serde(default)]
    pub repeat_for: u32,
    /// Interval unit; meaningful only for [`Repeats::Custom`].
    #[serde(default)]
    pub repeat_frequency: Option<RepeatFrequency>,
    /// Weekday digits `0` (Monday) to `6` (Sunday) for weekly custom recurrence.
    #[serde(default)]
    pub week_selection: Option<String>,
    /// First occurrence.
    #[serde(default)]
    pub repeat_start_date: Option<DateTime<Utc>>,
    /// Last occurrence.
    #[serde(default)]
    pub repeat_end_date: Option<DateTime<Utc>>,

    /// Team identifiers whose General channel receives the post.
    #[serde(default)]
    pub teams: Vec<String>,
    /// Teams whose members receive the message in personal chat.
    #[serde(default)]
    pub rosters: Vec<String>,
    /// Active-Directory groups whose members receive the message.
    #[serde(default)]
    pub ad_groups: Vec<String>,
    /// Whether every user with the app installed receives the message.
    #[serde(default)]
    pub all_users: bool,

    /// Author account; immutable after creation.
    pub created_by: String,
    /// Creation timestamp; immutable after creation.
    pub created_date: DateTime<Utc>,
    /// True until the send is dispatched.
    pub is_draft: bool,
    /// Completion timestamp, set once.
    #[serde(default)]
    pub sent_date: Option<DateTime<Utc>>,
    /// Dispatch start timestamp, set once.
    #[serde(default)]
    pub sending_started_date: Option<DateTime<Utc>>,

    /// Recipients that received the message.
    #[serde(default)]
    pub succeeded: u32,
    /// Recipients that could not be reached.
    #[serde(default)]
    pub failed: u32,
    /// Attempts deferred by rate limiting.
    #[serde(default)]
    pub throttled: u32,
    /// Recipients that read the message.
    #[serde(default)]
    pub message_acknowledged: u32,
    /// Expected recipient count, fixed once dispatch begins.
    #[serde(default)]
    pub total_message_count: u32,
    /// Whether every recipient has been processed.
    #[serde(default)]
    pub is_completed: bool,

    /// Card-schema version tag; opaque to this crate.
    #[serde(default)]
    pub message_version: String,
}

impl NotificationRecord {
    /// Construct a new draft with a generated identifier and no audience.
    #[must_use]
    pub fn new_draft(title: String, created_by: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            image_link: None,
            summary: None,
            author: None,
            button_title: None,
            button_link: None,
            button_title2: None,
            button_link2: None,
            is_scheduled: false,
            schedule_date: None,
            is_recurrence: false,
            repeats: None,
            repeat_for: 0,
            repeat_frequency: None,
            week_selection: None,
            repeat_start_date: None,
            repeat_end_date: None,
            teams: Vec::new(),
            rosters: Vec::new(),
            ad_groups: Vec::new(),
            all_users: false,
            created_by,
            created_date: Utc::now(),
            is_draft: true,
            sent_date: None,
            sending_started_date: None,
            succeeded: 0,
            failed: 0,
            throttled: 0,
            message_acknowledged: 0,
            total_message_count: 0,
            is_completed: false,
            message_version: DEFAULT_MESSAGE_VERSION.to_owned(),
        }
    }

    /// Primary button, if both caption and link are set.
    #[must_use]
    pub fn primary_button(&self) -> Option<MessageButton> {
        MessageButton::from_parts(self.button_title.as_deref(), self.button_link.as_deref())
    }

    /// Secondary button, if both caption and link are set.
    #[must_use]
    pub fn secondary_button(&self) -> Option<MessageButton> {
        MessageButton::from_parts(self.button_title2.as_deref(), self.button_link2.as_deref())
    }

    /// Current delivery counters.
    #[must_use]
    pub fn counters(&self) -> DeliveryCounters {
        DeliveryCounters {
            succeeded: self.succeeded,
            failed: self.failed,
            throttled: self.throttled,
            message_acknowledged: self.message_acknowledged,
        }
    }

    /// Derive the lifecycle state without assuming later-state fields exist.
    #[must_use]
    pub fn state(&self) -> SendState {
        if self.is_draft {
            if self.is_scheduled {
                SendState::Scheduled
            } else {
                SendState::Draft
            }
        } else if self.is_completed || self.sent_date.is_some() {
            SendState::Completed
        } else {
            SendState::Dispatching
        }
    }
}
