//! Dialog and listing view models.
//!
//! Views are the caller that composes the independent display functions
//! over one record snapshot. They are what the presentation layer renders.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::warn;

use crate::card::{build_card, CardContent, CardDescription};
use crate::config::DisplayConfig;
use crate::display::locale::{format_date, format_timestamp};
use crate::display::{describe, resolve, tally, validate_recurrence, AudienceView, DeliverySummary};
use crate::models::notification::{MessageButton, NotificationRecord, SendState};

/// Audience block shared by the confirmation and status dialogs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AudienceSection {
    /// Resolved audience.
    pub audience: AudienceView,
    /// Section heading.
    pub heading: &'static str,
    /// Names joined for display.
    pub names: String,
    /// Warning shown for the all-users audience.
    pub warning: Option<&'static str>,
}

impl AudienceSection {
    fn build(record: &NotificationRecord, display: &DisplayConfig) -> Self {
        let audience = resolve(record);
        Self {
            heading: audience.heading(),
            names: audience.display_names(&display.list),
            warning: audience.warning(),
            audience,
        }
    }
}

impl Display for AudienceSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.heading)?;
        if !self.names.is_empty() {
            writeln!(f, "  {}", self.names)?;
        }
        if let Some(warning) = self.warning {
            writeln!(f, "  {warning}")?;
        }
        Ok(())
    }
}

/// "Send this message?" dialog shown before dispatching a draft.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfirmationView {
    /// Notification identifier.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Who will receive the message.
    pub recipients: AudienceSection,
    /// Card preview.
    pub card: CardDescription,
}

impl ConfirmationView {
    /// Build the confirmation view for a draft.
    #[must_use]
    pub fn build(record: &NotificationRecord, display: &DisplayConfig) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            recipients: AudienceSection::build(record, display),
            card: build_card(&CardContent::from_record(record)),
        }
    }
}

impl Display for ConfirmationView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Send this message?")?;
        writeln!(f, "Title: {}", self.title)?;
        write!(f, "{}", self.recipients)
    }
}

/// Delivery status dialog for a dispatched notification.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusView {
    /// Notification identifier.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Derived lifecycle state.
    pub state: SendState,
    /// Formatted dispatch start.
    pub sending_started: Option<String>,
    /// Formatted completion time.
    pub sent: Option<String>,
    /// Whether the message recurs.
    pub is_recurrence: bool,
    /// Recurrence sentence, when recurring.
    pub recurrence: Option<String>,
    /// Outcome counters and duration.
    pub tally: DeliverySummary,
    /// Who received the message.
    pub recipients: AudienceSection,
    /// Secondary button shown as an "open" link.
    pub secondary_button: Option<MessageButton>,
    /// Card preview.
    pub card: CardDescription,
}

impl StatusView {
    /// Build the status view; safe at any lifecycle state.
    #[must_use]
    pub fn build(record: &NotificationRecord, display: &DisplayConfig) -> Self {
        if let Err(err) = validate_recurrence(record) {
            warn!(id = %record.id, %err, "recurrence rendered literally");
        }

        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            state: record.state(),
            sending_started: record
                .sending_started_date
                .map(|ts| format_timestamp(ts, display.date_style)),
            sent: record
                .sent_date
                .map(|ts| format_timestamp(ts, display.date_style)),
            is_recurrence: record.is_recurrence,
            recurrence: describe(record, display.date_style),
            tally: tally(record),
            recipients: AudienceSection::build(record, display),
            secondary_button: record.secondary_button(),
            card: build_card(&CardContent::from_record(record)),
        }
    }
}

impl Display for StatusView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(
            f,
            "Delivery: {} --> {}",
            self.sending_started.as_deref().unwrap_or("-"),
            self.sent.as_deref().unwrap_or("-")
        )?;
        if let Some(duration) = self.tally.duration {
            writeln!(f, "Duration: {duration}")?;
        }
        match &self.recurrence {
            Some(sentence) => writeln!(f, "Recurring: Yes, {sentence}")?,
            None => writeln!(f, "Recurring: No")?,
        }
        if let Some(button) = &self.secondary_button {
            writeln!(f, "{}: {}", button.title, button.link)?;
        }
        writeln!(
            f,
            "Status: Sent ({}) | Not delivered ({}) | Throttled ({}) | Read ({})",
            self.tally.succeeded, self.tally.failed, self.tally.throttled, self.tally.acknowledged
        )?;
        write!(f, "{}", self.recipients)
    }
}

/// One row of a Drafts, Scheduled or Sent listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListingRow {
    /// Notification identifier.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Derived lifecycle state.
    pub state: SendState,
    /// Formatted creation date.
    pub created: String,
    /// Formatted schedule time, for scheduled drafts.
    pub scheduled_for: Option<String>,
    /// Formatted completion time, once sent.
    pub sent: Option<String>,
    /// Outcome counters, once dispatched.
    pub tally: Option<DeliverySummary>,
}

impl ListingRow {
    /// Build a listing row from a record.
    #[must_use]
    pub fn from_record(record: &NotificationRecord, display: &DisplayConfig) -> Self {
        let style = display.date_style;
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            state: record.state(),
            created: format_date(record.created_date, style),
            scheduled_for: record
                .schedule_date
                .filter(|_| record.is_scheduled)
                .map(|ts| format_timestamp(ts, style)),
            sent: record.sent_date.map(|ts| format_timestamp(ts, style)),
            tally: (!record.is_draft).then(|| tally(record)),
        }
    }
}

impl Display for ListingRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {}  created {}", self.id, self.title, self.created)?;
        if let Some(scheduled) = &self.scheduled_for {
            write!(f, "  scheduled {scheduled}")?;
        }
        if let Some(sent) = &self.sent {
            write!(f, "  sent {sent}")?;
        }
        if let Some(summary) = &self.tally {
            write!(
                f,
                "  [{}/{} ok, {} failed, {} throttled]",
                summary.succeeded, summary.total, summary.failed, summary.throttled
            )?;
        }
        Ok(())
    }
}
