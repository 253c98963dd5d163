//! Delivery tally: outcome counters plus elapsed send duration.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::models::notification::NotificationRecord;

/// Elapsed time between dispatch start and completion, whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SendDuration {
    seconds: u64,
}

impl SendDuration {
    /// Wrap a number of elapsed seconds.
    #[must_use]
    pub fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Total elapsed seconds.
    #[must_use]
    pub fn as_secs(&self) -> u64 {
        self.seconds
    }
}

/// `HH:MM:SS`; hours keep counting past 24 instead of rolling into days.
impl Display for SendDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl Serialize for SendDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Snapshot of a send's outcome counters and duration.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DeliverySummary {
    /// Recipients that received the message.
    pub succeeded: u32,
    /// Recipients that could not be reached.
    pub failed: u32,
    /// Attempts deferred by rate limiting.
    pub throttled: u32,
    /// Recipients that read the message.
    pub acknowledged: u32,
    /// Expected recipient count.
    pub total: u32,
    /// Whether every recipient has been processed.
    pub is_completed: bool,
    /// Present only once both timestamps are set and ordered.
    pub duration: Option<SendDuration>,
}

/// Compute the delivery summary for a record at any lifecycle state.
#[must_use]
pub fn tally(record: &NotificationRecord) -> DeliverySummary {
    let duration = match (record.sending_started_date, record.sent_date) {
        (Some(started), Some(sent)) if sent >= started => (sent - started)
            .num_seconds()
            .try_into()
            .ok()
            .map(SendDuration::from_secs),
        _ => None,
    };

    DeliverySummary {
        succeeded: record.succeeded,
        failed: record.failed,
        throttled: record.throttled,
        acknowledged: record.message_acknowledged,
        total: record.total_message_count,
        is_completed: record.is_completed,
        duration,
    }
}
