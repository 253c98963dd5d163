//! Notification repository for `SQLite` persistence.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::models::notification::{
    DeliveryCounters, MessageTab, NotificationRecord, RepeatFrequency, Repeats,
};
use crate::{AppError, Result};

use super::audience_codec::{decode_list_or_empty, encode_list};
use super::db::Database;
use super::source::RecordSource;

const SELECT_COLUMNS: &str = "SELECT id, title, image_link, summary, author, button_title, \
     button_link, button_title2, button_link2, is_scheduled, schedule_date, is_recurrence, \
     repeats, repeat_for, repeat_frequency, week_selection, repeat_start_date, repeat_end_date, \
     teams_in_string, rosters_in_string, ad_groups_in_string, all_users, created_by, \
     created_date, is_draft, sent_date, sending_started_date, succeeded, failed, throttled, \
     message_acknowledged, total_message_count, is_completed, message_version \
     FROM notification";

/// Repository wrapper around `SQLite` for notification records.
#[derive(Clone)]
pub struct NotificationRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: String,
    title: String,
    image_link: Option<String>,
    summary: Option<String>,
    author: Option<String>,
    button_title: Option<String>,
    button_link: Option<String>,
    button_title2: Option<String>,
    button_link2: Option<String>,
    is_scheduled: i64,
    schedule_date: Option<String>,
    is_recurrence: i64,
    repeats: Option<String>,
    repeat_for: i64,
    repeat_frequency: Option<String>,
    week_selection: Option<String>,
    repeat_start_date: Option<String>,
    repeat_end_date: Option<String>,
    teams_in_string: Option<String>,
    rosters_in_string: Option<String>,
    ad_groups_in_string: Option<String>,
    all_users: i64,
    created_by: String,
    created_date: String,
    is_draft: i64,
    sent_date: Option<String>,
    sending_started_date: Option<String>,
    succeeded: i64,
    failed: i64,
    throttled: i64,
    message_acknowledged: i64,
    total_message_count: i64,
    is_completed: i64,
    message_version: String,
}

impl NotificationRow {
    /// Convert a database row into the domain model.
    ///
    /// Undecodable audience columns fall back to empty lists.
    fn into_record(self) -> Result<NotificationRecord> {
        let teams = decode_list_or_empty(self.teams_in_string.as_deref(), "teams", &self.id);
        let rosters = decode_list_or_empty(self.rosters_in_string.as_deref(), "rosters", &self.id);
        let ad_groups =
            decode_list_or_empty(self.ad_groups_in_string.as_deref(), "ad_groups", &self.id);

        Ok(NotificationRecord {
            title: self.title,
            image_link: self.image_link,
            summary: self.summary,
            author: self.author,
            button_title: self.button_title,
            button_link: self.button_link,
            button_title2: self.button_title2,
            button_link2: self.button_link2,
            is_scheduled: self.is_scheduled != 0,
            schedule_date: parse_optional_ts("schedule_date", self.schedule_date.as_deref())?,
            is_recurrence: self.is_recurrence != 0,
            repeats: self.repeats.map(Repeats::from),
            repeat_for: parse_count("repeat_for", self.repeat_for)?,
            repeat_frequency: self.repeat_frequency.map(RepeatFrequency::from),
            week_selection: self.week_selection,
            repeat_start_date: parse_optional_ts(
                "repeat_start_date",
                self.repeat_start_date.as_deref(),
            )?,
            repeat_end_date: parse_optional_ts("repeat_end_date", self.repeat_end_date.as_deref())?,
            teams,
            rosters,
            ad_groups,
            all_users: self.all_users != 0,
            created_by: self.created_by,
            created_date: parse_ts("created_date", &self.created_date)?,
            is_draft: self.is_draft != 0,
            sent_date: parse_optional_ts("sent_date", self.sent_date.as_deref())?,
            sending_started_date: parse_optional_ts(
                "sending_started_date",
                self.sending_started_date.as_deref(),
            )?,
            succeeded: parse_count("succeeded", self.succeeded)?,
            failed: parse_count("failed", self.failed)?,
            throttled: parse_count("throttled", self.throttled)?,
            message_acknowledged: parse_count("message_acknowledged", self.message_acknowledged)?,
            total_message_count: parse_count("total_message_count", self.total_message_count)?,
            is_completed: self.is_completed != 0,
            message_version: self.message_version,
            id: self.id,
        })
    }
}

fn parse_ts(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Db(format!("invalid {field}: {e}")))
}

fn parse_optional_ts(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|s| parse_ts(field, s)).transpose()
}

fn parse_count(field: &str, raw: i64) -> Result<u32> {
    u32::try_from(raw).map_err(|_| AppError::Db(format!("invalid {field}: {raw}")))
}

fn ts_str(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|dt| dt.to_rfc3339())
}

/// Escape `LIKE` metacharacters so user text matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn tab_filter(tab: MessageTab) -> &'static str {
    match tab {
        MessageTab::Drafts => {
            "is_draft = 1 AND is_scheduled = 0 ORDER BY created_date DESC"
        }
        MessageTab::Scheduled => {
            "is_draft = 1 AND is_scheduled = 1 ORDER BY schedule_date ASC"
        }
        MessageTab::Sent => {
            "is_draft = 0 ORDER BY COALESCE(sent_date, sending_started_date, created_date) DESC"
        }
    }
}

impl NotificationRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new notification record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the database insert fails.
    pub async fn create(&self, record: &NotificationRecord) -> Result<NotificationRecord> {
        sqlx::query(
            "INSERT INTO notification (id, title, image_link, summary, author, button_title,
             button_link, button_title2, button_link2, is_scheduled, schedule_date,
             is_recurrence, repeats, repeat_for, repeat_frequency, week_selection,
             repeat_start_date, repeat_end_date, teams_in_string, rosters_in_string,
             ad_groups_in_string, all_users, created_by, created_date, is_draft, sent_date,
             sending_started_date, succeeded, failed, throttled, message_acknowledged,
             total_message_count, is_completed, message_version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
                     ?31, ?32, ?33, ?34)",
        )
        .bind(&record.id)
        .bind(&record.title)
        .bind(&record.image_link)
        .bind(&record.summary)
        .bind(&record.author)
        .bind(&record.button_title)
        .bind(&record.button_link)
        .bind(&record.button_title2)
        .bind(&record.button_link2)
        .bind(i64::from(record.is_scheduled))
        .bind(ts_str(record.schedule_date))
        .bind(i64::from(record.is_recurrence))
        .bind(record.repeats.as_ref().map(|r| r.as_str().to_owned()))
        .bind(i64::from(record.repeat_for))
        .bind(record.repeat_frequency.as_ref().map(|f| f.as_str().to_owned()))
        .bind(&record.week_selection)
        .bind(ts_str(record.repeat_start_date))
        .bind(ts_str(record.repeat_end_date))
        .bind(encode_list(&record.teams)?)
        .bind(encode_list(&record.rosters)?)
        .bind(encode_list(&record.ad_groups)?)
        .bind(i64::from(record.all_users))
        .bind(&record.created_by)
        .bind(record.created_date.to_rfc3339())
        .bind(i64::from(record.is_draft))
        .bind(ts_str(record.sent_date))
        .bind(ts_str(record.sending_started_date))
        .bind(i64::from(record.succeeded))
        .bind(i64::from(record.failed))
        .bind(i64::from(record.throttled))
        .bind(i64::from(record.message_acknowledged))
        .bind(i64::from(record.total_message_count))
        .bind(i64::from(record.is_completed))
        .bind(&record.message_version)
        .execute(self.db.as_ref())
        .await?;

        debug!(id = %record.id, "notification created");
        Ok(record.clone())
    }

    /// Retrieve a notification by identifier.
    ///
    /// Returns `Ok(None)` if the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails or a stored value is invalid.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<NotificationRecord>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row: Option<NotificationRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;

        row.map(NotificationRow::into_record).transpose()
    }

    /// Retrieve a notification by identifier, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the record does not exist.
    pub async fn get_required(&self, id: &str) -> Result<NotificationRecord> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("notification {id} not found")))
    }

    /// List records shown under `tab`, optionally filtered by a title substring.
    ///
    /// The title match is a literal, case-insensitive substring for ASCII text.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_by_tab(
        &self,
        tab: MessageTab,
        search: Option<&str>,
    ) -> Result<Vec<NotificationRecord>> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(escape_like);
        // The tab filter carries its own ORDER BY, so the search clause goes first.
        let query = format!(
            "{SELECT_COLUMNS} WHERE (?1 IS NULL OR title LIKE '%' || ?1 || '%' ESCAPE '\\') \
             AND {}",
            tab_filter(tab)
        );
        let rows: Vec<NotificationRow> = sqlx::query_as(&query)
            .bind(search)
            .fetch_all(self.db.as_ref())
            .await?;

        rows.into_iter().map(NotificationRow::into_record).collect()
    }

    /// Replace the editable content, schedule, recurrence and audience of a draft.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the record does not exist, or
    /// `AppError::InvalidTransition` if it has already been dispatched.
    pub async fn update_draft(&self, record: &NotificationRecord) -> Result<NotificationRecord> {
        let result = sqlx::query(
            "UPDATE notification SET title = ?1, image_link = ?2, summary = ?3, author = ?4,
             button_title = ?5, button_link = ?6, button_title2 = ?7, button_link2 = ?8,
             is_scheduled = ?9, schedule_date = ?10, is_recurrence = ?11, repeats = ?12,
             repeat_for = ?13, repeat_frequency = ?14, week_selection = ?15,
             repeat_start_date = ?16, repeat_end_date = ?17, teams_in_string = ?18,
             rosters_in_string = ?19, ad_groups_in_string = ?20, all_users = ?21
             WHERE id = ?22 AND is_draft = 1",
        )
        .bind(&record.title)
        .bind(&record.image_link)
        .bind(&record.summary)
        .bind(&record.author)
        .bind(&record.button_title)
        .bind(&record.button_link)
        .bind(&record.button_title2)
        .bind(&record.button_link2)
        .bind(i64::from(record.is_scheduled))
        .bind(ts_str(record.schedule_date))
        .bind(i64::from(record.is_recurrence))
        .bind(record.repeats.as_ref().map(|r| r.as_str().to_owned()))
        .bind(i64::from(record.repeat_for))
        .bind(record.repeat_frequency.as_ref().map(|f| f.as_str().to_owned()))
        .bind(&record.week_selection)
        .bind(ts_str(record.repeat_start_date))
        .bind(ts_str(record.repeat_end_date))
        .bind(encode_list(&record.teams)?)
        .bind(encode_list(&record.rosters)?)
        .bind(encode_list(&record.ad_groups)?)
        .bind(i64::from(record.all_users))
        .bind(&record.id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.explain_rejected(&record.id, "edit").await);
        }
        self.get_required(&record.id).await
    }

    /// Move a draft into dispatch: clears `is_draft`, stamps
    /// `sending_started_date` and fixes the expected recipient count.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the record does not exist, or
    /// `AppError::InvalidTransition` if dispatch has already begun.
    pub async fn mark_sending_started(
        &self,
        id: &str,
        total_message_count: u32,
    ) -> Result<NotificationRecord> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE notification
             SET is_draft = 0, sending_started_date = ?1, total_message_count = ?2
             WHERE id = ?3 AND is_draft = 1",
        )
        .bind(&now)
        .bind(i64::from(total_message_count))
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.explain_rejected(id, "dispatch").await);
        }
        info!(id, total_message_count, "notification dispatch started");
        self.get_required(id).await
    }

    /// Publish delivery counters for an in-flight send.
    ///
    /// All counters are written in one statement so readers never observe a
    /// partial update. Counters never decrease: a lower value is ignored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the record does not exist, or
    /// `AppError::InvalidTransition` if it is still a draft.
    pub async fn update_counters(
        &self,
        id: &str,
        counters: DeliveryCounters,
    ) -> Result<NotificationRecord> {
        let result = sqlx::query(
            "UPDATE notification
             SET succeeded = MAX(succeeded, ?1), failed = MAX(failed, ?2),
                 throttled = MAX(throttled, ?3),
                 message_acknowledged = MAX(message_acknowledged, ?4)
             WHERE id = ?5 AND is_draft = 0",
        )
        .bind(i64::from(counters.succeeded))
        .bind(i64::from(counters.failed))
        .bind(i64::from(counters.throttled))
        .bind(i64::from(counters.message_acknowledged))
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.explain_rejected(id, "update counters of").await);
        }
        self.get_required(id).await
    }

    /// Mark a dispatched send as completed, stamping `sent_date` once.
    ///
    /// Completion requires every recipient to be accounted for:
    /// `succeeded + failed` must equal `total_message_count`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the record does not exist, or
    /// `AppError::InvalidTransition` if it is still a draft or recipients
    /// are still outstanding.
    pub async fn mark_completed(&self, id: &str) -> Result<NotificationRecord> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE notification SET is_completed = 1, sent_date = COALESCE(sent_date, ?1)
             WHERE id = ?2 AND is_draft = 0 AND succeeded + failed = total_message_count",
        )
        .bind(&now)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(match self.get_by_id(id).await {
                Ok(Some(record)) if !record.is_draft => AppError::InvalidTransition(format!(
                    "cannot complete notification {id}: {} of {} recipients processed",
                    u64::from(record.succeeded) + u64::from(record.failed),
                    record.total_message_count
                )),
                _ => self.explain_rejected(id, "complete").await,
            });
        }
        info!(id, "notification send completed");
        self.get_required(id).await
    }

    /// Delete a notification.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the record does not exist.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM notification WHERE id = ?1")
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("notification {id} not found")));
        }
        Ok(())
    }

    /// Build the error for a guarded update that matched no rows.
    async fn explain_rejected(&self, id: &str, action: &str) -> AppError {
        match self.get_by_id(id).await {
            Ok(Some(record)) => AppError::InvalidTransition(format!(
                "cannot {action} notification {id} in state {:?}",
                record.state()
            )),
            Ok(None) => AppError::NotFound(format!("notification {id} not found")),
            Err(err) => err,
        }
    }
}

impl RecordSource for NotificationRepo {
    fn fetch_record<'a>(
        &'a self,
        id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<NotificationRecord>> + Send + 'a>> {
        Box::pin(self.get_required(id))
    }
}
