//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS` and are safe to
//! re-run on every startup.

use sqlx::SqlitePool;

use crate::Result;

/// Apply the notification table definition to the connected database.
///
/// Audience lists are stored as JSON-array text columns.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS notification (
    id                    TEXT PRIMARY KEY NOT NULL,
    title                 TEXT NOT NULL,
    image_link            TEXT,
    summary               TEXT,
    author                TEXT,
    button_title          TEXT,
    button_link           TEXT,
    button_title2         TEXT,
    button_link2          TEXT,
    is_scheduled          INTEGER NOT NULL DEFAULT 0,
    schedule_date         TEXT,
    is_recurrence         INTEGER NOT NULL DEFAULT 0,
    repeats               TEXT,
    repeat_for            INTEGER NOT NULL DEFAULT 0,
    repeat_frequency      TEXT,
    week_selection        TEXT,
    repeat_start_date     TEXT,
    repeat_end_date       TEXT,
    teams_in_string       TEXT,
    rosters_in_string     TEXT,
    ad_groups_in_string   TEXT,
    all_users             INTEGER NOT NULL DEFAULT 0,
    created_by            TEXT NOT NULL,
    created_date          TEXT NOT NULL,
    is_draft              INTEGER NOT NULL DEFAULT 1,
    sent_date             TEXT,
    sending_started_date  TEXT,
    succeeded             INTEGER NOT NULL DEFAULT 0 CHECK(succeeded >= 0),
    failed                INTEGER NOT NULL DEFAULT 0 CHECK(failed >= 0),
    throttled             INTEGER NOT NULL DEFAULT 0 CHECK(throttled >= 0),
    message_acknowledged  INTEGER NOT NULL DEFAULT 0 CHECK(message_acknowledged >= 0),
    total_message_count   INTEGER NOT NULL DEFAULT 0 CHECK(total_message_count >= 0),
    is_completed          INTEGER NOT NULL DEFAULT 0,
    message_version       TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_notification_draft ON notification(is_draft, is_scheduled);
CREATE INDEX IF NOT EXISTS idx_notification_sent ON notification(sent_date);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
