//! Serialization and invariant tests for the notification record model.

use chrono::{TimeZone, Utc};
use company_communicator::models::notification::{
    MessageTab, NotificationRecord, RepeatFrequency, Repeats, SendState, DEFAULT_MESSAGE_VERSION,
};

fn draft() -> NotificationRecord {
    NotificationRecord::new_draft("Quarterly update".into(), "admin@contoso.com".into())
}

// ── Construction ─────────────────────────────────────

#[test]
fn new_draft_has_defaults() {
    let record = draft();

    assert!(!record.id.is_empty());
    assert!(record.is_draft);
    assert!(record.teams.is_empty());
    assert!(record.rosters.is_empty());
    assert!(record.ad_groups.is_empty());
    assert!(!record.all_users);
    assert_eq!(record.sent_date, None);
    assert_eq!(record.sending_started_date, None);
    assert_eq!(record.succeeded, 0);
    assert_eq!(record.message_version, DEFAULT_MESSAGE_VERSION);
}

#[test]
fn new_drafts_get_distinct_ids() {
    assert_ne!(draft().id, draft().id);
}

// ── Buttons ──────────────────────────────────────────

#[test]
fn button_requires_title_and_link() {
    let mut record = draft();
    record.button_title = Some("Read more".into());
    assert_eq!(record.primary_button(), None);

    record.button_link = Some(String::new());
    assert_eq!(record.primary_button(), None);

    record.button_link = Some("https://contoso.com".into());
    let button = record.primary_button().expect("primary button present");
    assert_eq!(button.title, "Read more");
    assert_eq!(button.link, "https://contoso.com");
}

#[test]
fn buttons_are_independent() {
    let mut record = draft();
    record.button_title2 = Some("Survey".into());
    record.button_link2 = Some("https://contoso.com/survey".into());

    assert_eq!(record.primary_button(), None);
    assert!(record.secondary_button().is_some());
}

// ── Lifecycle state ──────────────────────────────────

#[test]
fn state_follows_lifecycle() {
    let mut record = draft();
    assert_eq!(record.state(), SendState::Draft);

    record.is_scheduled = true;
    assert_eq!(record.state(), SendState::Scheduled);

    record.is_draft = false;
    record.sending_started_date = Some(Utc::now());
    assert_eq!(record.state(), SendState::Dispatching);

    record.is_completed = true;
    record.sent_date = Some(Utc::now());
    assert_eq!(record.state(), SendState::Completed);
}

#[test]
fn tabs_partition_records() {
    let mut record = draft();
    assert!(MessageTab::Drafts.includes(&record));
    assert!(!MessageTab::Scheduled.includes(&record));

    record.is_scheduled = true;
    assert!(MessageTab::Scheduled.includes(&record));
    assert!(!MessageTab::Drafts.includes(&record));

    record.is_draft = false;
    assert!(MessageTab::Sent.includes(&record));
    assert!(!MessageTab::Scheduled.includes(&record));
}

// ── Recurrence tags ──────────────────────────────────

#[test]
fn repeats_tags_serialize_as_text() {
    let values = [
        (Repeats::EveryWeekday, "\"EveryWeekday\""),
        (Repeats::Daily, "\"Daily\""),
        (Repeats::Weekly, "\"Weekly\""),
        (Repeats::Monthly, "\"Monthly\""),
        (Repeats::Yearly, "\"Yearly\""),
        (Repeats::Custom, "\"Custom\""),
        (Repeats::Other("Fortnightly".into()), "\"Fortnightly\""),
    ];

    for (variant, expected) in values {
        let json = serde_json::to_string(&variant).expect("serialize");
        assert_eq!(json, expected, "Repeats::{variant:?}");
        let back: Repeats = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, variant);
    }
}

#[test]
fn unknown_frequency_is_preserved() {
    let frequency: RepeatFrequency = serde_json::from_str("\"Hour\"").expect("deserialize");
    assert_eq!(frequency, RepeatFrequency::Other("Hour".into()));
    assert_eq!(frequency.as_str(), "Hour");
}

// ── Record JSON ──────────────────────────────────────

#[test]
fn record_deserializes_with_optional_fields_missing() {
    let json = r#"{
        "id": "n-1",
        "title": "Hello",
        "created_by": "admin",
        "created_date": "2024-01-01T09:00:00Z",
        "is_draft": true,
        "teams": ["Sales", "HR"]
    }"#;

    let record: NotificationRecord = serde_json::from_str(json).expect("deserialize");
    assert_eq!(record.teams, vec!["Sales".to_owned(), "HR".to_owned()]);
    assert!(record.rosters.is_empty());
    assert!(!record.is_recurrence);
    assert_eq!(record.repeats, None);
    assert_eq!(
        record.created_date,
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().expect("valid")
    );
}

#[test]
fn record_round_trips_through_json() {
    let mut record = draft();
    record.is_recurrence = true;
    record.repeats = Some(Repeats::Custom);
    record.repeat_frequency = Some(RepeatFrequency::Week);
    record.week_selection = Some("0,2,4".into());
    record.rosters = vec!["Engineering".into()];

    let json = serde_json::to_string(&record).expect("serialize");
    let back: NotificationRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, record);
}
