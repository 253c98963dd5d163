//! Unit tests for `AppError` display format and conversions.

use company_communicator::AppError;

#[test]
fn display_prefixes_name_the_category() {
    let cases = [
        (AppError::Config("x".into()), "config: x"),
        (AppError::Db("x".into()), "db: x"),
        (AppError::NotFound("x".into()), "not found: x"),
        (AppError::MalformedEncoding("x".into()), "malformed encoding: x"),
        (
            AppError::InvalidRecurrenceCombination("x".into()),
            "invalid recurrence combination: x",
        ),
        (AppError::InvalidTransition("x".into()), "invalid transition: x"),
        (AppError::Io("x".into()), "io: x"),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn error_message_no_trailing_period() {
    let err = AppError::NotFound("notification n-1 not found".into());
    let s = err.to_string();
    assert!(!s.ends_with('.'), "error message must not end with a period: {s}");
}

#[test]
fn json_error_converts_to_malformed_encoding() {
    let err = serde_json::from_str::<Vec<String>>("nope").expect_err("invalid json");
    assert!(matches!(AppError::from(err), AppError::MalformedEncoding(_)));
}

#[test]
fn toml_error_converts_to_config() {
    let err = toml::from_str::<toml::Value>("= broken").expect_err("invalid toml");
    assert!(matches!(AppError::from(err), AppError::Config(msg) if msg.starts_with("invalid config")));
}

#[test]
fn io_error_converts_to_io() {
    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(AppError::from(err), AppError::Io(msg) if msg == "gone"));
}

#[test]
fn app_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(AppError::Db("locked".into()));
    assert_eq!(err.to_string(), "db: locked");
}
