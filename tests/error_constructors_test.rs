use kwlog::error::KwLogError;
use kwlog::logger::SessionResult;

#[test]
fn error_constructors_group_1() {
    assert!(matches!(
        KwLogError::config("x"),
        KwLogError::Config { .. }
    ));
    assert!(matches!(
        KwLogError::communication("x"),
        KwLogError::Communication { .. }
    ));
    assert!(matches!(
        KwLogError::timeout("x"),
        KwLogError::Timeout { .. }
    ));
}

#[test]
fn error_constructors_group_2() {
    let ser = KwLogError::Serialization {
        message: "s".into(),
    };
    assert!(matches!(ser, KwLogError::Serialization { .. }));
    assert!(matches!(KwLogError::io("x"), KwLogError::Io { .. }));
    assert!(matches!(
        KwLogError::storage("x"),
        KwLogError::Storage { .. }
    ));
    assert!(matches!(
        KwLogError::capacity("x"),
        KwLogError::Capacity { .. }
    ));
    assert!(matches!(
        KwLogError::validation("f", "m"),
        KwLogError::Validation { .. }
    ));
}

#[test]
fn display_messages() {
    let e = KwLogError::validation("field", "bad");
    let s = format!("{}", e);
    assert!(s.contains("Validation error"));
}

#[test]
fn outcome_codes_follow_error_kind() {
    assert_eq!(KwLogError::timeout("t").session_result().code(), 1);
    assert_eq!(KwLogError::storage("s").session_result().code(), 2);
    assert_eq!(SessionResult::UserTerminated.code(), 0);
}
