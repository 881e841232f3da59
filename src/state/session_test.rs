use super::*;
use serde_json::json;

fn session_with_user() -> Session {
    let mut session = Session::default();
    session.set_user(json!({"id": 1, "username": "alice"}));
    session
}

// =============================================================
// set_user / user
// =============================================================

#[test]
fn set_user_replaces_profile_with_object() {
    let session = session_with_user();
    assert_eq!(session.user().get("username"), Some(&json!("alice")));
    assert_eq!(session.user().get("id"), Some(&json!(1)));
}

#[test]
fn set_user_rejects_non_object_values() {
    let mut session = session_with_user();
    let before = session.user().clone();

    session.set_user(json!("alice"));
    session.set_user(json!(42));
    session.set_user(json!(null));
    session.set_user(json!([1, 2, 3]));
    session.set_user(json!(true));

    assert_eq!(session.user(), &before);
}

#[test]
fn set_user_replaces_rather_than_merges() {
    let mut session = session_with_user();
    session.set_user(json!({"nickname": "al"}));

    assert_eq!(session.user().get("nickname"), Some(&json!("al")));
    assert!(session.user().get("username").is_none());
}

#[test]
fn user_defaults_to_empty_map() {
    let session = Session::default();
    assert!(session.user().is_empty());
}

// =============================================================
// clear_user
// =============================================================

#[test]
fn clear_user_empties_profile() {
    let mut session = session_with_user();
    session.clear_user();
    assert!(session.user().is_empty());
}

#[test]
fn clear_user_leaves_token_in_place() {
    let mut session = session_with_user();
    session.set_token(json!("tok-1"));
    session.clear_user();

    assert!(session.user().is_empty());
    assert_eq!(session.token(), Some("tok-1"));
}

// =============================================================
// set_token / token
// =============================================================

#[test]
fn token_is_absent_until_set() {
    let session = Session::default();
    assert!(session.token().is_none());
}

#[test]
fn set_token_accepts_strings() {
    let mut session = Session::default();
    session.set_token(json!("tok-1"));
    assert_eq!(session.token(), Some("tok-1"));

    session.set_token(json!("tok-2"));
    assert_eq!(session.token(), Some("tok-2"));
}

#[test]
fn set_token_rejects_non_string_values() {
    let mut session = Session::default();
    session.set_token(json!("tok-1"));

    session.set_token(json!(42));
    session.set_token(json!(null));
    session.set_token(json!({"token": "tok-2"}));
    session.set_token(json!(["tok-2"]));

    assert_eq!(session.token(), Some("tok-1"));
}

// =============================================================
// persistence format
// =============================================================

#[test]
fn session_round_trips_through_json() {
    let mut session = session_with_user();
    session.set_token(json!("tok-1"));

    let raw = serde_json::to_string(&session).expect("serialize");
    let restored: Session = serde_json::from_str(&raw).expect("deserialize");

    assert_eq!(restored, session);
}

#[test]
fn session_deserializes_from_bare_object() {
    // Older stored entries may omit the token field entirely.
    let restored: Session =
        serde_json::from_str(r#"{"profile":{"username":"alice"}}"#).expect("deserialize");

    assert_eq!(restored.user().get("username"), Some(&json!("alice")));
    assert!(restored.token().is_none());
}
