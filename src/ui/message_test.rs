use super::*;

// =============================================================
// Severity parsing
// =============================================================

#[test]
fn severity_parses_all_four_values() {
    assert_eq!("success".parse::<Severity>(), Ok(Severity::Success));
    assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
    assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
    assert_eq!("info".parse::<Severity>(), Ok(Severity::Info));
}

#[test]
fn severity_rejects_unknown_values() {
    for bad in ["", "debug", "SUCCESS", "fatal", "warn"] {
        assert_eq!(
            bad.parse::<Severity>(),
            Err(MessageError::InvalidSeverity(bad.to_owned()))
        );
    }
}

#[test]
fn severity_round_trips_through_as_str() {
    for severity in [
        Severity::Success,
        Severity::Warning,
        Severity::Error,
        Severity::Info,
    ] {
        assert_eq!(severity.as_str().parse::<Severity>(), Ok(severity));
    }
}

// =============================================================
// Options merging
// =============================================================

#[test]
fn default_options_match_contract() {
    let options = MessageOptions::default();
    assert_eq!(options.duration_ms, 2000);
    assert!(!options.show_close);
    assert!(options.center);
    assert!(!options.grouping);
}

#[test]
fn empty_overrides_yield_defaults() {
    let toast = info("hello", Overrides::default());
    assert_eq!(toast.options, MessageOptions::default());
}

#[test]
fn overrides_win_on_set_fields_only() {
    let toast = info(
        "hello",
        Overrides {
            duration_ms: Some(5000),
            center: Some(false),
            ..Overrides::default()
        },
    );

    assert_eq!(toast.options.duration_ms, 5000);
    assert!(!toast.options.center);
    // Unset fields keep their defaults.
    assert!(!toast.options.show_close);
    assert!(!toast.options.grouping);
}

// =============================================================
// show
// =============================================================

#[test]
fn show_builds_one_toast_with_merged_config() {
    let toast = show(
        "saved",
        "success",
        Overrides {
            show_close: Some(true),
            ..Overrides::default()
        },
    )
    .expect("valid severity");

    assert_eq!(toast.text, "saved");
    assert_eq!(toast.severity, Severity::Success);
    assert!(toast.options.show_close);
    assert_eq!(toast.options.duration_ms, 2000);
}

#[test]
fn show_fails_hard_on_invalid_severity() {
    let result = show("boom", "catastrophic", Overrides::default());
    assert_eq!(
        result,
        Err(MessageError::InvalidSeverity("catastrophic".to_owned()))
    );
}

// =============================================================
// Convenience entry points
// =============================================================

#[test]
fn shorthands_fix_the_severity() {
    assert_eq!(success("m", Overrides::default()).severity, Severity::Success);
    assert_eq!(warning("m", Overrides::default()).severity, Severity::Warning);
    assert_eq!(error("m", Overrides::default()).severity, Severity::Error);
    assert_eq!(info("m", Overrides::default()).severity, Severity::Info);
}

#[test]
fn shorthands_forward_overrides() {
    let toast = error(
        "m",
        Overrides {
            duration_ms: Some(10),
            ..Overrides::default()
        },
    );
    assert_eq!(toast.options.duration_ms, 10);
}
