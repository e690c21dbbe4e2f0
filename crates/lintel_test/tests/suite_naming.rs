//! This file's name does not match the `test_?<Name>.rs` convention, so a
//! tester built from it must land in the not-runnable state and reject every
//! operation without panicking.

mod common;

use std::path::Path;

use common::REGISTRY;
use lintel_test::{HarnessError, RuleTester};

fn assert_not_runnable(err: &HarnessError, expected_file: &str) {
    assert!(
        matches!(err, HarnessError::NotRunnable { file } if file == expected_file),
        "unexpected error: {err}"
    );
}

#[test]
fn mismatched_filename_disables_the_tester() {
    let tester = RuleTester::builder(&REGISTRY).from_caller().unwrap();
    assert!(!tester.is_runnable());
    assert_eq!(tester.rule_name(), None);

    let workdir = Path::new("unused");
    assert_not_runnable(&tester.run(workdir).unwrap_err(), "suite_naming.rs");
    assert_not_runnable(&tester.clear().unwrap_err(), "suite_naming.rs");
    assert_not_runnable(&tester.test_data_dir().unwrap_err(), "suite_naming.rs");
    assert_not_runnable(
        &tester.list_test_data_dirs("ok").unwrap_err(),
        "suite_naming.rs",
    );
    assert_not_runnable(&tester.rule().unwrap_err(), "suite_naming.rs");
}

#[test]
fn explicit_filenames_follow_the_same_convention() {
    let tester = RuleTester::builder(&REGISTRY)
        .from_file("helper.rs")
        .unwrap();
    assert!(!tester.is_runnable());

    let tester = RuleTester::builder(&REGISTRY)
        .from_file("TestBannedWordRule.rs");
    // The filename matches the convention, but with different casing the
    // captured name misses the registry: a hard failure, not a quiet skip.
    assert!(matches!(
        tester.unwrap_err(),
        HarnessError::RuleNotFound { .. }
    ));

    let tester = RuleTester::builder(&REGISTRY)
        .from_file("test_banned_word_rule.rs")
        .unwrap();
    assert!(tester.is_runnable());
}
