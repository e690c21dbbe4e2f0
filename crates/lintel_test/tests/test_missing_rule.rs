//! This file's name resolves the rule `missing_rule`, which is deliberately
//! absent from the registry: construction itself must fail, loudly.

mod common;

use common::REGISTRY;
use lintel_test::{HarnessError, RuleTester};

#[test]
fn unregistered_rule_fails_at_construction() {
    let err = RuleTester::builder(&REGISTRY).from_caller().unwrap_err();
    assert!(
        matches!(&err, HarnessError::RuleNotFound { rule, registry }
            if rule == "missing_rule" && registry == "demo_rules")
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"no such rule `missing_rule` in registry `demo_rules`"
    );
}

#[test]
fn declared_rule_names_take_the_same_lookup_path() {
    let err = RuleTester::builder(&REGISTRY).for_rule("ghost").unwrap_err();
    assert!(matches!(err, HarnessError::RuleNotFound { .. }));

    let err = RuleTester::builder(&REGISTRY)
        .for_rule("not a name")
        .unwrap_err();
    assert!(matches!(err, HarnessError::InvalidRuleName { .. }));

    let tester = RuleTester::builder(&REGISTRY)
        .for_rule("banned_word_rule")
        .unwrap();
    assert!(tester.is_runnable());
}
