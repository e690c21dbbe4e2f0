//! Drives a rule's fixture cases through the tester in bulk.
//!
//! Fixture trees follow the `ok` / `ng` convention: case directories under
//! `ok` are expected to lint clean, case directories under `ng` are expected
//! to produce findings. Each case directory is run as the workdir of one
//! isolated invocation.

use crate::context::RunResult;
use crate::error::HarnessError;
use crate::flags::{Isolation, RunnerKind};
use crate::tester::RuleTester;

pub const OK_SUBDIR: &str = "ok";
pub const NG_SUBDIR: &str = "ng";

fn finding_count(result: &RunResult) -> usize {
    result.result.as_array().map_or(1, Vec::len)
}

/// Run every `ok` case; fail on the first one that produces findings.
pub fn verify_ok_cases(tester: &RuleTester, kind: RunnerKind) -> Result<(), HarnessError> {
    let rule = tester.rule()?.name().to_string();
    for case in tester.list_test_data_dirs(OK_SUBDIR)? {
        let result = tester.run_with(&case, Isolation::Isolated, kind)?;
        if !result.is_clean() {
            return Err(HarnessError::CaseExpectedClean {
                rule,
                case,
                count: finding_count(&result),
            });
        }
    }
    Ok(())
}

/// Run every `ng` case; fail on the first one that comes back clean.
pub fn verify_ng_cases(tester: &RuleTester, kind: RunnerKind) -> Result<(), HarnessError> {
    let rule = tester.rule()?.name().to_string();
    for case in tester.list_test_data_dirs(NG_SUBDIR)? {
        let result = tester.run_with(&case, Isolation::Isolated, kind)?;
        if result.is_clean() {
            return Err(HarnessError::CaseExpectedFindings { rule, case });
        }
    }
    Ok(())
}
