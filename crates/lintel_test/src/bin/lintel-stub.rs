//! A miniature stand-in for the `lintel` CLI, used by this crate's own
//! integration tests to exercise the CLI adapter's spawn, isolation, and
//! parse paths hermetically.
//!
//! Behavior: walks the workdir (the final argument), flags every file
//! containing the `lintel:deny` marker, honors `LINTEL_SKIP_LIST`, prints a
//! JSON findings array on stdout, and exits 1 when findings exist. With
//! `LINTEL_STUB_DUMP_ENV` set it instead reports its own environment, which
//! is how the tests observe isolation.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::process::ExitCode;

use serde_json::json;
use walkdir::WalkDir;

const DENY_MARKER: &str = "lintel:deny";
const DENY_RULE: &str = "deny_marker";

fn main() -> ExitCode {
    if std::env::var_os("LINTEL_STUB_DUMP_ENV").is_some() {
        let env: std::collections::BTreeMap<String, String> = std::env::vars().collect();
        println!("{}", json!([{ "rule": "stub_env", "env": env }]));
        return ExitCode::SUCCESS;
    }

    let workdir = match std::env::args().last().map(PathBuf::from) {
        Some(workdir) if workdir.is_dir() => workdir,
        _ => {
            eprintln!("usage: lintel-stub [ARGS..] WORKDIR");
            return ExitCode::from(2);
        }
    };

    let skip_list: Vec<String> = std::env::var("LINTEL_SKIP_LIST")
        .unwrap_or_default()
        .split(',')
        .filter(|rule| !rule.is_empty())
        .map(ToString::to_string)
        .collect();

    let mut findings = Vec::new();
    if !skip_list.iter().any(|rule| rule == DENY_RULE) {
        for entry in WalkDir::new(&workdir).sort_by_file_name() {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(contents) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            if contents.contains(DENY_MARKER) {
                findings.push(json!({
                    "rule": DENY_RULE,
                    "path": entry.path(),
                    "message": format!("found `{DENY_MARKER}` marker"),
                }));
            }
        }
    }

    let failed = !findings.is_empty();
    println!("{}", serde_json::Value::Array(findings));
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
