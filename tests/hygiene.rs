//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the crate's production sources for antipatterns. Each
//! pattern has a budget (ideally zero). If you must add one, fix an existing
//! one first; budgets never grow.

use std::fs;
use std::path::{Path, PathBuf};

struct SourceFile {
    path: String,
    content: String,
}

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

/// Panics crash the page; silent discards hide host failures.
const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics" },
    Budget { pattern: ".expect(", max: 0, why: "panics" },
    Budget { pattern: "panic!(", max: 0, why: "panics" },
    Budget { pattern: "unreachable!(", max: 0, why: "panics" },
    Budget { pattern: "todo!(", max: 0, why: "stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "stub" },
    Budget { pattern: "let _ =", max: 0, why: "silently discards a result" },
    Budget { pattern: ".ok()", max: 0, why: "silently discards an error" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "dead code" },
];

/// Only these files may touch the DOM directly.
const BROWSER_MODULES: &[&str] = &["host.rs", "controller.rs"];

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

/// Collect production `.rs` files from `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(&src_dir(), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sources_are_found() {
    assert!(source_files().iter().any(|f| f.path.ends_with("lib.rs")), "no sources under {:?}", src_dir());
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = count_in_source(&files, budget.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            failures.push(format!(
                "`{}` ({}) budget exceeded: found {count}, max {}.\n{}",
                budget.pattern,
                budget.why,
                budget.max,
                format_hits(&hits)
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn browser_bindings_stay_in_host_layer() {
    let files = source_files();
    let offenders: Vec<_> = count_in_source(&files, "web_sys")
        .into_iter()
        .filter(|(path, _)| !BROWSER_MODULES.iter().any(|m| path.ends_with(m)))
        .collect();
    assert!(offenders.is_empty(), "web_sys used outside the host layer:\n{}", format_hits(&offenders));
}
