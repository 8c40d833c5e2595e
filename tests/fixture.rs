#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read fixture {name}: {err}"))
}

/// Fixture text with `\r\n` normalized and a single trailing newline removed.
pub fn read_trimmed(name: &str) -> String {
    let mut normalized = read_fixture(name).replace("\r\n", "\n");
    if normalized.ends_with('\n') {
        normalized.pop();
    }
    normalized
}

pub fn read_lines(name: &str) -> Vec<String> {
    let normalized = read_trimmed(name);
    if normalized.is_empty() {
        Vec::new()
    } else {
        normalized
            .split('\n')
            .map(|line| line.to_string())
            .collect()
    }
}
