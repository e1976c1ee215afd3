//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ticonv_engine::{OutputLayout, Settings};
use ticonv_types::Equation;

/// Parse lines that are known to be valid equations.
pub fn equations(lines: &[&str]) -> Vec<Equation> {
    lines
        .iter()
        .map(|line| Equation::parse(line).expect("valid equation"))
        .collect()
}

/// `count` distinct valid equation lines: `y = 1x`, `y = 2x`, ...
pub fn numbered_lines(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("y = {i}x")).collect()
}

/// Settings rooted in `dir`: input, rejects and programs all live there.
pub fn settings_in(dir: &Path) -> Settings {
    Settings {
        input: dir.join("input.txt"),
        rejects: dir.join("badeqn.txt"),
        output: OutputLayout {
            dir: dir.join("programs"),
            ..OutputLayout::default()
        },
        ..Settings::default()
    }
}

pub fn write_input(settings: &Settings, content: &str) {
    fs::write(&settings.input, content).expect("write input");
}

/// Program files in the output directory, sorted by name.
pub fn program_files(settings: &Settings) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(&settings.output.dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .map(|entry| entry.expect("dir entry").path())
        .collect();
    files.sort();
    files
}
