//! Input loading and output persistence.
//!
//! This module handles:
//! - Reading the equation file (optionally through the plaintext filter)
//! - Appending rejected lines to the rejects file
//! - Writing one program file per chunk, atomically

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use ticonv_types::{ParsedInput, ProgramChunk, RejectedLine, parse_lines, to_plaintext};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

impl PersistError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::CreateDir { path, .. } => {
                path
            }
        }
    }
}

/// Where program files go: `<dir>/<prefix><n>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub prefix: String,
    /// Without the leading dot; empty means no extension.
    pub extension: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "program".to_owned(),
            extension: "txt".to_owned(),
        }
    }
}

impl OutputLayout {
    #[must_use]
    pub fn file_name(&self, number: usize) -> String {
        if self.extension.is_empty() {
            format!("{}{number}", self.prefix)
        } else {
            format!("{}{number}.{}", self.prefix, self.extension)
        }
    }

    #[must_use]
    pub fn path_for(&self, number: usize) -> PathBuf {
        self.dir.join(self.file_name(number))
    }
}

/// Read raw input lines, running each through the plaintext filter if asked.
pub fn read_lines(path: &Path, plaintext: bool) -> Result<Vec<String>, PersistError> {
    let content = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = content
        .lines()
        .map(|line| {
            if plaintext {
                to_plaintext(line)
            } else {
                line.to_owned()
            }
        })
        .collect();
    Ok(lines)
}

/// Read and classify the input file.
pub fn load_input(path: &Path, plaintext: bool) -> Result<ParsedInput, PersistError> {
    let lines = read_lines(path, plaintext)?;
    let parsed = parse_lines(&lines);
    tracing::info!(
        path = %path.display(),
        equations = parsed.equations.len(),
        rejects = parsed.rejects.len(),
        "Loaded input"
    );
    for reject in &parsed.rejects {
        tracing::debug!(line = reject.line_number, text = %reject.text, "Rejected line");
    }
    Ok(parsed)
}

/// Append rejected lines verbatim, one per line. No file is touched when
/// there is nothing to append.
pub fn append_rejects(path: &Path, rejects: &[RejectedLine]) -> Result<(), PersistError> {
    if rejects.is_empty() {
        return Ok(());
    }
    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = String::new();
    for reject in rejects {
        buf.push_str(&reject.text);
        buf.push('\n');
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(buf.as_bytes()).map_err(write_err)?;
    Ok(())
}

/// Write every chunk to its program file and return the paths written.
///
/// All chunk texts are rendered before the first write; each file is replaced
/// atomically. The output directory is created if missing.
pub fn write_programs(
    layout: &OutputLayout,
    chunks: &[ProgramChunk],
) -> Result<Vec<PathBuf>, PersistError> {
    let rendered: Vec<(PathBuf, String)> = chunks
        .iter()
        .map(|chunk| (layout.path_for(chunk.number()), chunk.to_text()))
        .collect();
    if rendered.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(&layout.dir).map_err(|source| PersistError::CreateDir {
        path: layout.dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(rendered.len());
    for (path, text) in rendered {
        if let Err(source) = ticonv_utils::atomic_write(&path, text.as_bytes()) {
            tracing::warn!(path = %path.display(), "Failed to write program: {source}");
            return Err(PersistError::Write { path, source });
        }
        tracing::debug!(path = %path.display(), "Wrote program");
        written.push(path);
    }
    Ok(written)
}

/// Write plaintext-filtered lines, one per non-blank input line.
pub fn write_plaintext(input: &Path, output: &Path) -> Result<usize, PersistError> {
    let lines: Vec<String> = read_lines(input, true)?
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect();
    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    ticonv_utils::atomic_write(output, text.as_bytes()).map_err(|source| {
        PersistError::Write {
            path: output.to_path_buf(),
            source,
        }
    })?;
    Ok(lines.len())
}
