//! Non-interactive subcommands and input loading shared with the TUI.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use ticonv_engine::{CurationSession, Settings, persistence};
use ticonv_types::FunctionKind;

pub struct LoadedSession {
    pub session: CurationSession,
    pub rejected: usize,
}

/// Load the input file, append rejects, and build a fresh session.
pub fn load_session(settings: &Settings) -> Result<LoadedSession> {
    let parsed = persistence::load_input(&settings.input, settings.plaintext)
        .with_context(|| format!("loading equations from {}", settings.input.display()))?;
    persistence::append_rejects(&settings.rejects, &parsed.rejects)
        .context("saving rejected lines")?;

    Ok(LoadedSession {
        rejected: parsed.rejects.len(),
        session: CurationSession::new(parsed.equations),
    })
}

/// Generate every program with fallback colors.
pub fn convert(settings: &Settings) -> Result<String> {
    let loaded = load_session(settings)?;
    let chunks = loaded.session.generate();
    let written = persistence::write_programs(&settings.output, &chunks)
        .context("writing program files")?;
    tracing::info!(files = written.len(), "Batch conversion finished");

    let mut summary = format!(
        "Created {} program files from {} equations.",
        written.len(),
        loaded.session.total()
    );
    if loaded.rejected > 0 {
        let _ = write!(
            summary,
            " {} rejected lines appended to {}.",
            loaded.rejected,
            settings.rejects.display()
        );
    }
    Ok(summary)
}

/// Parse report: one line per equation with its kind, then the rejects.
///
/// Read-only; the rejects file is not touched.
pub fn check(settings: &Settings) -> Result<String> {
    let parsed = persistence::load_input(&settings.input, settings.plaintext)
        .with_context(|| format!("loading equations from {}", settings.input.display()))?;

    let mut report = String::new();
    for (idx, equation) in parsed.equations.iter().enumerate() {
        let kind = FunctionKind::classify(equation.expression());
        let _ = writeln!(report, "{:>4}  {:<13}  {equation}", idx + 1, kind.label());
    }
    for reject in &parsed.rejects {
        let _ = writeln!(report, "reject line {}: {}", reject.line_number, reject.text);
    }
    let _ = writeln!(
        report,
        "{} equations, {} rejected",
        parsed.equations.len(),
        parsed.rejects.len()
    );
    Ok(report)
}

pub fn plaintext(input: &Path, output: &Path) -> Result<usize> {
    persistence::write_plaintext(input, output)
        .with_context(|| format!("converting {} to plaintext", input.display()))
}
