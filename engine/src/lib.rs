//! Core engine for ticonv: curation state machine, configuration, persistence.
//!
//! This crate contains the App state without TUI dependencies. The TUI reads
//! from [`App`] and issues transitions; it never mutates the session directly.

use std::path::PathBuf;

mod color_policy;
mod config;
mod input;
pub mod persistence;
pub mod session;

pub use color_policy::{ColorPolicy, ColorPolicyError};
pub use config::{
    AppConfig, CONFIG_ENV_VAR, ColorsConfig, ConfigError, InputConfig, OutputConfig, Settings,
    SettingsOverrides, TiconvConfig, UiOptions, config_path, expand_env_vars, ticonv_dir,
};
pub use input::ColorDraft;
pub use persistence::{OutputLayout, PersistError};
pub use session::{
    CurationSession, CurrentEquation, PreconditionViolation, SessionState, SessionView,
};

pub use ticonv_types::{ColorToken, Equation, FunctionKind, RejectedLine};

/// Severity of the status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    kind: StatusKind,
    text: String,
}

/// Interactive application state: session, color draft and status line.
#[derive(Debug)]
pub struct App {
    session: CurationSession,
    draft: ColorDraft,
    status: Option<StatusMessage>,
    output: OutputLayout,
    color_policy: ColorPolicy,
    ui_options: UiOptions,
    source: Option<PathBuf>,
    rejected: usize,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(session: CurationSession, settings: &Settings) -> Self {
        let mut app = Self {
            session,
            draft: ColorDraft::default(),
            status: None,
            output: settings.output.clone(),
            color_policy: settings.color_policy,
            ui_options: settings.ui,
            source: None,
            rejected: 0,
            should_quit: false,
        };
        if app.session.total() == 0 {
            app.set_status(StatusKind::Warning, "No valid equations in input");
        }
        app
    }

    /// Record where the equations came from and how many lines were rejected.
    #[must_use]
    pub fn with_source(mut self, source: PathBuf, rejected: usize) -> Self {
        self.source = Some(source);
        self.rejected = rejected;
        if rejected > 0 && self.status.is_none() {
            let noun = if rejected == 1 { "line" } else { "lines" };
            self.set_status(
                StatusKind::Info,
                format!("{rejected} {noun} did not match and were saved as rejects"),
            );
        }
        self
    }

    #[must_use]
    pub fn session(&self) -> &CurationSession {
        &self.session
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        self.session.view()
    }

    #[must_use]
    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    #[must_use]
    pub fn output_layout(&self) -> &OutputLayout {
        &self.output
    }

    #[must_use]
    pub fn color_policy(&self) -> ColorPolicy {
        self.color_policy
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.session.state().is_done()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // Status line

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    #[must_use]
    pub fn status_kind(&self) -> Option<StatusKind> {
        self.status.as_ref().map(|s| s.kind)
    }

    pub fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: message.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // Draft editing

    #[must_use]
    pub fn draft(&self) -> &ColorDraft {
        &self.draft
    }

    #[must_use]
    pub fn draft_text(&self) -> &str {
        self.draft.text()
    }

    pub fn draft_mut(&mut self) -> &mut ColorDraft {
        &mut self.draft
    }

    // Session transitions

    /// Submit the draft as the current equation's color.
    ///
    /// The color policy is checked first; a rejected draft stays in place so
    /// the operator can fix it.
    pub fn submit_draft(&mut self) {
        if self.is_done() {
            self.report_violation(PreconditionViolation::SessionComplete);
            return;
        }
        if let Err(err) = self.color_policy.check(self.draft.text()) {
            self.set_status(StatusKind::Error, err.to_string());
            return;
        }

        let text = self.draft.take_text();
        match self.session.submit(&text) {
            Ok(_) => self.after_transition(),
            Err(violation) => self.report_violation(violation),
        }
    }

    pub fn skip(&mut self) {
        match self.session.skip() {
            Ok(_) => self.after_transition(),
            Err(violation) => self.report_violation(violation),
        }
    }

    pub fn undo(&mut self) {
        match self.session.undo() {
            Ok(_) => self.after_transition(),
            Err(violation) => self.report_violation(violation),
        }
    }

    /// Render all chunks and write them to disk.
    ///
    /// Returns the paths written; empty when there was nothing to generate or
    /// the write failed (the status line says which).
    pub fn generate(&mut self) -> Vec<PathBuf> {
        let chunks = self.session.generate();
        if chunks.is_empty() {
            self.set_status(StatusKind::Warning, "No equations to generate");
            return Vec::new();
        }

        match persistence::write_programs(&self.output, &chunks) {
            Ok(paths) => {
                tracing::info!(
                    files = paths.len(),
                    equations = self.session.total(),
                    "Generated programs"
                );
                let noun = if paths.len() == 1 { "file" } else { "files" };
                self.set_status(
                    StatusKind::Success,
                    format!(
                        "Created {} program {noun} in {}",
                        paths.len(),
                        self.output.dir.display()
                    ),
                );
                paths
            }
            Err(err) => {
                self.set_status(StatusKind::Error, err.to_string());
                Vec::new()
            }
        }
    }

    /// Prefill the draft with the recorded color of the equation now under
    /// the cursor, so revisited equations show their existing assignment.
    fn after_transition(&mut self) {
        self.clear_status();
        match self.session.current_color() {
            Some(color) => {
                let text = color.as_str().to_owned();
                self.draft.set_text(text);
            }
            None => self.draft.clear(),
        }
        if self.is_done() {
            self.set_status(StatusKind::Success, "All equations processed!");
        }
    }

    fn report_violation(&mut self, violation: PreconditionViolation) {
        tracing::debug!("Ignored transition: {violation}");
        self.set_status(StatusKind::Warning, capitalize(&violation.to_string()));
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
