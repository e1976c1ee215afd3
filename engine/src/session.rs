//! Curation session: step through equations one at a time and record colors.
//!
//! The session owns the accepted equations, the dense color map, and a cursor.
//! `cursor < total` means an equation is under review; `cursor == total` means
//! every equation has been visited. Transitions that violate a precondition
//! return [`PreconditionViolation`] and leave the session untouched.

use thiserror::Error;

use ticonv_types::{
    ColorMap, ColorToken, Equation, FunctionKind, InstructionPair, ProgramChunk, Slot,
    render_equation, render_programs,
};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// An equation at `cursor` is awaiting a decision.
    Active { cursor: usize },
    /// Every equation has been submitted or skipped.
    Done,
}

impl SessionState {
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A transition was requested in a state that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionViolation {
    #[error("all equations have been processed")]
    SessionComplete,
    #[error("already at the first equation")]
    AtFirstEquation,
}

/// The equation currently under review, with everything the UI shows for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentEquation<'a> {
    pub equation: &'a Equation,
    pub kind: FunctionKind,
    /// Rendered with the recorded color, or the placeholder token when unset.
    pub preview: InstructionPair,
    pub recorded_color: Option<&'a ColorToken>,
}

/// Read-only projection of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView<'a> {
    pub cursor: usize,
    pub total: usize,
    /// Equations submitted or skipped so far (equal to `cursor`).
    pub processed: usize,
    /// Equations with a recorded color.
    pub assigned: usize,
    /// `None` once the session is done.
    pub current: Option<CurrentEquation<'a>>,
}

impl SessionView<'_> {
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CurationSession {
    equations: Vec<Equation>,
    colors: ColorMap,
    cursor: usize,
}

impl CurationSession {
    #[must_use]
    pub fn new(equations: Vec<Equation>) -> Self {
        let colors = ColorMap::with_len(equations.len());
        Self {
            equations,
            colors,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.cursor < self.equations.len() {
            SessionState::Active {
                cursor: self.cursor,
            }
        } else {
            SessionState::Done
        }
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.equations.len()
    }

    #[must_use]
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    #[must_use]
    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    #[must_use]
    pub fn current(&self) -> Option<&Equation> {
        self.equations.get(self.cursor)
    }

    /// Recorded color for the equation under the cursor, if any.
    #[must_use]
    pub fn current_color(&self) -> Option<&ColorToken> {
        self.colors.get(self.cursor)
    }

    /// Record a color for the current equation and advance.
    ///
    /// Blank input records [`ColorToken::FALLBACK`]. Resubmitting after an
    /// undo overwrites the earlier color.
    pub fn submit(&mut self, text: &str) -> Result<SessionState, PreconditionViolation> {
        self.ensure_active()?;
        let color = ColorToken::canonicalize(text);
        tracing::debug!(cursor = self.cursor, color = %color, "Color submitted");
        self.colors.set(self.cursor, color);
        self.cursor += 1;
        Ok(self.state())
    }

    /// Advance without touching the color map.
    pub fn skip(&mut self) -> Result<SessionState, PreconditionViolation> {
        self.ensure_active()?;
        tracing::debug!(cursor = self.cursor, "Equation skipped");
        self.cursor += 1;
        Ok(self.state())
    }

    /// Step back one equation. Works from `Done` too; recorded colors are kept.
    pub fn undo(&mut self) -> Result<SessionState, PreconditionViolation> {
        if self.cursor == 0 {
            return Err(PreconditionViolation::AtFirstEquation);
        }
        self.cursor -= 1;
        tracing::debug!(cursor = self.cursor, "Stepped back");
        Ok(self.state())
    }

    /// Render every equation into program chunks. Allowed in any state.
    #[must_use]
    pub fn generate(&self) -> Vec<ProgramChunk> {
        render_programs(&self.equations, &self.colors)
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        let current = self.current().map(|equation| {
            let recorded_color = self.colors.get(self.cursor);
            let preview_color = recorded_color
                .cloned()
                .unwrap_or_else(ColorToken::placeholder);
            CurrentEquation {
                equation,
                kind: FunctionKind::classify(equation.expression()),
                preview: render_equation(
                    equation.expression(),
                    equation.constraint(),
                    &preview_color,
                    Slot::for_position(self.cursor),
                ),
                recorded_color,
            }
        });

        SessionView {
            cursor: self.cursor,
            total: self.equations.len(),
            processed: self.cursor,
            assigned: self.colors.assigned(),
            current,
        }
    }

    fn ensure_active(&self) -> Result<(), PreconditionViolation> {
        if self.cursor < self.equations.len() {
            Ok(())
        } else {
            Err(PreconditionViolation::SessionComplete)
        }
    }
}
