//! Equation grammar: `y = expression {constraint}`.
//!
//! The scanner is hand-written so that validating a line and extracting its
//! parts are the same operation. A line either yields an [`Equation`] or a
//! [`RejectReason`]; there is no separate "is valid" check that could
//! disagree with extraction.
//!
//! The grammar is deliberately non-total: once `y = expression` (and an
//! optional `{...}` body) has been matched, anything after it is ignored.

use std::fmt;

use thiserror::Error;

/// Dependent-variable identifier that must open every equation line.
pub const DEPENDENT_VAR: char = 'y';

/// Independent-variable identifier used inside expressions and constraints.
pub const INDEPENDENT_VAR: char = 'x';

const CONSTRAINT_OPEN: char = '{';
const CONSTRAINT_CLOSE: char = '}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("line does not match `y = expression {{constraint}}`")]
    NoMatch,
}

/// A successfully parsed equation line.
///
/// `expression` is trimmed, non-empty and never contains `{`. `constraint`
/// is either empty or the trimmed body of the brace-delimited clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equation {
    expression: String,
    constraint: String,
}

impl Equation {
    pub fn parse(line: &str) -> Result<Self, RejectReason> {
        let rest = line
            .trim_start()
            .strip_prefix(DEPENDENT_VAR)
            .ok_or(RejectReason::NoMatch)?;
        let rest = rest
            .trim_start()
            .strip_prefix('=')
            .ok_or(RejectReason::NoMatch)?;

        let (expression, tail) = match rest.find(CONSTRAINT_OPEN) {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(RejectReason::NoMatch);
        }

        Ok(Self {
            expression: expression.to_owned(),
            constraint: constraint_body(tail).unwrap_or_default().to_owned(),
        })
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn constraint(&self) -> &str {
        &self.constraint
    }

    #[must_use]
    pub fn has_constraint(&self) -> bool {
        !self.constraint.is_empty()
    }

    /// Serialize back into a line that re-parses to `self`.
    #[must_use]
    pub fn to_line(&self) -> String {
        if self.has_constraint() {
            format!(
                "{DEPENDENT_VAR} = {}{CONSTRAINT_OPEN}{}{CONSTRAINT_CLOSE}",
                self.expression, self.constraint
            )
        } else {
            format!("{DEPENDENT_VAR} = {}", self.expression)
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DEPENDENT_VAR} = {}", self.expression)?;
        if self.has_constraint() {
            write!(f, " {CONSTRAINT_OPEN}{}{CONSTRAINT_CLOSE}", self.constraint)?;
        }
        Ok(())
    }
}

/// Body of a leading `{...}` clause, if one is present and non-empty.
fn constraint_body(tail: &str) -> Option<&str> {
    let body = tail.strip_prefix(CONSTRAINT_OPEN)?;
    let end = body.find(CONSTRAINT_CLOSE)?;
    let body = &body[..end];
    if body.is_empty() {
        return None;
    }
    Some(body.trim())
}

/// A line that failed the grammar, kept verbatim for manual handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based position in the source.
    pub line_number: usize,
    pub text: String,
    pub reason: RejectReason,
}

/// Result of classifying a batch of raw lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub equations: Vec<Equation>,
    pub rejects: Vec<RejectedLine>,
}

/// Parse every non-blank line. Rejects never abort the batch.
pub fn parse_lines<I, S>(lines: I) -> ParsedInput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedInput::default();
    for (idx, raw) in lines.into_iter().enumerate() {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            continue;
        }
        match Equation::parse(raw) {
            Ok(equation) => parsed.equations.push(equation),
            Err(reason) => parsed.rejects.push(RejectedLine {
                line_number: idx + 1,
                text: raw.to_owned(),
                reason,
            }),
        }
    }
    parsed
}
