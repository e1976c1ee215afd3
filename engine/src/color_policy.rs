//! Optional restriction on the colors the operator may type.
//!
//! The session itself accepts any token; this policy is checked by the
//! [`App`](crate::App) before a submission reaches the session.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// Any text; blank input falls back to the default color.
    #[default]
    Any,
    /// Only integer color codes in `min..=max`.
    NumericRange { min: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorPolicyError {
    #[error("color must be a number from {min} to {max}")]
    NotNumeric { min: u32, max: u32 },
    #[error("color {value} is outside {min}-{max}")]
    OutOfRange { value: u32, min: u32, max: u32 },
}

impl ColorPolicy {
    /// Build a numeric range, swapping the bounds if they are reversed.
    #[must_use]
    pub fn numeric_range(a: u32, b: u32) -> Self {
        Self::NumericRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn check(self, text: &str) -> Result<(), ColorPolicyError> {
        match self {
            Self::Any => Ok(()),
            Self::NumericRange { min, max } => {
                let value: u32 = text
                    .trim()
                    .parse()
                    .map_err(|_| ColorPolicyError::NotNumeric { min, max })?;
                if (min..=max).contains(&value) {
                    Ok(())
                } else {
                    Err(ColorPolicyError::OutOfRange { value, min, max })
                }
            }
        }
    }

    /// Short hint for the input box title.
    #[must_use]
    pub fn hint(self) -> String {
        match self {
            Self::Any => "name or code, blank for BLACK".to_owned(),
            Self::NumericRange { min, max } => format!("{min}-{max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorPolicy, ColorPolicyError};

    #[test]
    fn any_accepts_everything() {
        assert!(ColorPolicy::Any.check("").is_ok());
        assert!(ColorPolicy::Any.check("navy").is_ok());
    }

    #[test]
    fn numeric_range_is_inclusive() {
        let policy = ColorPolicy::numeric_range(10, 24);
        assert!(policy.check("10").is_ok());
        assert!(policy.check(" 24 ").is_ok());
        assert_eq!(
            policy.check("25"),
            Err(ColorPolicyError::OutOfRange {
                value: 25,
                min: 10,
                max: 24
            })
        );
    }

    #[test]
    fn numeric_range_rejects_names_and_blank() {
        let policy = ColorPolicy::numeric_range(24, 10);
        assert_eq!(policy, ColorPolicy::NumericRange { min: 10, max: 24 });
        assert!(matches!(
            policy.check("blue"),
            Err(ColorPolicyError::NotNumeric { .. })
        ));
        assert!(policy.check("").is_err());
    }
}
