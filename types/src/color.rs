//! Color tokens bound to graph slots.

use std::fmt;

/// A canonical color token: trimmed, upper-cased, never empty.
///
/// Any non-empty text is accepted; the device decides what it means (named
/// colors like `BLUE` or numeric color codes both work).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorToken(String);

impl ColorToken {
    /// Token used when no color was assigned or the operator submitted nothing.
    pub const FALLBACK: &'static str = "BLACK";

    /// Token shown in previews for equations that have no color yet.
    pub const PLACEHOLDER: &'static str = "color";

    /// Canonicalize operator input. Blank input maps to [`ColorToken::FALLBACK`].
    #[must_use]
    pub fn canonicalize(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::fallback()
        } else {
            Self(trimmed.to_uppercase())
        }
    }

    #[must_use]
    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_owned())
    }

    /// Preview-only token for equations without a color; kept verbatim.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColorToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Dense per-equation color assignments; `None` means "not yet assigned".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    slots: Vec<Option<ColorToken>>,
}

impl ColorMap {
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ColorToken> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Color for `index`, or the fallback token when unassigned.
    #[must_use]
    pub fn resolved(&self, index: usize) -> ColorToken {
        self.get(index).cloned().unwrap_or_else(ColorToken::fallback)
    }

    /// Record `color` at `index`, returning the previous assignment.
    ///
    /// Returns `None` without storing anything when `index` is out of range.
    pub fn set(&mut self, index: usize, color: ColorToken) -> Option<ColorToken> {
        let slot = self.slots.get_mut(index)?;
        slot.replace(color)
    }

    /// Number of equations that have a color.
    #[must_use]
    pub fn assigned(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
