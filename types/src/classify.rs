//! Rough function-kind labels for display.
//!
//! Classification is substring-based over the lower-cased expression. Rules are
//! evaluated in declaration order and the first match wins, so `sin(x)^2` is
//! trigonometric, not quadratic.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Trigonometric,
    Quadratic,
    Logarithmic,
    Radical,
    Exponential,
    Linear,
}

type Rule = (fn(&str) -> bool, FunctionKind);

const RULES: &[Rule] = &[
    (is_trigonometric, FunctionKind::Trigonometric),
    (is_quadratic, FunctionKind::Quadratic),
    (is_logarithmic, FunctionKind::Logarithmic),
    (is_radical, FunctionKind::Radical),
    (is_exponential, FunctionKind::Exponential),
];

fn is_trigonometric(e: &str) -> bool {
    ["sin", "cos", "tan"].iter().any(|f| e.contains(f))
}

fn is_quadratic(e: &str) -> bool {
    e.contains("^2")
}

fn is_logarithmic(e: &str) -> bool {
    e.contains("log")
}

fn is_radical(e: &str) -> bool {
    e.contains("sqrt") || e.contains('√')
}

fn is_exponential(e: &str) -> bool {
    e.contains('^')
}

impl FunctionKind {
    #[must_use]
    pub fn classify(expression: &str) -> Self {
        let lowered = expression.to_lowercase();
        RULES
            .iter()
            .find(|(matches, _)| matches(&lowered))
            .map_or(Self::Linear, |(_, kind)| *kind)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trigonometric => "Trigonometric",
            Self::Quadratic => "Quadratic",
            Self::Logarithmic => "Logarithmic",
            Self::Radical => "Radical",
            Self::Exponential => "Exponential",
            Self::Linear => "Linear",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::FunctionKind;

    #[test]
    fn classifies_by_first_matching_rule() {
        let cases = [
            ("sin(x)", FunctionKind::Trigonometric),
            ("SIN(x)^2", FunctionKind::Trigonometric),
            ("x^2+1", FunctionKind::Quadratic),
            ("log(x)^2", FunctionKind::Quadratic),
            ("ln(x)+log(x)", FunctionKind::Logarithmic),
            ("sqrt(x-1)", FunctionKind::Radical),
            ("√(x)", FunctionKind::Radical),
            ("2^x", FunctionKind::Exponential),
            ("3x+4", FunctionKind::Linear),
        ];
        for (expr, expected) in cases {
            assert_eq!(FunctionKind::classify(expr), expected, "{expr}");
        }
    }

    #[test]
    fn label_round_trips_through_display() {
        assert_eq!(FunctionKind::Radical.to_string(), "Radical");
    }
}
