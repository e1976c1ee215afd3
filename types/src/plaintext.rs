//! LaTeX/unicode to plaintext filter for equation lines.
//!
//! Graphing tools export equations as LaTeX or with unicode math symbols. This
//! filter rewrites them into the ASCII notation the equation grammar expects:
//!
//! - unicode math symbols become ASCII (`≤` to `<=`, `π` to `pi`, ...)
//! - common LaTeX commands become their plain spelling (`\le` to `<=`,
//!   `\sqrt` to `sqrt`, `\left`/`\right` are dropped)
//! - brace groups after `^`, `_` or `sqrt` become parentheses (`x^{2}` to `x^(2)`)
//! - remaining backslashes are removed and whitespace runs collapse to one space
//!
//! Plain braces are kept as-is since they delimit constraints.

use std::sync::OnceLock;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

const REPLACEMENTS: &[(&str, &str)] = &[
    // Unicode symbols
    ("≤", "<="),
    ("≥", ">="),
    ("≠", "!="),
    ("≈", "~="),
    ("≃", "~="),
    ("→", "->"),
    ("∞", "infinity"),
    ("π", "pi"),
    ("∑", "sum"),
    ("\u{2212}", "-"),
    ("×", "*"),
    ("÷", "/"),
    ("°", " deg"),
    ("∫", "int"),
    ("√", "sqrt"),
    // LaTeX commands
    ("\\left", ""),
    ("\\right", ""),
    ("\\{", "{"),
    ("\\}", "}"),
    ("\\le", "<="),
    ("\\leq", "<="),
    ("\\ge", ">="),
    ("\\geq", ">="),
    ("\\lt", "<"),
    ("\\gt", ">"),
    ("\\neq", "!="),
    ("\\ne", "!="),
    ("\\cdot", "*"),
    ("\\times", "*"),
    ("\\div", "/"),
    ("\\pi", "pi"),
    ("\\infty", "infinity"),
    ("\\sqrt", "sqrt"),
    ("\\sin", "sin"),
    ("\\cos", "cos"),
    ("\\tan", "tan"),
    ("\\ln", "ln"),
    ("\\log", "log"),
    ("\\,", " "),
    ("\\ ", " "),
];

fn replacer() -> &'static AhoCorasick {
    static REPLACER: OnceLock<AhoCorasick> = OnceLock::new();
    REPLACER.get_or_init(|| {
        AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .build(REPLACEMENTS.iter().map(|(pattern, _)| pattern))
            .expect("valid plaintext replacement patterns")
    })
}

/// Convert one LaTeX/unicode equation line to plain text.
#[must_use]
pub fn to_plaintext(line: &str) -> String {
    let mut replaced = String::with_capacity(line.len());
    replacer().replace_all_with(line, &mut replaced, |mat, _, dst| {
        dst.push_str(REPLACEMENTS[mat.pattern().as_usize()].1);
        true
    });
    let grouped = parenthesize_groups(&replaced);
    let unescaped: String = grouped.chars().filter(|&c| c != '\\').collect();
    compact_whitespace(&unescaped)
}

/// Turn `{...}` groups that follow `^`, `_` or `sqrt` into parentheses.
fn parenthesize_groups(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Vec<bool> = Vec::new();
    for c in text.chars() {
        match c {
            '{' => {
                let as_paren = out.ends_with('^') || out.ends_with('_') || out.ends_with("sqrt");
                open.push(as_paren);
                out.push(if as_paren { '(' } else { '{' });
            }
            '}' => {
                let as_paren = open.pop().unwrap_or(false);
                out.push(if as_paren { ')' } else { '}' });
            }
            _ => out.push(c),
        }
    }
    out
}

fn compact_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
