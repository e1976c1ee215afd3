//! Raw lines to program text, without touching the filesystem.

use ticonv_engine::CurationSession;
use ticonv_types::{FunctionKind, RejectReason, parse_lines, to_plaintext};

use crate::common::numbered_lines;

#[test]
fn mixed_input_keeps_order_and_line_numbers() {
    let parsed = parse_lines([
        "y = x^2 {-2<=x<=2}",
        "x = 3",
        "",
        "y=sqrt(x)",
        "graph me",
    ]);

    let expressions: Vec<_> = parsed.equations.iter().map(|e| e.expression()).collect();
    assert_eq!(expressions, vec!["x^2", "sqrt(x)"]);

    let rejected: Vec<_> = parsed
        .rejects
        .iter()
        .map(|r| (r.line_number, r.text.as_str(), r.reason))
        .collect();
    assert_eq!(
        rejected,
        vec![
            (2, "x = 3", RejectReason::NoMatch),
            (5, "graph me", RejectReason::NoMatch),
        ]
    );
}

#[test]
fn curated_colors_reach_program_text() {
    let parsed = parse_lines(["y = x^2 {-2<=x<=2}", "y = 2x+1", "y = log(x) {x>0}"]);
    let mut session = CurationSession::new(parsed.equations);
    session.submit("  blue ").expect("active");
    session.skip().expect("active");
    session.submit("").expect("active");

    let chunks = session.generate();
    assert_eq!(chunks.len(), 1);
    insta::assert_snapshot!(chunks[0].to_text(), @r#"
    "piecewise(X^2,-2<=X and X<=2)"->Y0
    GraphColor(Y0,BLUE)
    "piecewise(2X+1,)"->Y1
    GraphColor(Y1,BLACK)
    "piecewise(log(X),X>0)"->Y2
    GraphColor(Y2,BLACK)
    DispGraph
    RecallPic 0
    StorePic 0
    ClrDraw
    DelVar Y0
    DelVar Y1
    DelVar Y2
    DelVar Y3
    DelVar Y4
    DelVar Y5
    DelVar Y6
    DelVar Y7
    DelVar Y8
    DelVar Y9
    "#);
}

#[test]
fn twenty_three_equations_split_into_three_programs() {
    let parsed = parse_lines(numbered_lines(23));
    let session = CurationSession::new(parsed.equations);
    let chunks = session.generate();

    let numbers: Vec<_> = chunks.iter().map(|c| c.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let last = chunks[2].lines();
    assert_eq!(last.len(), 3 * 2 + 4 + 10);
    assert_eq!(last[0], "\"piecewise(21X,)\"->Y0");
    assert_eq!(last[4], "\"piecewise(23X,)\"->Y2");
}

#[test]
fn resubmitting_after_undo_is_last_write_wins() {
    let parsed = parse_lines(numbered_lines(11));
    let mut session = CurationSession::new(parsed.equations);
    for _ in 0..10 {
        session.skip().expect("active");
    }
    session.submit("red").expect("active");
    session.undo().expect("not first");
    session.submit("green").expect("active");

    let chunks = session.generate();
    assert_eq!(chunks[1].lines()[1], "GraphColor(Y0,GREEN)");
    assert_eq!(session.colors().assigned(), 1);
}

#[test]
fn plaintext_filter_feeds_the_parser() {
    let raw = [
        r"y = \sqrt{x} \left\{0 \le x \le 4\right\}",
        "y = 2π·x",
        "y = x^{3} {−1 ≤ x ≤ 1}",
    ];
    let filtered: Vec<String> = raw.iter().map(|line| to_plaintext(line)).collect();
    let parsed = parse_lines(&filtered);

    assert!(parsed.rejects.is_empty(), "{:?}", parsed.rejects);
    assert_eq!(parsed.equations[0].expression(), "sqrt(x)");
    assert_eq!(parsed.equations[0].constraint(), "0 <= x <= 4");
    assert_eq!(parsed.equations[2].constraint(), "-1 <= x <= 1");

    let chunks = CurationSession::new(parsed.equations).generate();
    assert_eq!(
        chunks[0].lines()[0],
        "\"piecewise(sqrt(X),0<=X and X<=4)\"->Y0"
    );
    assert_eq!(
        chunks[0].lines()[4],
        "\"piecewise(X^(3),-1<=X and X<=1)\"->Y2"
    );
}

#[test]
fn function_kinds_follow_rule_order() {
    let parsed = parse_lines([
        "y = sin(x)^2",
        "y = x^2+1",
        "y = log(x)",
        "y = sqrt(x)",
        "y = 2^x",
        "y = 3x",
    ]);
    let kinds: Vec<_> = parsed
        .equations
        .iter()
        .map(|e| FunctionKind::classify(e.expression()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            FunctionKind::Trigonometric,
            FunctionKind::Quadratic,
            FunctionKind::Logarithmic,
            FunctionKind::Radical,
            FunctionKind::Exponential,
            FunctionKind::Linear,
        ]
    );
}
