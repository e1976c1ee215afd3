//! Interactive curation driven through `App`, ending in files on disk.

use std::fs;

use ticonv_engine::{App, ColorPolicy, CurationSession, StatusKind, persistence};

use crate::common::{equations, numbered_lines, program_files, settings_in, write_input};

fn read(path: &std::path::Path) -> String {
    fs::read_to_string(path).expect("program file")
}

#[test]
fn curated_session_writes_colored_programs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    let session = CurationSession::new(equations(&["y = x^2 {-2<=x<=2}", "y = sin(x)"]));
    let mut app = App::new(session, &settings);

    app.draft_mut().enter_text("blue");
    app.submit_draft();
    app.draft_mut().enter_text("Red");
    app.submit_draft();
    assert!(app.is_done());
    assert_eq!(app.status_kind(), Some(StatusKind::Success));

    let written = app.generate();
    assert_eq!(written, vec![settings.output.path_for(1)]);
    assert_eq!(program_files(&settings), written);

    let text = read(&written[0]);
    assert!(text.starts_with(
        "\"piecewise(X^2,-2<=X and X<=2)\"->Y0\nGraphColor(Y0,BLUE)\n\
         \"piecewise(sin(X),)\"->Y1\nGraphColor(Y1,RED)\nDispGraph"
    ));
    assert!(text.ends_with("DelVar Y9"));
    assert_eq!(
        app.status_message(),
        Some(format!("Created 1 program file in {}", settings.output.dir.display()).as_str())
    );
}

#[test]
fn generate_mid_session_uses_fallback_for_the_rest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    let lines = numbered_lines(12);
    let parsed = ticonv_types::parse_lines(&lines);
    let mut app = App::new(CurationSession::new(parsed.equations), &settings);

    app.draft_mut().enter_text("green");
    app.submit_draft();

    let written = app.generate();
    assert_eq!(written.len(), 2);
    assert!(!app.is_done());

    let first = read(&written[0]);
    assert!(first.contains("GraphColor(Y0,GREEN)"));
    assert!(first.contains("GraphColor(Y1,BLACK)"));
    let second = read(&written[1]);
    assert!(second.starts_with("\"piecewise(11X,)\"->Y0\nGraphColor(Y0,BLACK)\n"));
}

#[test]
fn undo_then_resubmit_replaces_the_color() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    let session = CurationSession::new(equations(&["y = x", "y = 2x"]));
    let mut app = App::new(session, &settings);

    app.draft_mut().enter_text("blue");
    app.submit_draft();
    app.undo();
    assert_eq!(app.draft_text(), "BLUE");

    app.draft_mut().clear();
    app.draft_mut().enter_text("orange");
    app.submit_draft();
    app.skip();

    let written = app.generate();
    let text = read(&written[0]);
    assert!(text.contains("GraphColor(Y0,ORANGE)"));
    assert!(!text.contains("BLUE"));
    assert_eq!(app.session().colors().assigned(), 1);
}

#[test]
fn blank_submission_records_black() {
    let session = CurationSession::new(equations(&["y = x"]));
    let mut app = App::new(session, &ticonv_engine::Settings::default());

    app.submit_draft();
    assert!(app.is_done());
    assert_eq!(app.session().colors().assigned(), 1);
    assert_eq!(
        app.session().colors().get(0).map(|c| c.as_str()),
        Some("BLACK")
    );
}

#[test]
fn numeric_policy_keeps_invalid_draft() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = settings_in(dir.path());
    settings.color_policy = ColorPolicy::numeric_range(10, 24);
    let session = CurationSession::new(equations(&["y = x"]));
    let mut app = App::new(session, &settings);

    app.draft_mut().enter_text("teal");
    app.submit_draft();
    assert_eq!(app.status_kind(), Some(StatusKind::Error));
    assert_eq!(app.draft_text(), "teal");
    assert!(!app.is_done());

    app.draft_mut().clear();
    app.draft_mut().enter_text("12");
    app.submit_draft();
    assert!(app.is_done());

    let text = read(&app.generate()[0]);
    assert!(text.contains("GraphColor(Y0,12)"));
}

#[test]
fn curation_from_loaded_input_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    write_input(&settings, "y = x\nnot an equation\ny = x^2\n");

    let parsed = persistence::load_input(&settings.input, settings.plaintext).expect("load");
    persistence::append_rejects(&settings.rejects, &parsed.rejects).expect("rejects");
    let rejected = parsed.rejects.len();
    let mut app = App::new(CurationSession::new(parsed.equations), &settings)
        .with_source(settings.input.clone(), rejected);

    assert_eq!(app.rejected(), 1);
    assert_eq!(app.status_kind(), Some(StatusKind::Info));
    assert_eq!(app.view().total, 2);

    app.skip();
    app.skip();
    assert!(app.is_done());
    assert_eq!(app.generate().len(), 1);
    assert_eq!(
        fs::read_to_string(&settings.rejects).expect("rejects file"),
        "not an equation\n"
    );
}

#[test]
fn transitions_after_completion_are_reported() {
    let session = CurationSession::new(equations(&["y = x"]));
    let mut app = App::new(session, &ticonv_engine::Settings::default());
    app.skip();
    assert!(app.is_done());

    app.skip();
    assert_eq!(app.status_kind(), Some(StatusKind::Warning));
    assert_eq!(
        app.status_message(),
        Some("All equations have been processed")
    );

    app.undo();
    assert!(!app.is_done());
    assert_eq!(app.view().cursor, 0);
}
