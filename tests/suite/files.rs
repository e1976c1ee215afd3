//! Input, rejects, program files and config resolution against a temp dir.

use std::fs;

use ticonv_engine::{
    ColorPolicy, CurationSession, OutputLayout, Settings, SettingsOverrides, TiconvConfig,
    persistence,
};

use crate::common::{numbered_lines, program_files, settings_in, write_input};

#[test]
fn rejects_accumulate_across_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    write_input(&settings, "y = x\nx = 3\n\n  bad line  \n");

    for _ in 0..2 {
        let parsed = persistence::load_input(&settings.input, false).expect("load");
        assert_eq!(parsed.equations.len(), 1);
        persistence::append_rejects(&settings.rejects, &parsed.rejects).expect("append");
    }

    let rejects = fs::read_to_string(&settings.rejects).expect("rejects file");
    assert_eq!(rejects, "x = 3\n  bad line  \nx = 3\n  bad line  \n");
}

#[test]
fn clean_input_leaves_no_rejects_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    write_input(&settings, "y = x\ny = 2x {x>0}\n");

    let parsed = persistence::load_input(&settings.input, false).expect("load");
    persistence::append_rejects(&settings.rejects, &parsed.rejects).expect("append");
    assert!(!settings.rejects.exists());
}

#[test]
fn missing_input_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());

    let err = persistence::load_input(&settings.input, false).expect_err("missing input");
    assert_eq!(err.path(), settings.input.as_path());
    assert!(err.to_string().contains("input.txt"), "{err}");
}

#[test]
fn batch_conversion_writes_one_file_per_chunk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    write_input(&settings, &numbered_lines(23).join("\n"));

    let parsed = persistence::load_input(&settings.input, false).expect("load");
    let chunks = CurationSession::new(parsed.equations).generate();
    let written = persistence::write_programs(&settings.output, &chunks).expect("write");

    assert_eq!(program_files(&settings), written);
    let names: Vec<_> = written
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, vec!["program1.txt", "program2.txt", "program3.txt"]);

    let last = fs::read_to_string(&written[2]).expect("program3");
    assert_eq!(last.lines().count(), 20);
    assert!(!last.ends_with('\n'));
}

#[test]
fn regenerating_overwrites_without_removing_stale_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());

    let twelve = ticonv_types::parse_lines(numbered_lines(12)).equations;
    let chunks = CurationSession::new(twelve).generate();
    persistence::write_programs(&settings.output, &chunks).expect("first write");

    let three = ticonv_types::parse_lines(["y = a", "y = b", "y = c"]).equations;
    let chunks = CurationSession::new(three).generate();
    let written = persistence::write_programs(&settings.output, &chunks).expect("second write");

    assert_eq!(written.len(), 1);
    assert_eq!(program_files(&settings).len(), 2);
    let first = fs::read_to_string(&written[0]).expect("program1");
    assert!(first.starts_with("\"piecewise(a,)\"->Y0"));
}

#[test]
fn plaintext_conversion_drops_blank_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("latex.txt");
    let output = dir.path().join("output.txt");
    fs::write(&input, "y = x^{2} {x \\geq 1}\n\n   \ny = π·x\n").expect("write latex");

    let count = persistence::write_plaintext(&input, &output).expect("convert");
    assert_eq!(count, 2);
    assert_eq!(
        fs::read_to_string(&output).expect("output"),
        "y = x^(2) {x >= 1}\ny = pi·x\n"
    );

    let parsed = persistence::load_input(&output, false).expect("load");
    assert_eq!(parsed.equations.len(), 2);
    assert!(parsed.rejects.is_empty());
}

#[test]
fn plaintext_flag_filters_while_loading() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    write_input(&settings, "y = \\sqrt{x} \\{0 \\le x \\le 9\\}\n");

    let raw = persistence::load_input(&settings.input, false).expect("raw load");
    assert_eq!(raw.equations[0].expression(), "\\sqrt");

    let filtered = persistence::load_input(&settings.input, true).expect("filtered load");
    assert_eq!(filtered.equations[0].expression(), "sqrt(x)");
    assert_eq!(filtered.equations[0].constraint(), "0 <= x <= 9");
}

#[test]
fn config_file_feeds_settings_and_cli_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[app]
ascii_only = true

[input]
path = "equations.txt"
rejects = "rejected.txt"
plaintext = true

[output]
dir = "out"
prefix = "GRAPH"
extension = ".8xp"

[colors]
numeric_range = [24, 10]
"#,
    )
    .expect("write config");

    let config = TiconvConfig::load_from(&path).expect("load config");
    let settings = Settings::resolve(Some(&config), SettingsOverrides::default());
    assert_eq!(settings.input, std::path::PathBuf::from("equations.txt"));
    assert_eq!(settings.rejects, std::path::PathBuf::from("rejected.txt"));
    assert!(settings.plaintext);
    assert!(settings.ui.ascii_only);
    assert!(!settings.ui.high_contrast);
    assert_eq!(settings.color_policy, ColorPolicy::numeric_range(10, 24));
    assert_eq!(
        settings.output,
        OutputLayout {
            dir: "out".into(),
            prefix: "GRAPH".to_owned(),
            extension: "8xp".to_owned(),
        }
    );
    assert_eq!(settings.output.file_name(2), "GRAPH2.8xp");

    let overridden = Settings::resolve(
        Some(&config),
        SettingsOverrides {
            input: Some(dir.path().join("cli.txt")),
            out_dir: Some(dir.path().to_path_buf()),
            ..SettingsOverrides::default()
        },
    );
    assert_eq!(overridden.input, dir.path().join("cli.txt"));
    assert_eq!(overridden.output.dir, dir.path());
    assert_eq!(overridden.output.prefix, "GRAPH");
}

#[test]
fn malformed_config_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[colors]\nnumeric_range = \"ten\"\n").expect("write config");

    let err = TiconvConfig::load_from(&path).expect_err("bad config");
    assert!(matches!(err, ticonv_engine::ConfigError::Parse { .. }), "{err}");
    assert_eq!(err.path(), &path);
}
