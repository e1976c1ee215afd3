//! TUI rendering for ticonv using ratatui.

mod input;
mod theme;

pub use input::{apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use std::borrow::Cow;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use ticonv_engine::{App, ColorToken, CurrentEquation, SessionView, StatusKind};
use ticonv_types::chunk_count;

const EQUATION_HEIGHT: u16 = 4;
const PREVIEW_HEIGHT: u16 = 4;
const INPUT_HEIGHT: u16 = 3;
const PROGRESS_HEIGHT: u16 = 1;

/// Key bindings shown in the footer: (keys, action).
const KEY_HINTS: &[(&str, &str)] = &[
    ("Enter", "submit"),
    ("^N", "skip"),
    ("^B", "back"),
    ("^L", "generate"),
    ("Esc", "quit"),
];

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    let view = app.view();
    draw_header(frame, app, &view, chunks[0], &palette, &glyphs);
    match &view.current {
        Some(current) => draw_review(frame, app, &view, current, chunks[1], &palette, &glyphs),
        None => draw_done(frame, app, &view, chunks[1], &palette, &glyphs),
    }
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);
    draw_key_hints(frame, chunks[3], &palette, &glyphs);
}

fn draw_header(
    frame: &mut Frame,
    app: &App,
    view: &SessionView<'_>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let mut left = vec![Span::styled(" ticonv ", styles::title(palette))];
    if let Some(source) = app.source() {
        left.push(Span::styled(
            format!("{} {}", glyphs.separator, source.display()),
            Style::default().fg(palette.text_muted),
        ));
    }

    let counter = if view.is_done() {
        format!("{} {}/{} ", glyphs.done, view.total, view.total)
    } else {
        format!("Equation {}/{} ", view.cursor + 1, view.total)
    };

    let counter_width = counter.width() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(counter_width)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left)), chunks[0]);
    let counter = Paragraph::new(Line::from(Span::styled(
        counter,
        Style::default()
            .fg(palette.text_secondary)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(counter, chunks[1]);
}

fn draw_review(
    frame: &mut Frame,
    app: &App,
    view: &SessionView<'_>,
    current: &CurrentEquation<'_>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(EQUATION_HEIGHT),
            Constraint::Length(PREVIEW_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(PROGRESS_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    draw_equation(frame, current, chunks[0], palette, glyphs);
    draw_preview(frame, current, chunks[1], palette);
    draw_input(frame, app, chunks[2], palette, glyphs);
    draw_progress(frame, view, chunks[3], palette);
}

fn panel<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::panel_border(palette))
        .title_top(Line::from(Span::styled(
            format!(" {title} "),
            styles::title(palette),
        )))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(palette.bg_panel))
}

fn draw_equation(
    frame: &mut Frame,
    current: &CurrentEquation<'_>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let equation = current.equation.to_string();
    let marker = if current.recorded_color.is_some() {
        glyphs.colored
    } else {
        glyphs.uncolored
    };

    let mut kind_line = vec![
        Span::styled("Type: ", Style::default().fg(palette.text_muted)),
        Span::styled(
            current.kind.label(),
            styles::function_kind(palette, current.kind),
        ),
    ];
    if let Some(color) = current.recorded_color {
        kind_line.push(Span::styled(
            format!("  {marker} {}", sanitize(color.as_str())),
            Style::default().fg(palette.text_secondary),
        ));
    }

    let lines = vec![
        Line::from(Span::styled(
            sanitize(&equation).into_owned(),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(kind_line),
    ];

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Equation", palette));
    frame.render_widget(widget, area);
}

fn draw_preview(frame: &mut Frame, current: &CurrentEquation<'_>, area: Rect, palette: &Palette) {
    let lines: Vec<Line> = current
        .preview
        .lines()
        .into_iter()
        .map(|line| {
            Line::from(Span::styled(
                sanitize(&line).into_owned(),
                Style::default().fg(palette.accent),
            ))
        })
        .collect();

    let widget = Paragraph::new(lines).block(panel("TI-BASIC preview", palette));
    frame.render_widget(widget, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let prefix = format!("{} ", glyphs.prompt);
    let prefix_width = prefix.width() as u16;
    // Border (1) + padding (1) on each side.
    let content_width = usize::from(area.width.saturating_sub(4 + prefix_width));

    let draft = app.draft_text();
    let cursor_index = app.draft().byte_index();
    let cursor_display_pos = draft[..cursor_index].width();

    let (display_text, horizontal_scroll) = if content_width > 0
        && cursor_display_pos >= content_width
    {
        let scroll_target = cursor_display_pos - content_width + 1;
        let mut byte_offset = draft.len();
        let mut skipped_width = 0;
        for (idx, grapheme) in draft.grapheme_indices(true) {
            if skipped_width >= scroll_target {
                byte_offset = idx;
                break;
            }
            skipped_width += grapheme.width();
        }
        (&draft[byte_offset..], skipped_width as u16)
    } else {
        (draft, 0u16)
    };

    let spans = vec![
        Span::styled(prefix, Style::default().fg(palette.primary)),
        Span::styled(
            sanitize(display_text).into_owned(),
            Style::default().fg(palette.text_primary),
        ),
    ];

    let title = format!("Color ({})", app.color_policy().hint());
    let widget = Paragraph::new(Line::from(spans)).block(panel(&title, palette));
    frame.render_widget(widget, area);

    let cursor_x = area
        .x
        .saturating_add(2 + prefix_width)
        .saturating_add(cursor_display_pos as u16)
        .saturating_sub(horizontal_scroll);
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn draw_progress(frame: &mut Frame, view: &SessionView<'_>, area: Rect, palette: &Palette) {
    let ratio = if view.total == 0 {
        1.0
    } else {
        view.processed as f64 / view.total as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.primary).bg(palette.bg_panel))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!(
            "{}/{} processed, {} colored",
            view.processed, view.total, view.assigned
        ));
    frame.render_widget(gauge, area);
}

fn draw_done(
    frame: &mut Frame,
    app: &App,
    view: &SessionView<'_>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let uncolored = view.total - view.assigned;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} All equations processed!", glyphs.done),
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} of {} equations colored", view.assigned, view.total),
            Style::default().fg(palette.text_secondary),
        )),
    ];
    if uncolored > 0 && view.total > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                "{} {uncolored} without a color will use {}",
                glyphs.bullet,
                ColorToken::FALLBACK
            ),
            Style::default().fg(palette.text_muted),
        )));
    }
    if app.rejected() > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} {} rejected lines saved", glyphs.bullet, app.rejected()),
            Style::default().fg(palette.text_muted),
        )));
    }
    let programs = chunk_count(view.total);
    if programs > 0 {
        let layout = app.output_layout();
        let target = if programs == 1 {
            layout.path_for(1).display().to_string()
        } else {
            format!(
                "{} .. {}",
                layout.path_for(1).display(),
                layout.file_name(programs)
            )
        };
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Ctrl+L", styles::key_highlight(palette)),
            Span::styled(
                format!(" {} write {target}", glyphs.arrow),
                styles::key_hint(palette),
            ),
        ]));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(panel("Done", palette));
    frame.render_widget(widget, area);
}

pub(crate) fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (status_text, status_style) = if let Some(msg) = app.status_message() {
        let (prefix, color) = match app.status_kind() {
            Some(StatusKind::Error) => ("Error: ", palette.error),
            Some(StatusKind::Warning) => ("Warning: ", palette.warning),
            Some(StatusKind::Success) => ("", palette.success),
            Some(StatusKind::Info) | None => ("", palette.text_secondary),
        };
        (format!(" {prefix}{msg}"), Style::default().fg(color))
    } else {
        let layout = app.output_layout();
        (
            format!(
                " {} output {} {}",
                glyphs.bullet,
                glyphs.arrow,
                layout.path_for(1).display()
            ),
            Style::default().fg(palette.text_muted),
        )
    };

    let status = Paragraph::new(Line::from(Span::styled(
        sanitize(&status_text).into_owned(),
        status_style,
    )));
    frame.render_widget(status, area);
}

fn draw_key_hints(frame: &mut Frame, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 3);
    for (idx, (keys, action)) in KEY_HINTS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(
                format!(" {} ", glyphs.separator),
                styles::key_hint(palette),
            ));
        }
        spans.push(Span::styled(*keys, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Drop control characters so file content cannot drive the terminal.
fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(text.chars().filter(|c| !c.is_control()).collect())
    } else {
        Cow::Borrowed(text)
    }
}
