//! Per-stage bodies

use super::{ACCENT_GOLD, BRAND_BLUE, BRAND_GOLD};
use crate::tui::app::App;
use crate::wizard::{Stage, WizardState};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const INPUT_PROMPT: &str = "  > ";

pub(super) fn render_stage(f: &mut Frame, app: &App, area: Rect) {
    let stage = app.stage();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BRAND_BLUE))
        .title(Span::styled(
            format!(" {} ", stage.title()),
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match stage {
        Stage::SeedInput => render_seed_input(f, app, inner),
        Stage::SelectKeyword | Stage::SelectTitle | Stage::SelectTopic => {
            render_options(f, app, inner)
        }
        Stage::ReviewContent => render_content(f, app, inner),
    }
}

fn render_seed_input(f: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let seed = state.seed_keyword.as_str();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Enter Seed Keyword",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];
    if seed.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(INPUT_PROMPT, Style::default().fg(ACCENT_GOLD)),
            Span::styled("e.g. coffee", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled(INPUT_PROMPT, Style::default().fg(ACCENT_GOLD)),
            Span::styled(seed.to_string(), Style::default().fg(Color::White)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Each stage asks the writer for candidates; pick one to go on.",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines), area);

    // Cursor sits after the typed text, hidden while a request runs
    if !state.is_loading && area.height > 2 {
        let offset = u16::try_from(INPUT_PROMPT.width() + seed.width()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(offset);
        if x < area.x.saturating_add(area.width) {
            f.set_cursor_position((x, area.y + 2));
        }
    }
}

/// Lines for a pick list, `cursor` marked with `>` and the recorded pick with `[*]`
pub(super) fn option_lines(
    options: &[String],
    selected: Option<&str>,
    cursor: usize,
) -> Vec<Line<'static>> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let focused = i == cursor;
            let picked = selected == Some(option.as_str());
            Line::from(vec![
                Span::styled(
                    if focused { " > " } else { "   " },
                    Style::default().fg(ACCENT_GOLD),
                ),
                Span::styled(
                    if picked { "[*] " } else { "[ ] " },
                    Style::default().fg(if picked { BRAND_GOLD } else { Color::DarkGray }),
                ),
                Span::styled(
                    option.clone(),
                    Style::default()
                        .fg(if focused { Color::White } else { Color::Gray })
                        .add_modifier(if focused {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                ),
            ])
        })
        .collect()
}

fn render_options(f: &mut Frame, app: &App, area: Rect) {
    let stage = app.stage();
    let state = app.controller.state();
    let options = state.options_for(stage);

    let mut lines = context_lines(state, stage);
    let header = lines.len();

    if options.is_empty() {
        lines.push(Line::from(Span::styled(
            "   No options returned. Press Esc to go back and try again.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(option_lines(
            options,
            state.selection_for(stage),
            app.option_cursor,
        ));
    }

    // Keep the cursor row on screen
    let visible = area.height as usize;
    let cursor_row = header + app.option_cursor;
    let offset = if visible > 0 && cursor_row >= visible {
        cursor_row + 1 - visible
    } else {
        0
    };

    f.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), area);
}

/// Recap of the picks that led to `stage`
fn context_lines(state: &WizardState, stage: Stage) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut recap = |label: &str, value: &str| {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<8}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value.to_string(), Style::default().fg(BRAND_BLUE)),
        ]));
    };

    recap("Seed", &state.seed_keyword);
    if stage > Stage::SelectKeyword
        && let Some(ref keyword) = state.selected_keyword
    {
        recap("Keyword", keyword);
    }
    if stage > Stage::SelectTitle
        && let Some(ref title) = state.selected_title
    {
        recap("Title", title);
    }
    if stage > Stage::SelectTopic
        && let Some(ref topic) = state.selected_topic
    {
        recap("Topic", topic);
    }
    lines.push(Line::from(""));
    lines
}

/// Everything shown on the review stage: recap, score, article
fn review_lines(state: &WizardState) -> Vec<Line<'static>> {
    let mut lines = context_lines(state, Stage::ReviewContent);

    if let Some(score) = state.seo_score {
        lines.push(Line::from(Span::styled(
            format!("  SEO Score: {}/100", score),
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    match state.content.as_deref() {
        Some(content) if !content.is_empty() => {
            lines.extend(content.lines().map(|l| Line::from(l.to_string())));
        }
        _ => lines.push(Line::from(Span::styled(
            "  No content",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines
}

/// Rows the review body takes when wrapped to `width` columns
pub(crate) fn review_rows(state: &WizardState, width: u16) -> usize {
    let width = usize::from(width.max(1));
    review_lines(state)
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

fn render_content(f: &mut Frame, app: &App, area: Rect) {
    app.review_width.set(area.width);
    let lines = review_lines(app.controller.state());

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.content_scroll, 0)),
        area,
    );
}
