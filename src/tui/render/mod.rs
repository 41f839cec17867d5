//! TUI Rendering
//!
//! Main rendering logic for the terminal interface.

mod history;
mod stages;

pub(super) use stages::review_rows;

use super::app::App;
use crate::wizard::Stage;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Main color palette
pub(super) const BRAND_BLUE: Color = Color::Rgb(70, 130, 180);
pub(super) const BRAND_GOLD: Color = Color::Rgb(218, 165, 32);
pub(super) const ACCENT_GOLD: Color = Color::Rgb(184, 134, 11);

/// Render the entire UI
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Stepper
            Constraint::Min(8),    // Stage body (+ history)
            Constraint::Length(2), // Status: loading / error / notice
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_stepper(f, app.stage(), chunks[1]);

    let show_history = app.show_history && !app.controller.history().is_empty();
    if show_history {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[2]);
        stages::render_stage(f, app, body[0]);
        history::render_history(f, app.controller.history(), body[1]);
    } else {
        stages::render_stage(f, app, chunks[2]);
    }

    render_status(f, app, chunks[3]);
    render_footer(f, app, chunks[4]);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "AI Blog Writer",
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  v{}", crate::VERSION),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND_BLUE)),
    );
    f.render_widget(title, area);
}

/// One line of stage labels, done / current / upcoming
fn stepper_line(current: Stage) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (i, stage) in Stage::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if *stage == current {
            (
                "●",
                Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
            )
        } else if *stage < current {
            ("●", Style::default().fg(BRAND_BLUE))
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{} {}", marker, stage.label()), style));
    }
    Line::from(spans)
}

fn render_stepper(f: &mut Frame, current: Stage, area: Rect) {
    let stepper = Paragraph::new(stepper_line(current))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(stepper, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let state = app.controller.state();

    if state.is_loading {
        lines.push(Line::from(Span::styled(
            format!("  {} Generating...", app.spinner()),
            Style::default().fg(BRAND_BLUE),
        )));
    }
    if let Some(ref err) = state.last_error {
        lines.push(Line::from(Span::styled(
            format!("  ! {}", err),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(ref notice) = app.notice {
        let color = if notice.is_error {
            Color::Red
        } else {
            Color::Green
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", notice.text),
            Style::default().fg(color),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            format!(" [{}] ", key),
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled(label, Style::default().fg(Color::White)),
    ]
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span<'static>> = Vec::new();
    match app.stage() {
        Stage::SeedInput => {
            spans.extend(hint("Enter", "Generate Keywords"));
            spans.extend(hint("Esc", "Quit"));
        }
        Stage::SelectKeyword | Stage::SelectTitle | Stage::SelectTopic => {
            spans.extend(hint("↑↓", "Move"));
            spans.extend(hint("Enter", "Pick"));
            spans.extend(hint("Esc", "Back"));
            spans.extend(hint("q", "Quit"));
        }
        Stage::ReviewContent => {
            spans.extend(hint("c", "Copy"));
            spans.extend(hint("e", "Export"));
            spans.extend(hint("n", "New"));
            spans.extend(hint("Esc", "Back"));
            spans.extend(hint("q", "Quit"));
        }
    }
    if !app.controller.history().is_empty() {
        spans.extend(hint("Tab", "History"));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
