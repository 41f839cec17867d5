//! Generated-article history panel

use super::{BRAND_BLUE, BRAND_GOLD};
use crate::wizard::HistoryEntry;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Lines for one entry: topic with score, then the preview
fn entry_lines(entry: &HistoryEntry) -> Vec<Line<'static>> {
    let topic = if entry.selected_topic.is_empty() {
        "(no topic)".to_string()
    } else {
        entry.selected_topic.clone()
    };
    let score = format!("  {}/100", entry.seo_score);

    vec![
        Line::from(vec![
            Span::styled(
                topic,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(score, Style::default().fg(BRAND_GOLD)),
        ]),
        Line::from(Span::styled(
            entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            entry.preview(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ]
}

/// Render newest first
pub(super) fn render_history(f: &mut Frame, history: &[HistoryEntry], area: Rect) {
    let lines: Vec<Line<'static>> = history.iter().rev().flat_map(entry_lines).collect();

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND_BLUE))
            .title(Span::styled(
                format!(" History ({}) ", history.len()),
                Style::default().fg(BRAND_GOLD),
            )),
    );
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_entry_lines_show_topic_score_and_preview() {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            seed_keyword: "coffee".to_string(),
            selected_keyword: "arabica".to_string(),
            selected_title: "Top 5 Arabica Beans".to_string(),
            selected_topic: "Bean Origins".to_string(),
            content: "Arabica beans grow at altitude.".to_string(),
            seo_score: 87,
        };

        let lines = entry_lines(&entry);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "Bean Origins  87/100");
        let preview: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(preview, "Arabica beans grow at altitude....");
    }
}
