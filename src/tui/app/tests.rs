use super::*;
use crate::api::{self, ContentApi, GeneratedContent};
use crate::config::ExportConfig;
use crate::wizard::{Orchestrator, Stage};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Backend with fixed answers for every stage
struct FixedApi;

#[async_trait]
impl ContentApi for FixedApi {
    async fn generate_keywords(&self, _keyword: &str) -> api::Result<String> {
        Ok("arabica\nrobusta\nliberica\n".to_string())
    }

    async fn generate_titles(&self, keyword: &str) -> api::Result<String> {
        Ok(format!("All About {keyword}\n"))
    }

    async fn generate_topics(&self, _title: &str) -> api::Result<String> {
        Ok("Origins\n".to_string())
    }

    async fn generate_content(&self, topic: &str) -> api::Result<GeneratedContent> {
        Ok(GeneratedContent {
            content: format!("An article on {topic}."),
            seo_score: 91,
        })
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn test_app(export_config: ExportConfig) -> App {
    App::new(Orchestrator::new(Arc::new(FixedApi)), export_config)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

/// Wait for the in-flight request and feed its result back in
async fn settle(app: &mut App) {
    let event = app.next_event().await.expect("event channel closed");
    app.handle_event(event);
}

#[test]
fn test_typing_edits_seed() {
    let mut app = test_app(ExportConfig::default());
    type_text(&mut app, "coffe");
    app.handle_key(key(KeyCode::Backspace));
    type_text(&mut app, "ee");
    assert_eq!(app.controller.state().seed_keyword, "coffee");
    assert_eq!(app.stage(), Stage::SeedInput);
}

#[test]
fn test_enter_on_blank_seed_does_nothing() {
    let mut app = test_app(ExportConfig::default());
    type_text(&mut app, "   ");
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.controller.is_busy());
    assert!(app.notice.is_none());
    assert!(app.try_next_event().is_none());
}

#[test]
fn test_paste_takes_first_line() {
    let mut app = test_app(ExportConfig::default());
    app.handle_paste("cold brew\nignored");
    assert_eq!(app.controller.state().seed_keyword, "cold brew");
}

#[test]
fn test_escape_on_first_stage_quits() {
    let mut app = test_app(ExportConfig::default());
    app.handle_key(key(KeyCode::Esc));
    assert!(app.should_quit);
}

#[test]
fn test_ctrl_c_quits_from_text_field() {
    let mut app = test_app(ExportConfig::default());
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
    assert!(app.controller.state().seed_keyword.is_empty());
}

#[tokio::test]
async fn test_walk_through_all_stages() {
    let mut app = test_app(ExportConfig::default());
    type_text(&mut app, "coffee");
    app.handle_key(key(KeyCode::Enter));
    assert!(app.controller.is_busy());
    settle(&mut app).await;

    assert_eq!(app.stage(), Stage::SelectKeyword);
    assert_eq!(app.option_cursor, 0);

    // Cursor stays inside the list
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.option_cursor, 0);
    for _ in 0..5 {
        app.handle_key(key(KeyCode::Down));
    }
    assert_eq!(app.option_cursor, 2);
    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    assert_eq!(app.stage(), Stage::SelectTitle);
    assert_eq!(
        app.controller.state().selected_keyword.as_deref(),
        Some("robusta")
    );
    assert_eq!(app.controller.current_options().to_vec(), vec!["All About robusta"]);

    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    let state = app.controller.state();
    assert_eq!(state.stage, Stage::ReviewContent);
    assert_eq!(state.content.as_deref(), Some("An article on Origins."));
    assert_eq!(state.seo_score, Some(91));
    assert_eq!(app.controller.history().len(), 1);
}

#[tokio::test]
async fn test_keys_while_loading_show_wait_notice() {
    let mut app = test_app(ExportConfig::default());
    type_text(&mut app, "coffee");
    app.handle_key(key(KeyCode::Enter));

    app.handle_key(key(KeyCode::Enter));
    type_text(&mut app, "x");

    assert_eq!(
        app.notice,
        Some(Notice::info("Please wait for the current request to finish"))
    );
    assert_eq!(app.controller.state().seed_keyword, "coffee");

    settle(&mut app).await;
    assert_eq!(app.stage(), Stage::SelectKeyword);
    assert!(app.try_next_event().is_none());
}

#[tokio::test]
async fn test_escape_returns_to_previous_pick() {
    let mut app = test_app(ExportConfig::default());
    type_text(&mut app, "coffee");
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;
    assert_eq!(app.stage(), Stage::SelectTitle);

    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.stage(), Stage::SelectKeyword);
    assert_eq!(app.option_cursor, 2);
    assert!(app.controller.state().title_options.is_empty());
}

#[tokio::test]
async fn test_result_after_going_back_is_dropped() {
    let mut app = test_app(ExportConfig::default());
    type_text(&mut app, "coffee");
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    // Pick a keyword, then back out before the titles arrive
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.stage(), Stage::SeedInput);
    assert!(!app.controller.is_busy());

    settle(&mut app).await;
    assert_eq!(app.stage(), Stage::SeedInput);
    assert!(app.controller.state().title_options.is_empty());
}

#[tokio::test]
async fn test_export_and_restart_from_review() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(ExportConfig {
        directory: dir.path().to_path_buf(),
        ..ExportConfig::default()
    });
    type_text(&mut app, "coffee");
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;
    for _ in 0..3 {
        if app.stage() == Stage::ReviewContent {
            break;
        }
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;
    }
    assert_eq!(app.stage(), Stage::ReviewContent);

    app.handle_key(key(KeyCode::Char('e')));
    let written = std::fs::read_to_string(dir.path().join("content.txt")).unwrap();
    assert_eq!(written, "An article on Origins.");
    assert!(matches!(app.notice, Some(Notice { is_error: false, .. })));

    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.stage(), Stage::SeedInput);
    assert!(app.controller.state().seed_keyword.is_empty());
    assert_eq!(app.controller.history().len(), 1);
}

#[test]
fn test_spinner_only_moves_while_loading() {
    let mut app = test_app(ExportConfig::default());
    app.tick();
    assert_eq!(app.spinner_frame, 0);
}

#[tokio::test]
async fn test_article_scroll_stops_at_last_row() {
    let mut app = test_app(ExportConfig::default());
    type_text(&mut app, "coffee");
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;
    for _ in 0..3 {
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;
    }
    assert_eq!(app.stage(), Stage::ReviewContent);

    // Recap (4 picks + blank), score + blank, one article line
    for _ in 0..50 {
        app.handle_key(key(KeyCode::Down));
    }
    assert_eq!(app.content_scroll, 7);
    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.content_scroll, 7);

    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.content_scroll, 6);
}
