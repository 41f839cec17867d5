//! Key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{App, Notice};
use crate::export;
use crate::tui::render;
use crate::wizard::Stage;

impl App {
    /// Handle a key press for the current stage
    pub fn handle_key(&mut self, event: KeyEvent) {
        // Global: Ctrl+C quits
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match event.code {
            // Escape goes back one stage; on the first stage it quits
            KeyCode::Esc => {
                self.notice = None;
                if self.controller.go_back_one() {
                    self.reset_view();
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::Tab => {
                self.show_history = !self.show_history;
                return;
            }
            _ => {}
        }

        match self.stage() {
            Stage::SeedInput => self.handle_seed_key(event),
            Stage::SelectKeyword | Stage::SelectTitle | Stage::SelectTopic => {
                self.handle_options_key(event)
            }
            Stage::ReviewContent => self.handle_review_key(event),
        }
    }

    fn handle_seed_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Enter => {
                let seed = self.controller.state().seed_keyword.clone();
                match self.controller.submit_seed(&seed) {
                    Ok(request) => self.dispatch(request),
                    Err(e) => self.report(e),
                }
            }
            KeyCode::Backspace => {
                let mut seed = self.controller.state().seed_keyword.clone();
                if seed.pop().is_some()
                    && let Err(e) = self.controller.edit_seed(seed)
                {
                    self.report(e);
                }
            }
            KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut seed = self.controller.state().seed_keyword.clone();
                seed.push(c);
                if let Err(e) = self.controller.edit_seed(seed) {
                    self.report(e);
                }
            }
            _ => {}
        }
    }

    fn handle_options_key(&mut self, event: KeyEvent) {
        let count = self.controller.current_options().len();
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.option_cursor = self.option_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.option_cursor + 1 < count {
                    self.option_cursor += 1;
                }
            }
            KeyCode::Home => self.option_cursor = 0,
            KeyCode::End => self.option_cursor = count.saturating_sub(1),
            KeyCode::Enter => {
                let stage = self.stage();
                let Some(value) = self.controller.current_options().get(self.option_cursor).cloned()
                else {
                    return;
                };
                match self.controller.select_option(stage, &value) {
                    Ok(request) => self.dispatch(request),
                    Err(e) => self.report(e),
                }
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_review_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.content_scroll = self.content_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_content_down(1),
            KeyCode::PageUp => self.content_scroll = self.content_scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll_content_down(10),
            KeyCode::Char('c') => self.copy_content(),
            KeyCode::Char('e') => self.export_content(),
            KeyCode::Char('n') => {
                self.controller.restart();
                self.notice = None;
                self.reset_view();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Scroll the article, stopping with its last row at the top
    fn scroll_content_down(&mut self, by: u16) {
        let width = match self.review_width.get() {
            0 => u16::MAX,
            w => w,
        };
        let rows = render::review_rows(self.controller.state(), width);
        let max = u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX);
        self.content_scroll = self.content_scroll.saturating_add(by).min(max);
    }

    /// Handle paste: only the seed field takes text, first line only
    pub fn handle_paste(&mut self, text: &str) {
        if self.stage() != Stage::SeedInput {
            return;
        }
        let clean = text.split(['\r', '\n']).next().unwrap_or("");
        if clean.is_empty() {
            return;
        }
        let mut seed = self.controller.state().seed_keyword.clone();
        seed.push_str(clean);
        if let Err(e) = self.controller.edit_seed(seed) {
            self.report(e);
        }
    }

    fn copy_content(&mut self) {
        let result = export::current_content(self.controller.state())
            .and_then(export::copy_to_clipboard);
        self.notice = Some(match result {
            Ok(()) => Notice::info("Copied to clipboard"),
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                Notice::error(format!("Copy failed: {}", e))
            }
        });
    }

    fn export_content(&mut self) {
        let result = export::current_content(self.controller.state())
            .and_then(|content| export::export_to_file(content, &self.export_config));
        self.notice = Some(match result {
            Ok(path) => Notice::info(format!("Saved to {}", path.display())),
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                Notice::error(format!("Export failed: {}", e))
            }
        });
    }
}
