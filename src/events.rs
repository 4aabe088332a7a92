use crate::app::{AnalysisJob, App, InputMode};
use crate::category::Category;
use crate::settings::SettingsField;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

#[derive(Debug, PartialEq)]
pub enum EventAction {
    Reload,
    Analyze(AnalysisJob),
    CheckStatus,
    SettingsSaved,
    Quit,
    None,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) -> EventAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c')) {
        return EventAction::Quit;
    }

    if app.settings_popup.is_some() {
        return handle_settings_key(app, key.code, ctrl);
    }
    if app.modal.is_some() {
        return handle_modal_key(app, key.code);
    }
    if app.input_mode == InputMode::Search {
        return handle_search_key(app, key.code, now);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => EventAction::Quit,
        KeyCode::Esc => {
            app.close_overlays();
            EventAction::None
        }
        KeyCode::Char('/') => {
            app.start_search();
            EventAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => EventAction::Reload,
        KeyCode::Char('v') | KeyCode::Char('V') => {
            app.toggle_view();
            EventAction::None
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            app.toggle_sidebar();
            EventAction::None
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.open_settings();
            EventAction::CheckStatus
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let delta = if key.code == KeyCode::Tab { 1 } else { -1 };
            app.cycle_category(delta);
            EventAction::Reload
        }
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            match Category::ALL.get(idx) {
                Some(&category) => {
                    app.select_category(category);
                    EventAction::Reload
                }
                None => EventAction::None,
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.move_selection(-1);
            EventAction::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.move_selection(1);
            EventAction::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_row(-1);
            EventAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_row(1);
            EventAction::None
        }
        KeyCode::Enter => {
            app.open_selected();
            EventAction::None
        }
        _ => EventAction::None,
    }
}

fn handle_modal_key(app: &mut App, key_code: KeyCode) -> EventAction {
    match key_code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.close_overlays();
            EventAction::None
        }
        KeyCode::Char('a') | KeyCode::Char('A') => match app.begin_analysis() {
            Some(job) => EventAction::Analyze(job),
            None => EventAction::None,
        },
        _ => EventAction::None,
    }
}

fn handle_search_key(app: &mut App, key_code: KeyCode, now: Instant) -> EventAction {
    match key_code {
        KeyCode::Esc => {
            app.cancel_search();
            EventAction::None
        }
        KeyCode::Enter => {
            app.submit_search();
            EventAction::Reload
        }
        KeyCode::Backspace => {
            app.pop_search_char(now);
            EventAction::None
        }
        KeyCode::Char(c) => {
            app.push_search_char(c, now);
            EventAction::None
        }
        _ => EventAction::None,
    }
}

fn handle_settings_key(app: &mut App, key_code: KeyCode, ctrl: bool) -> EventAction {
    if ctrl {
        return match key_code {
            KeyCode::Char('u') => match app.clear_saved_key() {
                Ok(()) => EventAction::CheckStatus,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to clear stored key");
                    app.flash = Some(format!("Could not clear key: {}", e));
                    EventAction::None
                }
            },
            KeyCode::Char('r') => {
                if let Some(form) = app.settings_popup.as_mut() {
                    form.toggle_reveal();
                }
                EventAction::None
            }
            _ => EventAction::None,
        };
    }

    match key_code {
        KeyCode::Esc => {
            app.close_overlays();
            EventAction::None
        }
        KeyCode::Enter => match app.save_settings() {
            Ok(()) => EventAction::SettingsSaved,
            Err(e) => {
                tracing::warn!(error = %e, "failed to save settings");
                app.flash = Some(format!("Could not save settings: {}", e));
                EventAction::None
            }
        },
        code => {
            if let Some(form) = app.settings_popup.as_mut() {
                match code {
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                        form.toggle_focus()
                    }
                    KeyCode::Left if form.focus == SettingsField::Language => {
                        form.cycle_language(-1)
                    }
                    KeyCode::Right if form.focus == SettingsField::Language => {
                        form.cycle_language(1)
                    }
                    KeyCode::Backspace => form.pop_char(),
                    KeyCode::Char(c) => form.push_char(c),
                    _ => {}
                }
            }
            EventAction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{FeedConfig, LoadOutcome};
    use crate::models::Article;
    use crate::settings::{self, Settings};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(dir: &std::path::Path, n: u32) -> App {
        let mut app = App::new(
            FeedConfig::default(),
            Settings::default(),
            settings::settings_path(dir),
        );
        app.begin_load();
        let articles = (1..=n)
            .map(|id| Article {
                id,
                title: format!("Story {}", id),
                summary: String::new(),
                content: String::new(),
                source: "Wire".to_string(),
                url: String::new(),
                image: None,
                published_at: None,
                category_code: "all".to_string(),
                keywords: vec![],
                original_title: None,
                original_summary: None,
            })
            .collect();
        app.finish_load(
            LoadOutcome {
                articles,
                notice: None,
            },
            chrono::Local::now(),
        );
        app
    }

    #[test]
    fn number_keys_and_tab_switch_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), 0);
        let now = Instant::now();
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('2')), now), EventAction::Reload);
        assert_eq!(app.category, Category::Tech);
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Tab), now), EventAction::Reload);
        assert_eq!(app.category, Category::Economy);
        assert_eq!(handle_key_event(&mut app, press(KeyCode::BackTab), now), EventAction::Reload);
        assert_eq!(app.category, Category::Tech);
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('9')), now), EventAction::None);
    }

    #[test]
    fn search_mode_captures_letters() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), 0);
        let now = Instant::now();
        handle_key_event(&mut app, press(KeyCode::Char('/')), now);
        for c in "quit".chars() {
            assert_eq!(handle_key_event(&mut app, press(KeyCode::Char(c)), now), EventAction::None);
        }
        assert_eq!(app.search_input, "quit");
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Enter), now), EventAction::Reload);
        assert_eq!(app.search_query, "quit");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn enter_opens_modal_and_a_requests_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), 3);
        let now = Instant::now();
        handle_key_event(&mut app, press(KeyCode::Right), now);
        handle_key_event(&mut app, press(KeyCode::Enter), now);
        assert_eq!(app.modal.as_ref().map(|m| m.article.id), Some(2));
        match handle_key_event(&mut app, press(KeyCode::Char('a')), now) {
            EventAction::Analyze(job) => {
                assert_eq!(job.article_id, 2);
                assert_eq!(job.title, "Story 2");
            }
            other => panic!("expected analysis, got {:?}", other),
        }
        // Already running.
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('a')), now), EventAction::None);
        // q closes the modal rather than quitting.
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('q')), now), EventAction::None);
        assert!(app.modal.is_none());
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('q')), now), EventAction::Quit);
    }

    #[test]
    fn settings_popup_edits_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), 0);
        let now = Instant::now();
        assert_eq!(
            handle_key_event(&mut app, press(KeyCode::Char('s')), now),
            EventAction::CheckStatus
        );
        for c in "key1".chars() {
            handle_key_event(&mut app, press(KeyCode::Char(c)), now);
        }
        handle_key_event(&mut app, press(KeyCode::Tab), now);
        handle_key_event(&mut app, press(KeyCode::Right), now);
        handle_key_event(&mut app, ctrl('r'), now);
        assert_eq!(app.settings_popup.as_ref().map(|f| f.display_key()), Some("key1".to_string()));
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Enter), now), EventAction::SettingsSaved);
        assert_eq!(app.settings.news_api_key.as_deref(), Some("key1"));
        assert_eq!(app.language(), "ar");
        assert!(app.settings_popup.is_none());
    }

    #[test]
    fn ctrl_u_clears_key_in_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), 0);
        app.settings.news_api_key = Some("old".to_string());
        let now = Instant::now();
        handle_key_event(&mut app, press(KeyCode::Char('s')), now);
        assert_eq!(handle_key_event(&mut app, ctrl('u'), now), EventAction::CheckStatus);
        assert_eq!(app.settings.news_api_key, None);
        assert_eq!(handle_key_event(&mut app, press(KeyCode::Esc), now), EventAction::None);
        assert!(app.settings_popup.is_none());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), 0);
        app.open_settings();
        assert_eq!(handle_key_event(&mut app, ctrl('c'), Instant::now()), EventAction::Quit);
    }

    #[test]
    fn view_toggle_and_sidebar() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(dir.path(), 0);
        let now = Instant::now();
        handle_key_event(&mut app, press(KeyCode::Char('v')), now);
        assert_eq!(app.view, crate::app::View::List);
        handle_key_event(&mut app, press(KeyCode::Char('b')), now);
        assert!(!app.sidebar_open);
    }
}
