use crate::category::Category;
use crate::loader::{FeedConfig, LoadOutcome, LoadRequest, Notice, PAGE_SIZE};
use crate::models::{AnalysisResult, ApiStatus, Article};
use crate::settings::{self, Settings, SettingsForm};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
const MIN_LIVE_QUERY_CHARS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Grid,
    List,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Grid => "Grid",
            View::List => "List",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnalysisPanel {
    Idle,
    Running,
    Done(AnalysisResult),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailModal {
    pub article: Article,
    pub analysis: AnalysisPanel,
}

/// Work handed to the status task. `seq` identifies the newest check.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusCheck {
    pub seq: u64,
    pub user_key: Option<String>,
}

/// Work handed to the analysis task.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisJob {
    pub article_id: u32,
    pub title: String,
    pub body: String,
}

pub struct App {
    pub config: FeedConfig,
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub category: Category,
    pub view: View,
    pub articles: Vec<Article>,
    pub filtered: Vec<Article>,
    pub search_query: String,
    pub search_input: String,
    pub input_mode: InputMode,
    pub search_edited_at: Option<Instant>,
    pub loading: bool,
    pub pending_reload: bool,
    pub notice: Option<Notice>,
    pub selected: usize,
    pub grid_columns: usize,
    pub modal: Option<DetailModal>,
    pub settings_popup: Option<SettingsForm>,
    pub status: Option<ApiStatus>,
    pub status_checking: bool,
    status_seq: u64,
    pub flash: Option<String>,
    pub last_update: Option<DateTime<Local>>,
    pub animation_frame: u32,
    pub sidebar_open: bool,
}

impl App {
    pub fn new(config: FeedConfig, settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            config,
            settings,
            settings_path,
            category: Category::All,
            view: View::Grid,
            articles: Vec::new(),
            filtered: Vec::new(),
            search_query: String::new(),
            search_input: String::new(),
            input_mode: InputMode::Normal,
            search_edited_at: None,
            loading: false,
            pending_reload: false,
            notice: None,
            selected: 0,
            grid_columns: 3,
            modal: None,
            settings_popup: None,
            status: None,
            status_checking: false,
            status_seq: 0,
            flash: None,
            last_update: None,
            animation_frame: 0,
            sidebar_open: true,
        }
    }

    pub fn language(&self) -> &str {
        &self.settings.language
    }

    /// Language the AI summary is written in.
    pub fn analysis_language(&self) -> String {
        self.config
            .translate_to
            .as_deref()
            .and_then(settings::translation_language_name)
            .unwrap_or("English")
            .to_string()
    }

    pub fn current_request(&self) -> LoadRequest {
        LoadRequest {
            category: self.category,
            query: self.search_query.clone(),
            language: self.settings.language.clone(),
            page_size: PAGE_SIZE,
            user_key: self.settings.news_api_key.clone(),
        }
    }

    /// Start a load unless one is running; a running load gets a follow-up instead.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        if self.loading {
            self.pending_reload = true;
            return None;
        }
        self.loading = true;
        self.pending_reload = false;
        self.notice = None;
        Some(self.current_request())
    }

    /// Apply a finished load. Returns true when another load must follow.
    pub fn finish_load(&mut self, outcome: LoadOutcome, now: DateTime<Local>) -> bool {
        self.loading = false;
        if self.pending_reload {
            // State changed while this request was in flight.
            self.pending_reload = false;
            return true;
        }
        match outcome.notice {
            Some(notice) => {
                self.articles.clear();
                self.filtered.clear();
                self.notice = Some(notice);
            }
            None => {
                self.articles = outcome.articles;
                self.filtered = self.articles.clone();
                self.notice = None;
                self.last_update = Some(now);
            }
        }
        self.selected = 0;
        false
    }

    pub fn select_category(&mut self, category: Category) -> bool {
        self.category = category;
        self.search_query.clear();
        self.search_input.clear();
        self.search_edited_at = None;
        self.input_mode = InputMode::Normal;
        true
    }

    pub fn cycle_category(&mut self, delta: isize) -> bool {
        let next = self.category.cycle(delta);
        self.select_category(next)
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input = self.search_query.clone();
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input = self.search_query.clone();
        self.search_edited_at = None;
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        self.search_input.push(c);
        self.search_edited_at = Some(now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        self.search_input.pop();
        self.search_edited_at = Some(now);
    }

    pub fn submit_search(&mut self) -> bool {
        self.search_query = self.search_input.trim().to_string();
        self.search_edited_at = None;
        self.input_mode = InputMode::Normal;
        true
    }

    /// Live search: fires once typing has paused and the input is empty or long enough.
    pub fn take_due_search(&mut self, now: Instant) -> bool {
        let Some(edited_at) = self.search_edited_at else {
            return false;
        };
        if now.duration_since(edited_at) < SEARCH_DEBOUNCE {
            return false;
        }
        self.search_edited_at = None;
        let len = self.search_input.trim().chars().count();
        if len != 0 && len < MIN_LIVE_QUERY_CHARS {
            return false;
        }
        self.search_query = self.search_input.trim().to_string();
        true
    }

    pub fn change_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn toggle_view(&mut self) {
        self.change_view(match self.view {
            View::Grid => View::List,
            View::List => View::Grid,
        });
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn headline(&self) -> Option<&Article> {
        self.filtered.first()
    }

    pub fn grid_articles(&self) -> &[Article] {
        self.filtered.get(1..).unwrap_or(&[])
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.filtered.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.filtered.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, max) as usize;
    }

    /// Up/Down: a full grid row in grid view, one item in list view.
    /// The headline sits on its own row above the grid.
    pub fn move_row(&mut self, delta: isize) {
        let step = match self.view {
            View::Grid => self.grid_columns.max(1) as isize,
            View::List => 1,
        };
        if delta < 0 && self.selected >= 1 && self.selected <= step as usize {
            self.selected = 0;
            return;
        }
        if delta > 0 && self.selected == 0 {
            self.move_selection(1);
            return;
        }
        self.move_selection(delta * step);
    }

    pub fn open_modal(&mut self, article_id: u32) -> bool {
        let Some(article) = self.articles.iter().find(|a| a.id == article_id).cloned() else {
            return false;
        };
        self.modal = Some(DetailModal {
            article,
            analysis: AnalysisPanel::Idle,
        });
        true
    }

    pub fn open_selected(&mut self) -> bool {
        match self.selected_article().map(|a| a.id) {
            Some(id) => self.open_modal(id),
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn close_overlays(&mut self) {
        self.close_modal();
        self.close_settings();
    }

    /// Mark the open modal as analyzing. `None` when there is nothing to analyze
    /// or a run is already in progress.
    pub fn begin_analysis(&mut self) -> Option<AnalysisJob> {
        let modal = self.modal.as_mut()?;
        if modal.analysis == AnalysisPanel::Running {
            return None;
        }
        modal.analysis = AnalysisPanel::Running;
        Some(AnalysisJob {
            article_id: modal.article.id,
            title: modal.article.title.clone(),
            body: modal.article.analysis_body().to_string(),
        })
    }

    /// Results for a modal that has since closed or moved on are dropped.
    pub fn finish_analysis(&mut self, article_id: u32, result: Result<AnalysisResult, String>) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        if modal.article.id != article_id || modal.analysis != AnalysisPanel::Running {
            return;
        }
        modal.analysis = match result {
            Ok(result) => AnalysisPanel::Done(result),
            Err(message) => AnalysisPanel::Failed(message),
        };
    }

    pub fn open_settings(&mut self) {
        self.settings_popup = Some(SettingsForm::from_settings(&self.settings));
        self.flash = None;
    }

    pub fn close_settings(&mut self) {
        self.settings_popup = None;
    }

    /// Persist the form and close the popup.
    pub fn save_settings(&mut self) -> Result<()> {
        let Some(form) = self.settings_popup.as_ref() else {
            return Ok(());
        };
        let settings = form.to_settings();
        settings.save(&self.settings_path)?;
        self.settings = settings;
        self.close_settings();
        self.flash = Some("Settings saved".to_string());
        Ok(())
    }

    /// Drop the stored key right away, without waiting for save.
    pub fn clear_saved_key(&mut self) -> Result<()> {
        if let Some(form) = self.settings_popup.as_mut() {
            form.clear_key();
        }
        self.settings.news_api_key = None;
        self.settings.save(&self.settings_path)
    }

    pub fn begin_status_check(&mut self) -> StatusCheck {
        self.status_seq += 1;
        self.status_checking = true;
        StatusCheck {
            seq: self.status_seq,
            user_key: self.settings.news_api_key.clone(),
        }
    }

    /// Only the most recently started check may update the status.
    pub fn finish_status_check(&mut self, seq: u64, status: ApiStatus) {
        if seq != self.status_seq {
            return;
        }
        self.status_checking = false;
        self.status = Some(status);
    }

    pub fn update_animation_frame(&mut self) {
        if self.loading || self.filtered.is_empty() {
            self.animation_frame = self.animation_frame.wrapping_add(1);
        } else {
            self.animation_frame = 0;
        }
    }
}
