mod analysis;
mod api;
mod app;
mod category;
mod events;
mod loader;
mod models;
mod settings;
mod ui;

use app::{AnalysisJob, App};
use category::Category;
use chrono::{Local, Utc};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use events::EventAction;
use loader::FeedConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::{io, time::Duration, time::Instant};
use tokio::sync::Mutex;

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "newsdesk", version, about = "Terminal news reader with AI summaries")]
struct Cli {
    /// Serve built-in sample articles instead of calling NewsAPI
    #[arg(long)]
    demo: bool,

    /// Article language code (overrides the saved setting)
    #[arg(long)]
    language: Option<String>,

    /// Category to open with: all, tech, economy, politics, world, sports
    #[arg(long)]
    category: Option<String>,

    /// Translate loaded articles into this language code using OpenAI
    #[arg(long, value_name = "LANG")]
    translate_to: Option<String>,

    /// Directory holding settings.json and logs
    #[arg(long)]
    config_dir: Option<PathBuf>,

    #[arg(long, default_value = api::newsapi::DEFAULT_BASE_URL)]
    news_base_url: String,

    #[arg(long, default_value = api::openai::DEFAULT_BASE_URL)]
    openai_base_url: String,
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn init_logging(config_dir: &Path) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    let logs_dir = settings::logs_dir(config_dir);
    let log_path = logs_dir.join("newsdesk.log");
    let opened = std::fs::create_dir_all(&logs_dir).and_then(|_| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });
    match opened {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(_) => {
            // The terminal belongs to the UI, so nothing goes to stderr.
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(io::sink)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config_dir = cli.config_dir.clone().unwrap_or_else(settings::config_dir);
    init_logging(&config_dir);

    let config = FeedConfig {
        news_base_url: cli.news_base_url.clone(),
        openai_base_url: cli.openai_base_url.clone(),
        default_news_key: env_key("NEWS_API_KEY"),
        openai_key: env_key("OPENAI_API_KEY"),
        demo: cli.demo,
        translate_to: cli.translate_to.clone(),
        news_timeout: api::newsapi::LIST_TIMEOUT,
    };

    let settings_path = settings::settings_path(&config_dir);
    let mut settings = Settings::load(&settings_path);
    if let Some(language) = cli.language.as_deref() {
        if settings::language_name(language).is_some() {
            settings.language = language.to_lowercase();
        } else {
            tracing::warn!(language, "unsupported language; keeping saved setting");
        }
    }

    if let Some(target) = cli.translate_to.as_deref() {
        if settings::translation_language_name(target).is_none() {
            tracing::warn!(target_language = target, "unknown translation language");
        }
    }

    let mut app = App::new(config, settings, settings_path);
    if let Some(code) = cli.category.as_deref() {
        match Category::from_code(code) {
            Some(category) => {
                app.select_category(category);
            }
            None => tracing::warn!(category = code, "unknown category; showing all"),
        }
    }
    tracing::info!(
        demo = cli.demo,
        language = app.language(),
        category = app.category.code(),
        "newsdesk starting"
    );

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let app = Arc::new(Mutex::new(app));
    spawn_status_task(app.clone());
    spawn_load_task(app.clone());

    let result = run_loop(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal error");
    }
    tracing::info!("newsdesk exited");
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
) -> io::Result<()> {
    loop {
        {
            let mut app_lock = app.lock().await;
            app_lock.update_animation_frame();
            let due = app_lock.take_due_search(Instant::now());
            terminal.draw(|f| ui::render(f, &mut app_lock))?;
            drop(app_lock);
            if due {
                spawn_load_task(app.clone());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = {
                    let mut app_lock = app.lock().await;
                    events::handle_key_event(&mut app_lock, key, Instant::now())
                };
                match action {
                    EventAction::Quit => break,
                    EventAction::Reload => spawn_load_task(app.clone()),
                    EventAction::Analyze(job) => spawn_analysis_task(app.clone(), job),
                    EventAction::CheckStatus => spawn_status_task(app.clone()),
                    EventAction::SettingsSaved => {
                        spawn_status_task(app.clone());
                        spawn_load_task(app.clone());
                    }
                    EventAction::None => {}
                }
            }
        } else {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
    Ok(())
}

fn spawn_load_task(app: Arc<Mutex<App>>) {
    tokio::spawn(async move {
        let (request, config) = {
            let mut app_lock = app.lock().await;
            match app_lock.begin_load() {
                Some(request) => (request, app_lock.config.clone()),
                None => return,
            }
        };

        let outcome = loader::load_news(&request, &config, Utc::now()).await;

        let reload = {
            let mut app_lock = app.lock().await;
            app_lock.finish_load(outcome, Local::now())
        };
        if reload {
            spawn_load_task(app);
        }
    });
}

fn spawn_analysis_task(app: Arc<Mutex<App>>, job: AnalysisJob) {
    tokio::spawn(async move {
        let (client, language) = {
            let app_lock = app.lock().await;
            (app_lock.config.openai_client(), app_lock.analysis_language())
        };

        let result = analysis::analyze(client, &job.title, &job.body, &language).await;

        let mut app_lock = app.lock().await;
        app_lock.finish_analysis(job.article_id, result);
    });
}

fn spawn_status_task(app: Arc<Mutex<App>>) {
    tokio::spawn(async move {
        let (config, check) = {
            let mut app_lock = app.lock().await;
            let check = app_lock.begin_status_check();
            (app_lock.config.clone(), check)
        };

        let status = loader::check_status(&config, check.user_key.as_deref()).await;

        let mut app_lock = app.lock().await;
        app_lock.finish_status_check(check.seq, status);
    });
}
