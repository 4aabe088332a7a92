use crate::api::demo::DemoFeed;
use crate::api::newsapi::{EverythingQuery, NewsApiClient};
use crate::api::openai::OpenAIClient;
use crate::category::{self, Category};
use crate::models::{ApiStatus, Article, ChatMessage, NewsApiArticle, TranslatedArticle};
use crate::settings;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub const PAGE_SIZE: usize = 12;
const LOOKBACK_DAYS: i64 = 7;
const SUMMARY_FALLBACK_CHARS: usize = 200;
const MAX_KEYWORDS: usize = 3;
const TRANSLATE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "in", "on", "at", "to", "for", "of", "and", "or",
    "but", "with", "as", "by", "from",
];

/// Where the loader gets its data. Fixed for the lifetime of the process.
#[derive(Clone)]
pub struct FeedConfig {
    pub news_base_url: String,
    pub openai_base_url: String,
    pub default_news_key: Option<String>,
    pub openai_key: Option<String>,
    pub demo: bool,
    pub translate_to: Option<String>,
    pub news_timeout: std::time::Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            news_base_url: crate::api::newsapi::DEFAULT_BASE_URL.to_string(),
            openai_base_url: crate::api::openai::DEFAULT_BASE_URL.to_string(),
            default_news_key: None,
            openai_key: None,
            demo: false,
            translate_to: None,
            news_timeout: crate::api::newsapi::LIST_TIMEOUT,
        }
    }
}

impl FeedConfig {
    pub fn openai_client(&self) -> Option<OpenAIClient> {
        self.openai_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| OpenAIClient::with_base_url(k.clone(), self.openai_base_url.clone()))
    }
}

/// Snapshot of the state a single load works from.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub category: Category,
    pub query: String,
    pub language: String,
    pub page_size: usize,
    pub user_key: Option<String>,
}

/// A user-facing message shown in place of results.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::new("Could not load news", message)
    }

    pub fn no_results() -> Self {
        Self::new("No results", "Try another keyword or category.")
    }
}

pub struct LoadOutcome {
    pub articles: Vec<Article>,
    pub notice: Option<Notice>,
}

impl LoadOutcome {
    fn failed(notice: Notice) -> Self {
        Self {
            articles: Vec::new(),
            notice: Some(notice),
        }
    }
}

/// User key first, then the key from the environment.
pub fn effective_key(user_key: Option<&str>, default_key: Option<&str>) -> Option<String> {
    user_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .or_else(|| default_key.map(str::trim).filter(|k| !k.is_empty()))
        .map(str::to_string)
}

pub async fn load_news(request: &LoadRequest, config: &FeedConfig, now: DateTime<Utc>) -> LoadOutcome {
    let code = request.category.code();
    let raw = if config.demo {
        debug!(category = code, query = %request.query, "loading demo feed");
        DemoFeed.articles(request.category, &request.query, request.page_size, now)
    } else {
        let Some(key) = effective_key(request.user_key.as_deref(), config.default_news_key.as_deref())
        else {
            return LoadOutcome::failed(Notice::new(
                "API key is not configured",
                "Enter a NewsAPI key in settings (s).",
            ));
        };
        let client = NewsApiClient::with_base_url(key, config.news_base_url.clone())
            .with_list_timeout(config.news_timeout);
        let q = category::search_expression(&request.query, request.category);
        let from = (now - Duration::days(LOOKBACK_DAYS)).date_naive();
        let query = EverythingQuery {
            q: &q,
            language: &request.language,
            page_size: request.page_size,
            from,
        };
        match client.fetch_everything(&query).await {
            Ok(articles) => articles,
            Err(e) => {
                let message = describe_error(&e, "News server timed out");
                warn!(category = code, error = %message, "news load failed");
                return LoadOutcome::failed(Notice::load_failed(message));
            }
        }
    };

    let mut articles = normalize(raw, code);
    info!(category = code, count = articles.len(), "news loaded");
    if articles.is_empty() {
        return LoadOutcome::failed(Notice::no_results());
    }

    if let (Some(target), Some(client)) = (config.translate_to.as_deref(), config.openai_client()) {
        match translate_articles(&client, &articles, target).await {
            Ok(translated) => articles = translated,
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(target_language = target, error = %message, "translation skipped");
            }
        }
    }

    LoadOutcome {
        articles,
        notice: None,
    }
}

pub fn normalize(raw: Vec<NewsApiArticle>, category_code: &str) -> Vec<Article> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, a)| {
            let title = a.title.unwrap_or_default();
            let content = a.content.unwrap_or_default();
            let summary = match a.description.filter(|d| !d.trim().is_empty()) {
                Some(description) => description,
                None => content.chars().take(SUMMARY_FALLBACK_CHARS).collect(),
            };
            let published_at = a
                .published_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|d| d.with_timezone(&Utc));
            Article {
                id: idx as u32 + 1,
                keywords: extract_keywords(&title),
                title,
                summary,
                content,
                source: a
                    .source
                    .and_then(|s| s.name)
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
                url: a.url.unwrap_or_default(),
                image: a.url_to_image.filter(|u| !u.trim().is_empty()),
                published_at,
                category_code: category_code.to_string(),
                original_title: None,
                original_summary: None,
            }
        })
        .collect()
}

pub fn extract_keywords(title: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    for word in title.replace(['-', ':'], " ").split_whitespace() {
        let clean: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
        if clean.chars().count() >= 3 && !STOPWORDS.contains(&clean.to_lowercase().as_str()) {
            keywords.push(clean);
            if keywords.len() >= MAX_KEYWORDS {
                break;
            }
        }
    }
    keywords
}

/// Turn a client error into a one-line message for the UI.
pub fn describe_error(e: &anyhow::Error, timeout_message: &str) -> String {
    for cause in e.chain() {
        if let Some(re) = cause.downcast_ref::<reqwest::Error>() {
            if re.is_timeout() {
                return timeout_message.to_string();
            }
            return format!("Network error: {}", re);
        }
    }
    format!("{:#}", e)
}

async fn translate_articles(
    client: &OpenAIClient,
    articles: &[Article],
    target: &str,
) -> Result<Vec<Article>> {
    let language = settings::translation_language_name(target).unwrap_or(target);
    let payload: Vec<TranslatedArticle> = articles
        .iter()
        .map(|a| TranslatedArticle {
            id: a.id,
            title: Some(a.title.clone()),
            summary: Some(a.summary.clone()),
        })
        .collect();
    let payload = serde_json::to_string_pretty(&payload).context("Failed to encode articles")?;
    let prompt = format!(
        "Translate the following news titles and summaries into {language}.\n\
         Keep the headline style natural.\n\n\
         [Articles]\n{payload}\n\n\
         [Response format]\n\
         Reply with only a JSON array, no other text:\n\
         [{{\"id\": 1, \"title\": \"translated title\", \"summary\": \"translated summary\"}}]"
    );
    let messages = vec![
        ChatMessage::system(format!(
            "You are a professional news translator. Translate into natural {language}. Reply in JSON only."
        )),
        ChatMessage::user(prompt),
    ];
    let reply = client.complete(messages, 2000, TRANSLATE_TIMEOUT).await?;
    let translations = parse_translations(&reply)?;
    Ok(apply_translations(articles, translations))
}

pub fn parse_translations(reply: &str) -> Result<Vec<TranslatedArticle>> {
    serde_json::from_str(strip_code_fences(reply)).context("Translation reply is not valid JSON")
}

pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

pub fn apply_translations(articles: &[Article], translations: Vec<TranslatedArticle>) -> Vec<Article> {
    let by_id: HashMap<u32, TranslatedArticle> =
        translations.into_iter().map(|t| (t.id, t)).collect();
    articles
        .iter()
        .cloned()
        .map(|mut article| {
            if let Some(t) = by_id.get(&article.id) {
                article.original_title = Some(article.title.clone());
                article.original_summary = Some(article.summary.clone());
                if let Some(title) = t.title.as_ref().filter(|s| !s.trim().is_empty()) {
                    article.title = title.clone();
                }
                if let Some(summary) = t.summary.as_ref().filter(|s| !s.trim().is_empty()) {
                    article.summary = summary.clone();
                }
            }
            article
        })
        .collect()
}

pub async fn check_status(config: &FeedConfig, user_key: Option<&str>) -> ApiStatus {
    let has_user_news_key = user_key.map(|k| !k.trim().is_empty()).unwrap_or(false);
    let has_default_news_key = config
        .default_news_key
        .as_deref()
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);

    let news_key_valid = if config.demo {
        true
    } else {
        match effective_key(user_key, config.default_news_key.as_deref()) {
            Some(key) => NewsApiClient::with_base_url(key, config.news_base_url.clone())
                .check_key()
                .await
                .unwrap_or_else(|e| {
                    let message = format!("{:#}", e);
                    debug!(error = %message, "news key check failed");
                    false
                }),
            None => false,
        }
    };
    let openai_ready = config
        .openai_key
        .as_deref()
        .map(OpenAIClient::looks_ready)
        .unwrap_or(false);

    ApiStatus {
        has_default_news_key,
        has_user_news_key,
        news_key_valid,
        openai_ready,
        message: status_message(news_key_valid, openai_ready),
    }
}

pub fn status_message(news_key_valid: bool, openai_ready: bool) -> String {
    let news = if news_key_valid {
        "NewsAPI connected"
    } else {
        "NewsAPI key needed"
    };
    let ai = if openai_ready {
        "AI analysis available"
    } else {
        "OpenAI key needed (AI analysis)"
    };
    format!("{} | {}", news, ai)
}
