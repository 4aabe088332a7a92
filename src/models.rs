use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized article as shown in the headline, cards and detail modal.
#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub source: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_code: String,
    pub keywords: Vec<String>,
    pub original_title: Option<String>,
    pub original_summary: Option<String>,
}

impl Article {
    pub fn category_label(&self) -> String {
        crate::category::label_for_code(&self.category_code)
    }

    /// Text handed to the analyzer: full content when available, summary otherwise.
    pub fn analysis_body(&self) -> &str {
        if self.content.trim().is_empty() {
            &self.summary
        } else {
            &self.content
        }
    }
}

#[derive(Deserialize)]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: Option<NewsApiSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "urlToImage", default)]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsApiSource {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Deserialize)]
pub struct ChatErrorResponse {
    pub error: ChatError,
}

#[derive(Deserialize)]
pub struct ChatError {
    pub message: String,
}

/// One entry of the translation reply.
#[derive(Serialize, Deserialize, Debug)]
pub struct TranslatedArticle {
    pub id: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub summary: String,
    pub positive: u8,
    pub negative: u8,
    pub sentiment: Sentiment,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiStatus {
    pub has_default_news_key: bool,
    pub has_user_news_key: bool,
    pub news_key_valid: bool,
    pub openai_ready: bool,
    pub message: String,
}

impl ApiStatus {
    pub fn connected(&self) -> bool {
        self.news_key_valid || self.has_default_news_key
    }
}
