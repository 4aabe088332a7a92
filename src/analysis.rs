use crate::api::openai::OpenAIClient;
use crate::loader::describe_error;
use crate::models::{AnalysisResult, ChatMessage, Sentiment};
use std::time::Duration;
use tracing::{info, instrument, warn};

const MAX_INPUT_CHARS: usize = 2000;
const MIN_INPUT_CHARS: usize = 50;
const FALLBACK_SUMMARY_CHARS: usize = 500;
const SUMMARY_LINES: usize = 3;
const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);

/// The text sent for analysis, or `None` when there is too little to work with.
pub fn analysis_input(title: &str, body: &str) -> Option<String> {
    let text: String = format!("{}. {}", title, body)
        .chars()
        .take(MAX_INPUT_CHARS)
        .collect();
    (text.trim().chars().count() >= MIN_INPUT_CHARS).then_some(text)
}

pub fn build_prompt(text: &str, language: &str) -> String {
    format!(
        "Analyze the following news article.\n\n\
         [Article]\n{text}\n\n\
         [Instructions]\n\
         1. Summarize the key points in {language} in three lines.\n\
         2. Run a sentiment analysis and give positive/negative percentages (summing to 100%).\n\n\
         [Response format] (use exactly this format)\n\
         Summary:\n\
         - (first point)\n\
         - (second point)\n\
         - (third point)\n\n\
         Sentiment:\n\
         Positive: (number)%\n\
         Negative: (number)%\n"
    )
}

#[instrument(level = "info", skip_all, fields(chars = body.len()))]
pub async fn analyze(
    client: Option<OpenAIClient>,
    title: &str,
    body: &str,
    language: &str,
) -> Result<AnalysisResult, String> {
    let Some(client) = client else {
        return Err("OpenAI API key is not configured.".to_string());
    };
    let Some(text) = analysis_input(title, body) else {
        return Err("Not enough content to analyze.".to_string());
    };

    let messages = vec![
        ChatMessage::system(format!(
            "You are a news analyst. Answer clearly and concisely in {language}."
        )),
        ChatMessage::user(build_prompt(&text, language)),
    ];
    match client.complete(messages, 500, ANALYSIS_TIMEOUT).await {
        Ok(reply) => {
            let result = parse_analysis(&reply);
            info!(
                positive = result.positive,
                negative = result.negative,
                sentiment = result.sentiment.label(),
                "analysis complete"
            );
            Ok(result)
        }
        Err(e) => {
            let message = describe_error(&e, "AI analysis timed out");
            warn!(error = %message, "analysis failed");
            Err(message)
        }
    }
}

pub fn parse_analysis(text: &str) -> AnalysisResult {
    let mut positive: u8 = 50;
    let mut negative: u8 = 50;
    let mut summary_lines = Vec::new();

    for line in text.trim().lines() {
        let line = line.trim();
        if line.starts_with('-') || line.starts_with('•') {
            summary_lines.push(line);
        }
        let lower = line.to_lowercase();
        if !line.contains('%') {
            continue;
        }
        if lower.contains("positive") {
            if let Some(value) = percentage(line) {
                positive = value;
            }
        }
        if lower.contains("negative") {
            if let Some(value) = percentage(line) {
                negative = value;
            }
        }
    }

    let summary = if summary_lines.is_empty() {
        text.chars().take(FALLBACK_SUMMARY_CHARS).collect()
    } else {
        summary_lines
            .into_iter()
            .take(SUMMARY_LINES)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let sentiment = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };

    AnalysisResult {
        summary,
        positive,
        negative,
        sentiment,
    }
}

/// Digits between the last `:` and the first `%`, clamped to a percentage.
/// Numbers too large for `u32` clamp to 100 as well.
fn percentage(line: &str) -> Option<u8> {
    let before = line.split('%').next()?;
    let tail = before.rsplit(':').next()?;
    let digits: String = tail.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    Some(value.min(100) as u8)
}
