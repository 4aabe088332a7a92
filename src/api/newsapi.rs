use crate::models::{NewsApiArticle, NewsApiResponse};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    list_timeout: Duration,
}

/// Parameters for the `everything` endpoint.
///
/// The key travels in the query string, so transport errors are stripped of
/// their URL before they leave this client.
pub struct EverythingQuery<'a> {
    pub q: &'a str,
    pub language: &'a str,
    pub page_size: usize,
    pub from: NaiveDate,
}

impl NewsApiClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            list_timeout: LIST_TIMEOUT,
        }
    }

    pub fn with_list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = timeout;
        self
    }

    pub fn everything_url(&self, query: &EverythingQuery<'_>) -> String {
        format!(
            "{}/everything?q={}&language={}&sortBy=publishedAt&pageSize={}&from={}&apiKey={}",
            self.base_url,
            urlencoding::encode(query.q),
            urlencoding::encode(query.language),
            query.page_size,
            query.from.format("%Y-%m-%d"),
            urlencoding::encode(&self.api_key),
        )
    }

    pub async fn fetch_everything(&self, query: &EverythingQuery<'_>) -> Result<Vec<NewsApiArticle>> {
        let url = self.everything_url(query);
        let response = self
            .client
            .get(&url)
            .timeout(self.list_timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to fetch news")?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read response")?;

        let resp: NewsApiResponse = match serde_json::from_str(&text) {
            Ok(resp) => resp,
            Err(e) if status.is_success() => {
                return Err(anyhow::Error::new(e).context(format!(
                    "Parse error. Response: {}",
                    text.chars().take(200).collect::<String>()
                )));
            }
            Err(_) => return Err(anyhow::anyhow!("API error: {} - {}", status, text)),
        };

        if resp.status != "ok" {
            let message = resp
                .message
                .unwrap_or_else(|| "Failed to fetch news.".to_string());
            return Err(anyhow::anyhow!(message));
        }
        Ok(resp.articles)
    }

    /// Probe the key with the cheapest possible request.
    pub async fn check_key(&self) -> Result<bool> {
        let url = format!(
            "{}/top-headlines?country=us&pageSize=1&apiKey={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        );
        let response = self
            .client
            .get(&url)
            .timeout(STATUS_TIMEOUT)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to reach news server")?;
        let text = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read response")?;
        let resp: NewsApiResponse =
            serde_json::from_str(&text).context("Failed to parse status response")?;
        Ok(resp.status == "ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;

    #[test]
    fn everything_url_encodes_query_and_key() {
        let client = NewsApiClient::with_base_url("k e/y".to_string(), "http://local/v2/".to_string());
        let url = client.everything_url(&EverythingQuery {
            q: "(ai) AND (chips)",
            language: "en",
            page_size: 12,
            from: NaiveDate::from_ymd_opt(2026, 10, 11).unwrap(),
        });
        assert_eq!(
            url,
            "http://local/v2/everything?q=%28ai%29%20AND%20%28chips%29&language=en\
             &sortBy=publishedAt&pageSize=12&from=2026-10-11&apiKey=k%20e%2Fy"
        );
    }

    fn query() -> EverythingQuery<'static> {
        EverythingQuery {
            q: "news",
            language: "de",
            page_size: 12,
            from: NaiveDate::from_ymd_opt(2026, 10, 11).unwrap(),
        }
    }

    #[tokio::test]
    async fn everything_returns_articles_and_sends_query() {
        let (base, requests) = test_server::serve(
            200,
            r#"{"status":"ok","articles":[{"title":"One","source":{"name":"Wire"}}]}"#,
        )
        .await;
        let client = NewsApiClient::with_base_url("k1".to_string(), format!("{}/v2", base));
        let articles = client.fetch_everything(&query()).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("One"));

        let seen = requests.lock().unwrap();
        assert!(seen[0].starts_with("GET /v2/everything?q=news&language=de&sortBy=publishedAt"));
        assert!(seen[0].contains("apiKey=k1"));
    }

    #[tokio::test]
    async fn non_ok_status_surfaces_api_message() {
        let (base, _) = test_server::serve(
            401,
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
        )
        .await;
        let client = NewsApiClient::with_base_url("bad".to_string(), base);
        let err = client.fetch_everything(&query()).await.unwrap_err();
        assert_eq!(err.to_string(), "Your API key is invalid.");
    }

    #[tokio::test]
    async fn unreadable_body_reports_parse_error() {
        let (base, _) = test_server::serve(200, "<html>oops").await;
        let client = NewsApiClient::with_base_url("k".to_string(), base);
        let err = client.fetch_everything(&query()).await.unwrap_err();
        assert!(format!("{:#}", err).starts_with("Parse error. Response: <html>oops"));
    }

    #[tokio::test]
    async fn non_json_error_status_is_reported() {
        let (base, _) = test_server::serve(502, "upstream down").await;
        let client = NewsApiClient::with_base_url("k".to_string(), base);
        let err = client.fetch_everything(&query()).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: 502 Bad Gateway - upstream down");
    }

    #[tokio::test]
    async fn transport_errors_do_not_carry_the_key() {
        let base = test_server::closed().await;
        let client = NewsApiClient::with_base_url("SECRETKEY123".to_string(), base);

        let err = client.fetch_everything(&query()).await.unwrap_err();
        let text = format!("{:#} {:?}", err, err);
        assert!(!text.contains("SECRETKEY123"), "{}", text);

        let err = client.check_key().await.unwrap_err();
        let text = format!("{:#} {:?}", err, err);
        assert!(!text.contains("SECRETKEY123"), "{}", text);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let base = test_server::stall().await;
        let client = NewsApiClient::with_base_url("k".to_string(), base)
            .with_list_timeout(Duration::from_millis(200));
        let err = client.fetch_everything(&query()).await.unwrap_err();
        let timed_out = err
            .chain()
            .filter_map(|c| c.downcast_ref::<reqwest::Error>())
            .any(|e| e.is_timeout());
        assert!(timed_out, "{:#}", err);
    }

    #[tokio::test]
    async fn check_key_reads_status_field() {
        let (base, requests) = test_server::serve(200, r#"{"status":"ok","articles":[]}"#).await;
        let client = NewsApiClient::with_base_url("k".to_string(), base);
        assert!(client.check_key().await.unwrap());
        assert!(requests.lock().unwrap()[0].starts_with("GET /top-headlines?country=us&pageSize=1"));

        let (base, _) = test_server::serve(401, r#"{"status":"error","message":"nope"}"#).await;
        let client = NewsApiClient::with_base_url("k".to_string(), base);
        assert!(!client.check_key().await.unwrap());
    }
}
