use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use once_cell::sync::OnceCell;
use tracing::debug;
use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::error::{AppError, Result};

/// Body sent back to the caller when no page with revisions was found.
pub const NOT_FOUND_MESSAGE: &str = "Article content not found.";

// Shared across every request to reuse connections
static CLIENT: OnceCell<Client> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleContent {
    Found(String),
    NotFound,
}

fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Builds the process-wide HTTP client. Later calls keep the first client.
pub fn init_client(timeout: Duration) -> Result<()> {
    let client = build_client(timeout)?;
    if CLIENT.set(client).is_err() {
        debug!("HTTP client already initialised, keeping existing instance");
    }
    Ok(())
}

fn client() -> &'static Client {
    CLIENT.get_or_init(|| {
        build_client(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .expect("Failed to build HTTP client")
    })
}

/// Queries the MediaWiki API for the latest revision of `title`, following
/// redirects to the target page.
pub async fn fetch_article_content(api_url: &str, title: &str) -> Result<ArticleContent> {
    debug!("Querying {} for title {:?}", api_url, title);

    let response = client()
        .get(api_url)
        .query(&[
            ("format", "json"),
            ("action", "query"),
            ("prop", "revisions"),
            ("rvprop", "content"),
            ("redirects", "1"),
            ("titles", title),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    let json: Value = serde_json::from_str(&body)?;

    extract_article_content(&json)
}

/// Picks the first page carrying a `revisions` array and returns the raw
/// wikitext of its first revision.
pub fn extract_article_content(json: &Value) -> Result<ArticleContent> {
    // MediaWiki omits `query` entirely when no titles were given
    let Some(pages) = json
        .get("query")
        .and_then(|query| query.get("pages"))
        .and_then(Value::as_object)
    else {
        return Ok(ArticleContent::NotFound);
    };

    for page in pages.values() {
        let revisions = match page.get("revisions") {
            Some(Value::Null) | None => continue,
            Some(revisions) => revisions,
        };

        let content = revisions[0]["*"]
            .as_str()
            .ok_or_else(|| AppError::ParseError("revision has no content field".to_string()))?;

        return Ok(ArticleContent::Found(content.to_string()));
    }

    Ok(ArticleContent::NotFound)
}

/// Cuts `text` down to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
