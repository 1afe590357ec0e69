//! Sales-page import: fetch, reduce to text, extract product details

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entities::sea_orm_active_enums::Niche;
use crate::error::{AppError, AppResult};
use crate::services::llm::{CompletionRequest, JsonSchema, TextGenerator, parse_structured};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_PAGE_CHARS: usize = 15_000;
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref META_DESCRIPTION: Selector = Selector::parse(r#"meta[name="description"], meta[property="og:description"]"#).unwrap();
    static ref BODY: Selector = Selector::parse("body").unwrap();
}

const SYSTEM_PROMPT: &str = r#"You are a product information extractor. Analyze the provided sales page text and extract key product details in JSON format.

Extract the following fields:
- productName: The main product/offer name
- vendor: Company or person selling it
- niche: One of: manifestation, woodworking, prepping, health, finance, other
- description: 2-3 sentence description of what the product does
- price: Estimated price (empty string if not visible)
- benefits: Array of 3-5 key benefits
- targetAudience: Who this product is for
- headline: Main headline from the sales page
- callToAction: Primary CTA text"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub product_name: String,
    pub vendor: String,
    pub niche: Niche,
    pub description: String,
    #[serde(default)]
    pub price: Option<String>,
    pub benefits: Vec<String>,
    pub target_audience: String,
    pub headline: String,
    pub call_to_action: String,
}

fn product_schema() -> JsonSchema {
    JsonSchema {
        name: "product_info",
        schema: json!({
            "type": "object",
            "properties": {
                "productName": { "type": "string" },
                "vendor": { "type": "string" },
                "niche": {
                    "type": "string",
                    "enum": ["manifestation", "woodworking", "prepping", "health", "finance", "other"]
                },
                "description": { "type": "string" },
                "price": { "type": "string" },
                "benefits": { "type": "array", "items": { "type": "string" } },
                "targetAudience": { "type": "string" },
                "headline": { "type": "string" },
                "callToAction": { "type": "string" }
            },
            "required": [
                "productName", "vendor", "niche", "description", "price",
                "benefits", "targetAudience", "headline", "callToAction"
            ],
            "additionalProperties": false
        }),
    }
}

fn collapse(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Title, meta description and visible body text, whitespace-collapsed and
/// cut to the extraction budget
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();

    if let Some(title) = document.select(&TITLE).next() {
        parts.push(format!("Title: {}", collapse(&title.text().collect::<String>())));
    }

    if let Some(content) = document
        .select(&META_DESCRIPTION)
        .find_map(|m| m.value().attr("content"))
    {
        parts.push(format!("Description: {}", collapse(content)));
    }

    if let Some(body) = document.select(&BODY).next() {
        let text: Vec<&str> = body
            .descendants()
            .filter(|node| {
                !node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
                })
            })
            .filter_map(|node| node.value().as_text().map(|t| &**t))
            .collect();
        parts.push(collapse(&text.join(" ")));
    }

    parts.retain(|p| !p.is_empty());
    parts.join("\n").chars().take(MAX_PAGE_CHARS).collect()
}

pub async fn fetch_page(client: &Client, url: &str) -> AppResult<String> {
    let parsed = url::Url::parse(url).map_err(|e| AppError::Validation(format!("Invalid URL: {}", e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation("URL must use http or https".to_string()));
    }

    let response = client
        .get(parsed)
        .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::Generation(format!("Failed to import URL: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Generation(format!(
            "Failed to import URL: page returned {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| AppError::Generation(format!("Failed to import URL: {}", e)))
}

pub async fn extract_product(llm: &dyn TextGenerator, html: &str) -> AppResult<ProductInfo> {
    let text = page_text(html);
    if text.is_empty() {
        return Err(AppError::Generation("Failed to import URL: page has no readable text".to_string()));
    }

    let request = CompletionRequest::structured(
        SYSTEM_PROMPT,
        format!("Extract product information from this sales page:\n\n{}", text),
        product_schema(),
    );

    let content = llm
        .complete(request)
        .await
        .map_err(|e| e.into_app_error("Failed to import URL"))?;

    let mut info: ProductInfo = parse_structured(content).map_err(|e| match e {
        AppError::Generation(msg) => AppError::Generation(format!("Failed to import URL: {}", msg)),
        other => other,
    })?;
    info.price = info.price.filter(|p| !p.trim().is_empty());
    Ok(info)
}

pub async fn import_product(client: &Client, llm: &dyn TextGenerator, url: &str) -> AppResult<ProductInfo> {
    tracing::info!(url = %url, "Importing product page");
    let html = fetch_page(client, url).await?;
    let info = extract_product(llm, &html).await?;
    tracing::info!(url = %url, product = %info.product_name, niche = %info.niche, "Product page imported");
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeTextGenerator;

    const PAGE: &str = r#"<html>
        <head>
            <title>The   Genius Wave</title>
            <meta name="description" content="A 7-second   brainwave trick">
            <style>body { color: red; }</style>
        </head>
        <body>
            <h1>Unlock   your theta state</h1>
            <script>var tracking = "ignore me";</script>
            <p>Used by
               thousands.</p>
        </body>
    </html>"#;

    #[test]
    fn test_page_text_strips_markup_and_scripts() {
        let text = page_text(PAGE);
        assert!(text.starts_with("Title: The Genius Wave\nDescription: A 7-second brainwave trick\n"));
        assert!(text.contains("Unlock your theta state Used by thousands."));
        assert!(!text.contains("ignore me"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_page_text_truncated() {
        let html = format!("<html><body><p>{}</p></body></html>", "word ".repeat(5000));
        assert_eq!(page_text(&html).chars().count(), MAX_PAGE_CHARS);
    }

    #[tokio::test]
    async fn test_extract_product() {
        let llm = FakeTextGenerator::replying(
            r#"{"productName":"The Genius Wave","vendor":"GW","niche":"manifestation","description":"Audio.","price":"",
                "benefits":["Focus"],"targetAudience":"Adults","headline":"Unlock","callToAction":"Watch"}"#,
        );

        let info = extract_product(&llm, PAGE).await.unwrap();
        assert_eq!(info.niche, Niche::Manifestation);
        assert_eq!(info.price, None);
        assert!(llm.last_user_prompt().contains("Unlock your theta state"));
    }

    #[tokio::test]
    async fn test_unparsable_extraction_is_prefixed() {
        let llm = FakeTextGenerator::replying("not json");
        let err = extract_product(&llm, PAGE).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(ref m) if m.starts_with("Failed to import URL: ")));
    }

    #[tokio::test]
    async fn test_non_http_url_rejected() {
        let err = fetch_page(&Client::new(), "ftp://example.com/page").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
