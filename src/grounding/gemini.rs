//! `generateContent` call with the search tool enabled.

use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{GroundedContent, LegalPage, Source};
use crate::config::GroundingCfg;

/// Response subset used by the app.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResp {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

/// Fetch a grounded summary for `page`.
///
/// `default_title` labels citations that come back without a title.
pub async fn fetch(
    http: &Client,
    cfg: &GroundingCfg,
    page: LegalPage,
    default_title: &str,
) -> Result<GroundedContent> {
    let key = cfg
        .api_key()
        .ok_or_else(|| anyhow!("{} is not set", cfg.api_key_env))?;

    let url = format!(
        "{}/models/{}:generateContent",
        cfg.endpoint.trim_end_matches('/'),
        cfg.model
    );
    let body = json!({
        "contents": [{ "parts": [{ "text": page.query() }] }],
        "tools": [{ "google_search": {} }],
    });

    tracing::info!("grounding request: {:?}", page);
    let resp = http
        .post(url)
        .header("x-goog-api-key", key)
        .json(&body)
        .send()
        .await?;
    let resp = ensure_success(resp).await?;
    let parsed = resp.json::<GenerateResp>().await?;
    Ok(into_content(parsed, default_title))
}

/// Flatten the first candidate into text and citations.
fn into_content(resp: GenerateResp, default_title: &str) -> GroundedContent {
    let Some(first) = resp.candidates.into_iter().next() else {
        return GroundedContent {
            text: None,
            sources: vec![],
        };
    };

    let text = first
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .concat()
        })
        .filter(|t| !t.trim().is_empty());

    let sources = first
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .map(|chunk| {
            let web = chunk.web.unwrap_or_default();
            Source {
                title: web.title.unwrap_or_else(|| default_title.to_string()),
                uri: web.uri.unwrap_or_else(|| "#".into()),
            }
        })
        .collect();

    GroundedContent { text, sources }
}

/// Convert non-2xx responses into a structured error.
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(anyhow!("HTTP status {status} error: {body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(v: serde_json::Value) -> GroundedContent {
        let resp: GenerateResp = serde_json::from_value(v).unwrap();
        into_content(resp, "fallback title")
    }

    #[test]
    fn test_text_parts_are_concatenated() {
        let c = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }
            }]
        }));
        assert_eq!(c.text.as_deref(), Some("Hello, world"));
        assert!(c.sources.is_empty());
    }

    #[test]
    fn test_grounding_chunks_become_sources_with_defaults() {
        let c = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "summary" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.com/p", "title": "Policy" } },
                        { "web": { "uri": "https://example.com/q" } },
                        {}
                    ]
                }
            }]
        }));
        assert_eq!(
            c.sources,
            vec![
                Source { title: "Policy".into(), uri: "https://example.com/p".into() },
                Source { title: "fallback title".into(), uri: "https://example.com/q".into() },
                Source { title: "fallback title".into(), uri: "#".into() },
            ]
        );
    }

    #[test]
    fn test_empty_response_has_no_text() {
        assert_eq!(parse(json!({})).text, None);
        let blank = parse(json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] }));
        assert_eq!(blank.text, None);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_an_error() {
        let cfg = GroundingCfg {
            endpoint: "http://127.0.0.1:9".into(),
            model: "m".into(),
            api_key_env: "AVATAR_TUI_TEST_UNSET_KEY".into(),
            timeout_secs: 1,
        };
        let err = fetch(&Client::new(), &cfg, LegalPage::Privacy, "t").await.unwrap_err();
        assert!(err.to_string().contains("AVATAR_TUI_TEST_UNSET_KEY"));
    }
}
