//! Budget-assistant client for any OpenAI-compatible chat-completions
//! endpoint. The analytics pipeline never depends on this: the summary is
//! already computed before a request goes out, and every failure here stays
//! at the presentation layer.

use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::AssistantSection;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful budgeting assistant. Answer in a simple, friendly tone.";

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// One-shot question over the pipeline summary. The question text is passed
/// through unmodified.
pub async fn ask_assistant(
    cfg: &AssistantSection,
    summary: &str,
    question: &str,
) -> Result<String> {
    let turns = vec![ChatTurn {
        role: "user".to_string(),
        content: format!("Based on this summary:\n{summary}\n\nUser's Question: {question}"),
    }];
    chat_complete_async(cfg, SYSTEM_PROMPT, &turns).await
}

pub fn chat_complete(cfg: &AssistantSection, system: &str, turns: &[ChatTurn]) -> Result<String> {
    // The CLI uses #[tokio::main], so we're often already inside a runtime.
    // Creating a nested runtime and calling block_on will panic.
    //
    // Strategy:
    // - If a runtime is already running: use block_in_place + Handle::block_on
    // - Otherwise: create a runtime and block_on
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        tokio::task::block_in_place(|| {
            handle.block_on(async { chat_complete_async(cfg, system, turns).await })
        })
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        rt.block_on(async { chat_complete_async(cfg, system, turns).await })
    }
}

async fn chat_complete_async(
    cfg: &AssistantSection,
    system: &str,
    turns: &[ChatTurn],
) -> Result<String> {
    #[derive(Serialize)]
    struct Msg {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct Req {
        model: String,
        messages: Vec<Msg>,
        temperature: f32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let mut msgs: Vec<Msg> = Vec::new();
    msgs.push(Msg {
        role: "system".to_string(),
        content: system.to_string(),
    });
    for t in turns {
        msgs.push(Msg {
            role: t.role.clone(),
            content: t.content.clone(),
        });
    }

    let body = Req {
        model: cfg.model.clone(),
        messages: msgs,
        temperature: cfg.temperature,
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = &cfg.api_key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {key}"))?);
    }

    let url = format!(
        "{}/v1/chat/completions",
        cfg.base_url.trim_end_matches('/')
    );

    let client = reqwest::Client::new();
    let resp = client
        .post(&url)
        .headers(headers)
        .json(&body)
        .send()
        .await
        .context("assistant request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("assistant error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse assistant response")?;
    let content = out
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    if content.trim().is_empty() {
        bail!("assistant reply missing text content");
    }

    Ok(content.trim().to_string())
}
