//! Live text source over an OpenAI-compatible chat-completions endpoint.
//!
//! Only compiled with the `live` feature. Requests are blocking; the game
//! is sequential and waits on each line anyway.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameRng, NarrationConfig, PlayerId};
use crate::suspicion::{SuspicionScores, Transcript};

use super::source::{LineKind, NarrationError, NarrationRequest, TextSource};

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completions backed source.
pub struct ChatCompletionSource {
    client: reqwest::blocking::Client,
    config: NarrationConfig,
}

impl ChatCompletionSource {
    /// Build a client. Fails if no API key is configured.
    pub fn new(config: NarrationConfig) -> Result<Self, NarrationError> {
        if !config.has_credentials() {
            return Err(NarrationError::Unavailable);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NarrationError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, NarrationError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(|e| NarrationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrationError::Transport(format!("HTTP {status}")));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| NarrationError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| NarrationError::Malformed("empty completion".to_string()))
    }
}

impl TextSource for ChatCompletionSource {
    fn complete(
        &mut self,
        request: &NarrationRequest,
        _rng: &mut GameRng,
    ) -> Result<String, NarrationError> {
        // Defenses run a little hotter than reports.
        let temperature = match request.kind {
            LineKind::Report { .. } => self.config.temperature,
            LineKind::Defense { .. } => self.config.temperature + 0.1,
        };
        self.chat(
            &request.system_prompt,
            &request.user_prompt,
            temperature,
            self.config.max_tokens,
        )
    }

    fn analyze(
        &mut self,
        transcript: &Transcript,
        _impostors: &[PlayerId],
    ) -> Result<SuspicionScores, NarrationError> {
        let system = "You are a fair referee for Space Werewolf. Rate each player's impostor \
            suspicion from 0 to 1. Crewmates' speeches contain job-related detail; impostors' are \
            vague, imitative, or blame-shifting. Keep every score between 0.2 and 0.75 and the \
            largest gap at most 0.3. Return only JSON with numeric player ids as keys, \
            e.g. {\"1\":0.5,\"2\":0.3}. No explanations.";
        let user = format!(
            "Analyze these action reports and defenses and output the suspicion JSON:\n{}",
            transcript.render()
        );
        let reply = self.chat(system, &user, 0.3, 300)?;
        debug!(%reply, "analysis reply");
        parse_scores(&reply)
    }
}

/// Parse a `{"1": 0.4, ...}` reply, tolerating a fenced code block.
pub fn parse_scores(reply: &str) -> Result<SuspicionScores, NarrationError> {
    let body = reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let raw: std::collections::BTreeMap<String, f64> =
        serde_json::from_str(body).map_err(|e| NarrationError::Malformed(e.to_string()))?;

    raw.into_iter()
        .map(|(key, score)| {
            key.trim()
                .trim_start_matches("Player")
                .trim()
                .parse::<u8>()
                .map(|id| (PlayerId::new(id), score))
                .map_err(|_| NarrationError::Malformed(format!("bad player key `{key}`")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|pairs| pairs.into_iter().collect())
}
