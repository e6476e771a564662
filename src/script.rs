use crate::config::ScriptConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Upstream collaborator that turns a topic into narration prose.
pub trait ScriptSource: Send + Sync {
    fn generate(&self, topic: &str, duration_seconds: f32) -> Result<String>;
}

/// How the script for a run was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptOutcome {
    /// The upstream source produced the script.
    Generated(String),
    /// The upstream was unavailable; the deterministic template stood in.
    Fallback(String),
}

impl ScriptOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(s) | Self::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Deterministic stand-in used when the script source is unavailable.
pub fn fallback_script(topic: &str) -> String {
    format!(
        "Did you know that {topic} is absolutely fascinating? \
         Let me tell you why this matters and why you should care about it today."
    )
}

/// Ask the source for a script, recovering to the fallback template on
/// failure or empty output. Upstream failure never surfaces to the caller.
pub fn acquire_script(source: &dyn ScriptSource, topic: &str, duration: f32) -> ScriptOutcome {
    match source.generate(topic, duration) {
        Ok(text) if !text.trim().is_empty() => ScriptOutcome::Generated(text),
        Ok(_) => {
            warn!("script source returned an empty script, using fallback");
            ScriptOutcome::Fallback(fallback_script(topic))
        }
        Err(e) => {
            warn!("script source unavailable, using fallback: {e:#}");
            ScriptOutcome::Fallback(fallback_script(topic))
        }
    }
}

/// Ollama text-generation client.
pub struct OllamaScriptSource {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaScriptSource {
    pub fn new(config: &ScriptConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: config.ollama_url.clone(),
            model: config.model.clone(),
            client,
        })
    }

    fn prompt(topic: &str, duration_seconds: f32) -> String {
        let word_budget = (duration_seconds * 2.5) as u32;
        format!(
            "Create a {duration_seconds:.0}-second video script about: {topic}\n\n\
             Requirements:\n\
             - Write an engaging, viral-worthy script\n\
             - Make it perfect for social media (TikTok, YouTube Shorts, Instagram Reels)\n\
             - Include hooks in the first 3 seconds\n\
             - Keep sentences short and punchy\n\
             - End with a call to action\n\
             - Word count should match approximately {word_budget} words (2.5 words per second)\n\n\
             Write ONLY the script text, no labels or formatting."
        )
    }
}

impl ScriptSource for OllamaScriptSource {
    fn generate(&self, topic: &str, duration_seconds: f32) -> Result<String> {
        info!("Requesting script for '{}' from {}", topic, self.base_url);

        let request = GenerateRequest {
            model: &self.model,
            prompt: Self::prompt(topic, duration_seconds),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .context("Ollama request failed")?;

        anyhow::ensure!(
            response.status().is_success(),
            "Ollama returned status {}",
            response.status()
        );

        let body: GenerateResponse = response.json().context("Failed to decode Ollama response")?;
        Ok(body.response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Option<String>);

    impl ScriptSource for FixedSource {
        fn generate(&self, _topic: &str, _duration: f32) -> Result<String> {
            match &self.0 {
                Some(text) => Ok(text.clone()),
                None => anyhow::bail!("upstream down"),
            }
        }
    }

    #[test]
    fn test_acquire_uses_generated_script() {
        let source = FixedSource(Some("A script. With sentences.".into()));
        let outcome = acquire_script(&source, "pizza", 30.0);

        assert!(!outcome.is_fallback());
        assert_eq!(outcome.text(), "A script. With sentences.");
    }

    #[test]
    fn test_acquire_recovers_from_failure() {
        let outcome = acquire_script(&FixedSource(None), "pizza", 30.0);

        assert!(outcome.is_fallback());
        assert!(outcome.text().contains("pizza"));
    }

    #[test]
    fn test_acquire_recovers_from_empty_output() {
        let source = FixedSource(Some("   ".into()));
        let outcome = acquire_script(&source, "pizza", 30.0);
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_fallback_is_deterministic_and_segmentable() {
        let a = fallback_script("rust");
        let b = fallback_script("rust");
        assert_eq!(a, b);

        // The template must always give the segmenter something to split.
        assert!(crate::scene::split_sentences(&a).len() >= 2);
    }

    #[test]
    fn test_prompt_mentions_topic_and_budget() {
        let prompt = OllamaScriptSource::prompt("the history of pizza", 60.0);
        assert!(prompt.contains("the history of pizza"));
        assert!(prompt.contains("150 words"));
    }
}
