//! Match Analyzer: one bounded model call, then cleanup and parse.
//!
//! Pipeline: build prompt → generate (timeout) → clean → parse.
//! A reply that is not JSON is a soft failure (`AnalysisResponse::invalid_json`),
//! never an `AppError`.

use std::time::Duration;

use tracing::{info, warn};

use crate::analysis::models::{schema_issue, AnalysisRequest, AnalysisResponse};
use crate::analysis::parse::parse_model_output;
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmError, TextGenerator};

pub async fn analyze_match(
    llm: &dyn TextGenerator,
    request: &AnalysisRequest,
    timeout: Duration,
) -> Result<AnalysisResponse, AppError> {
    info!(
        "Starting analysis with {} (resume: {} chars, job description: {} chars)",
        llm.model(),
        request.resume_text.chars().count(),
        request.job_desc.chars().count()
    );

    let prompt = build_analysis_prompt(&request.resume_text, &request.job_desc);

    let raw = match tokio::time::timeout(timeout, llm.generate(&prompt, JSON_ONLY_SYSTEM)).await {
        Ok(Ok(text)) => text,
        Ok(Err(LlmError::Timeout)) | Err(_) => {
            return Err(AppError::LlmTimeout(timeout.as_secs()));
        }
        Ok(Err(e)) => return Err(AppError::Llm(format!("AI Error: {e}"))),
    };

    match parse_model_output(&raw) {
        Some(analysis) => {
            if let Some(issue) = schema_issue(&analysis) {
                warn!("Model output does not match the analysis schema: {issue}");
            }
            info!("Analysis complete");
            Ok(AnalysisResponse::success(analysis))
        }
        None => {
            warn!(
                "Model output was not valid JSON ({} chars)",
                raw.chars().count()
            );
            Ok(AnalysisResponse::invalid_json())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// What a `ScriptedGenerator` does when called.
    pub(crate) enum Script {
        Reply(String),
        ApiError(u16, String),
        TransportTimeout,
        Hang,
    }

    /// Test double that replays a fixed outcome and records the prompt.
    pub(crate) struct ScriptedGenerator {
        script: Script,
        pub(crate) last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedGenerator {
        pub(crate) fn new(script: Script) -> Self {
            Self {
                script,
                last_prompt: Mutex::new(None),
            }
        }

        pub(crate) fn reply(text: &str) -> Self {
            Self::new(Script::Reply(text.to_string()))
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.script {
                Script::Reply(text) => Ok(text.clone()),
                Script::ApiError(status, message) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
                Script::TransportTimeout => Err(LlmError::Timeout),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("{}".to_string())
                }
            }
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            resume_text: "Jane Doe, Rust engineer, 6 years".to_string(),
            job_desc: "Senior Rust engineer, Kubernetes a plus".to_string(),
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let llm = ScriptedGenerator::reply("```json\n{\"match_score\": 88}\n```");
        let response = analyze_match(&llm, &request(), TIMEOUT).await.unwrap();
        assert_eq!(response, AnalysisResponse::success(json!({"match_score": 88})));
    }

    #[tokio::test]
    async fn test_prompt_carries_both_texts() {
        let llm = ScriptedGenerator::reply("{}");
        analyze_match(&llm, &request(), TIMEOUT).await.unwrap();
        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Jane Doe, Rust engineer, 6 years"));
        assert!(prompt.contains("Senior Rust engineer, Kubernetes a plus"));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_soft_failure() {
        let llm = ScriptedGenerator::reply("Sorry, I can't do that.");
        let response = analyze_match(&llm, &request(), TIMEOUT).await.unwrap();
        assert_eq!(response.analysis, None);
        assert_eq!(
            response.error.as_deref(),
            Some("AI did not return valid JSON")
        );
    }

    #[tokio::test]
    async fn test_schema_mismatch_passes_through_unchanged() {
        let llm = ScriptedGenerator::reply(r#"{"summary": "no score here", "extra": [1, 2]}"#);
        let response = analyze_match(&llm, &request(), TIMEOUT).await.unwrap();
        assert_eq!(
            response.analysis,
            Some(json!({"summary": "no score here", "extra": [1, 2]}))
        );
        assert_eq!(response.error, None);
    }

    #[tokio::test]
    async fn test_api_failure_is_hard_error_with_ai_prefix() {
        let llm = ScriptedGenerator::new(Script::ApiError(400, "API key not valid.".to_string()));
        match analyze_match(&llm, &request(), TIMEOUT).await {
            Err(AppError::Llm(msg)) => {
                assert!(msg.starts_with("AI Error: "), "got {msg}");
                assert!(msg.contains("API key not valid."));
            }
            other => panic!("expected AppError::Llm, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_model_times_out() {
        let llm = ScriptedGenerator::new(Script::Hang);
        let result = analyze_match(&llm, &request(), TIMEOUT).await;
        assert!(matches!(result, Err(AppError::LlmTimeout(30))));
    }

    #[tokio::test]
    async fn test_transport_timeout_maps_to_timeout_kind() {
        let llm = ScriptedGenerator::new(Script::TransportTimeout);
        let result = analyze_match(&llm, &request(), TIMEOUT).await;
        assert!(matches!(result, Err(AppError::LlmTimeout(30))));
    }
}
