use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Returned in place of an analysis when the model's reply is not JSON.
pub const INVALID_JSON_ERROR: &str = "AI did not return valid JSON";

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_desc: String,
}

/// Body of every 200 response from `POST /analyze`.
///
/// Success: `{"analysis": {...}}`. Soft failure:
/// `{"analysis": null, "error": "AI did not return valid JSON"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn success(analysis: Value) -> Self {
        Self {
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn invalid_json() -> Self {
        Self {
            analysis: None,
            error: Some(INVALID_JSON_ERROR.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// The shape the model is asked to produce. Never enforced on the response;
// used to flag drift in the logs.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub match_score: u32, // 0 – 100
    pub summary: String,
    pub missing_skills: Vec<String>,
    pub ats_check: AtsCheck,
    pub suggested_rewrites: Vec<SuggestedRewrite>,
    pub interview_prep: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsCheck {
    pub score: u32, // 0 – 100
    pub issues: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedRewrite {
    pub section: String,
    pub current: String,
    pub improved: String,
}

/// Describes how `value` departs from `MatchAnalysis`, or `None` if it conforms.
pub fn schema_issue(value: &Value) -> Option<String> {
    let parsed: MatchAnalysis = match serde_json::from_value(value.clone()) {
        Ok(parsed) => parsed,
        Err(e) => return Some(e.to_string()),
    };
    if parsed.match_score > 100 {
        return Some(format!("match_score {} is out of range", parsed.match_score));
    }
    if parsed.ats_check.score > 100 {
        return Some(format!("ats_check.score {} is out of range", parsed.ats_check.score));
    }
    None
}
