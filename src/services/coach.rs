// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coaching insights from the Gemini API.
//!
//! Sends the most recent activities and the goal list, and asks for a
//! structured JSON answer. Nothing is retried.

use crate::models::{Activity, Goal};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Activities included in the prompt.
pub const RECENT_ACTIVITY_COUNT: usize = 5;

/// Overall tone of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CoachStatus {
    Motivating,
    Caution,
    Praising,
}

/// Structured coaching feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CoachInsight {
    pub insight: String,
    pub recommendations: Vec<String>,
    pub status: CoachStatus,
}

/// Errors from the coaching call.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("Coaching is not configured (GEMINI_API_KEY unset)")]
    NotConfigured,

    #[error("Coaching request failed: {0}")]
    Http(String),

    #[error("The AI model returned an empty response")]
    EmptyResponse,

    #[error("Malformed coaching response: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ─── Gemini wire types ───────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Gemini-backed coaching client.
#[derive(Clone)]
pub struct GeminiCoach {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiCoach {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask for an insight on `activities` (most-recent-first) and `goals`.
    pub async fn get_insights(
        &self,
        activities: &[Activity],
        goals: &[Goal],
    ) -> Result<CoachInsight, CoachError> {
        let api_key = self.api_key.as_deref().ok_or(CoachError::NotConfigured)?;

        let prompt = build_prompt(activities, goals)?;
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, activities = activities.len(), "Requesting coaching insight");

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| CoachError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Gemini API error");
            return Err(CoachError::Http(format!("{}: {}", status, body)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CoachError::Http(format!("Failed to read response: {}", e)))?;

        parse_insight(extract_text(&body).as_deref())
    }
}

/// Prompt text with the recent activities and goals embedded as JSON.
fn build_prompt(activities: &[Activity], goals: &[Goal]) -> Result<String, CoachError> {
    let recent = &activities[..activities.len().min(RECENT_ACTIVITY_COUNT)];
    Ok(format!(
        "Analyze the following user fitness data:\n\
         Recent Activities: {}\n\
         Current Goals: {}\n\n\
         Provide a concise motivational insight, 3 specific recommendations for improvement, and an overall status.",
        serde_json::to_string(recent)?,
        serde_json::to_string(goals)?,
    ))
}

fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "insight": { "type": "STRING" },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "status": {
                "type": "STRING",
                "description": "Must be one of: motivating, caution, praising"
            }
        },
        "required": ["insight", "recommendations", "status"]
    })
}

/// Concatenated text of the first candidate, if any.
fn extract_text(response: &GenerateResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    Some(text)
}

/// Decode the model's JSON answer.
fn parse_insight(text: Option<&str>) -> Result<CoachInsight, CoachError> {
    let text = text.map(str::trim).filter(|t| !t.is_empty());
    let text = text.ok_or(CoachError::EmptyResponse)?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;

    fn make_activity(id: usize) -> Activity {
        Activity {
            id: format!("act-{}", id),
            activity_type: ActivityType::Running,
            start_time: 0,
            end_time: 0,
            steps: 0,
            distance: 0.0,
            calories: 0.0,
            path: vec![],
        }
    }

    #[test]
    fn test_parse_valid_insight() {
        let text = r#" {"insight":"Nice week","recommendations":["Hydrate","Stretch","Sleep"],"status":"praising"} "#;
        let insight = parse_insight(Some(text)).unwrap();
        assert_eq!(insight.status, CoachStatus::Praising);
        assert_eq!(insight.recommendations.len(), 3);
    }

    #[test]
    fn test_empty_response_is_an_error() {
        assert!(matches!(parse_insight(None), Err(CoachError::EmptyResponse)));
        assert!(matches!(
            parse_insight(Some("  \n")),
            Err(CoachError::EmptyResponse)
        ));
    }

    #[test]
    fn test_malformed_response_is_an_error() {
        assert!(matches!(
            parse_insight(Some("not json")),
            Err(CoachError::Malformed(_))
        ));
        assert!(matches!(
            parse_insight(Some(r#"{"insight":"x","recommendations":[],"status":"angry"}"#)),
            Err(CoachError::Malformed(_))
        ));
    }

    #[test]
    fn test_prompt_uses_five_most_recent() {
        let activities: Vec<Activity> = (0..8).map(make_activity).collect();
        let prompt = build_prompt(&activities, &Goal::seeded_defaults()).unwrap();

        assert!(prompt.contains("act-0"));
        assert!(prompt.contains("act-4"));
        assert!(!prompt.contains("act-5"));
        assert!(prompt.contains("Daily Steps"));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&body).as_deref(), Some("{\"a\":1}"));

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(&empty), None);
    }

    #[tokio::test]
    async fn test_unconfigured_client() {
        let coach = GeminiCoach::new("http://localhost".to_string(), "m".to_string(), None);
        assert!(!coach.is_configured());
        let result = coach.get_insights(&[], &[]).await;
        assert!(matches!(result, Err(CoachError::NotConfigured)));
    }
}
