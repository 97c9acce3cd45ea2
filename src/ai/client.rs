// AI client for the budget assistant
//
// Sends one question plus the analysis context to a hosted generation
// endpoint and hands back either the generated text or a described failure.

use std::fmt;
use std::time::Duration;

use chrono::Local;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AiSettings;
use crate::error::{FundError, FundResult};
use crate::models::{AnalysisContext, ApiCredential};

use super::prompt::build_prompt;

/// Result of one assistant call
///
/// Both arms end up as transcript text, but callers can still tell an answer
/// from a failure without inspecting the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// First generated text candidate
    Answer(String),
    /// Anything other than a well-formed HTTP 200
    Failed(AskFailure),
}

impl AskOutcome {
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }

    /// Text to append to the transcript
    pub fn into_text(self) -> String {
        match self {
            Self::Answer(text) => text,
            Self::Failed(failure) => failure.to_string(),
        }
    }
}

/// Why an assistant call produced no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskFailure {
    /// Provider answered with a non-200 status
    Api { status: u16, body: String },
    /// Connection, timeout, or body read failure
    Transport(String),
    /// HTTP 200 whose body lacked `candidates[0].content.parts[0].text`
    MalformedResponse(String),
    /// The request could not be assembled
    Request(String),
}

impl fmt::Display for AskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, body } => write!(f, "API Error {}: {}", status, body),
            Self::Transport(msg) => write!(f, "Network error: {}", msg),
            Self::MalformedResponse(msg) => {
                write!(f, "Unexpected response from AI service: {}", msg)
            }
            Self::Request(msg) => write!(f, "Could not build AI request: {}", msg),
        }
    }
}

/// Something that can answer a question about an analysis
pub trait Assistant {
    fn ask(&self, question: &str, context: &AnalysisContext, credential: &ApiCredential)
        -> AskOutcome;
}

// ============================================================================
// Generation API types
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

// ============================================================================
// Client
// ============================================================================

/// Blocking client for the hosted generation endpoint
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Build a client from the AI settings
    pub fn new(settings: &AiSettings) -> FundResult<Self> {
        Self::with_base_url(
            settings.base_url.clone(),
            settings.model.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Build a client against an explicit base URL (used by tests)
    pub fn with_base_url(base_url: String, model: String, timeout: Duration) -> FundResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FundError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            model,
        })
    }

    /// URL of the generate call, without the key
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn send(&self, prompt: &str, credential: &ApiCredential) -> Result<String, AskFailure> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", credential.expose())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| AskFailure::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AskFailure::Transport(e.without_url().to_string()))?;

        if status != StatusCode::OK {
            return Err(AskFailure::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_generate_response(&body)
    }
}

impl Assistant for GeminiClient {
    fn ask(
        &self,
        question: &str,
        context: &AnalysisContext,
        credential: &ApiCredential,
    ) -> AskOutcome {
        let today = Local::now().date_naive();
        let prompt = match build_prompt(question, context, today) {
            Ok(p) => p,
            Err(e) => return AskOutcome::Failed(AskFailure::Request(e.to_string())),
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "sending question to assistant");

        match self.send(&prompt, credential) {
            Ok(text) => AskOutcome::Answer(text),
            Err(failure) => {
                warn!(error = %failure, "assistant call failed");
                AskOutcome::Failed(failure)
            }
        }
    }
}

fn parse_generate_response(body: &str) -> Result<String, AskFailure> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| AskFailure::MalformedResponse(e.to_string()))?;

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| AskFailure::MalformedResponse("no text candidate in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::analysis::{build_analysis, SessionInputs};
    use chrono::NaiveDate;
    use httpmock::prelude::*;

    const MODEL: &str = "gemini-1.5-flash";
    const PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    fn context() -> AnalysisContext {
        let inputs = SessionInputs::new(
            17,
            Money::from_cents(14136),
            2025,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        );
        build_analysis(&inputs).unwrap()
    }

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::with_base_url(server.base_url(), MODEL.into(), Duration::from_secs(5))
            .unwrap()
    }

    fn candidate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ], "role": "model" } }
            ]
        })
    }

    #[test]
    fn test_parse_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]}},{"content":{"parts":[{"text":"other"}]}}]}"#;
        assert_eq!(parse_generate_response(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_missing_candidates() {
        let err = parse_generate_response(r#"{"promptFeedback":{}}"#).unwrap_err();
        assert!(matches!(err, AskFailure::MalformedResponse(_)));

        let err = parse_generate_response("not json").unwrap_err();
        assert!(matches!(err, AskFailure::MalformedResponse(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::with_base_url(
            "https://example.test/".into(),
            "m".into(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_success_returns_candidate_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(PATH)
                .query_param("key", "test-key")
                .body_includes("How many months of funding remain?")
                .body_includes("ANALYSIS DATA");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(candidate_body("About 1.7 months at current burn."));
        });

        let outcome = client(&server).ask(
            "How many months of funding remain?",
            &context(),
            &ApiCredential::new("test-key"),
        );

        mock.assert();
        assert_eq!(
            outcome,
            AskOutcome::Answer("About 1.7 months at current burn.".to_string())
        );
    }

    #[test]
    fn test_server_error_is_formatted_with_status_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(500).body("internal failure");
        });

        let outcome = client(&server).ask("hi", &context(), &ApiCredential::new("k"));

        mock.assert_calls(1);
        assert!(!outcome.is_answer());
        let text = outcome.into_text();
        assert!(text.contains("API Error"));
        assert!(text.contains("500"));
        assert!(text.contains("internal failure"));
    }

    #[test]
    fn test_non_200_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(204);
        });

        let outcome = client(&server).ask("hi", &context(), &ApiCredential::new("k"));
        assert!(matches!(
            outcome,
            AskOutcome::Failed(AskFailure::Api { status: 204, .. })
        ));
    }

    #[test]
    fn test_malformed_body_on_200() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "candidates": [] }));
        });

        let outcome = client(&server).ask("hi", &context(), &ApiCredential::new("k"));
        match outcome {
            AskOutcome::Failed(AskFailure::MalformedResponse(_)) => {}
            other => panic!("expected malformed response, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_failure_is_caught() {
        // Nothing listens on port 9 locally
        let client = GeminiClient::with_base_url(
            "http://127.0.0.1:9".into(),
            MODEL.into(),
            Duration::from_secs(2),
        )
        .unwrap();

        let outcome = client.ask("hi", &context(), &ApiCredential::new("secret-key"));
        match outcome {
            AskOutcome::Failed(AskFailure::Transport(msg)) => {
                assert!(!msg.contains("secret-key"));
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }
}
