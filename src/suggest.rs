//! Client for the external crop-suggestion endpoint.
//!
//! The endpoint is an opaque HTTP JSON service: one `POST` per request, a
//! bounded timeout, and no retry. Every failure maps to a [`SuggestError`];
//! callers show [`SuggestError::user_message`] and log the details.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields before generating suggestions.";
pub const FETCH_FAILED: &str = "Error fetching suggestions. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub soil_type: String,
    pub location: String,
    pub water: String,
    pub past_crops: String,
}

impl SuggestionRequest {
    /// Every field is required and must not be blank.
    pub fn validate(&self) -> Result<(), SuggestError> {
        let fields = [
            ("soil_type", &self.soil_type),
            ("location", &self.location),
            ("water", &self.water),
            ("past_crops", &self.past_crops),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(SuggestError::MissingField(*name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    #[serde(rename = "yield")]
    pub expected_yield: String,
    pub profit: String,
    pub sustainability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// `recommendations` is required; a body without it is a decode error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("Please fill in all fields before generating suggestions. (missing '{0}')")]
    MissingField(&'static str),

    #[error("suggestion endpoint returned HTTP {0}")]
    Status(u16),

    #[error("could not reach suggestion endpoint: {0}")]
    Transport(String),

    #[error("invalid response from suggestion endpoint: {0}")]
    Decode(#[from] std::io::Error),
}

impl SuggestError {
    /// The text shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SuggestError::MissingField(_) => FILL_ALL_FIELDS,
            _ => FETCH_FAILED,
        }
    }
}

impl From<ureq::Error> for SuggestError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => SuggestError::Status(code),
            ureq::Error::Transport(transport) => SuggestError::Transport(transport.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl SuggestionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate, send once, and decode the response.
    pub fn fetch(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, SuggestError> {
        request.validate()?;
        tracing::debug!(endpoint = %self.endpoint, "requesting crop suggestions");

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(request)
            .inspect_err(|e| tracing::warn!(endpoint = %self.endpoint, "suggestion request failed: {}", e))?;

        let parsed: SuggestionResponse = response.into_json()?;
        tracing::debug!(count = parsed.recommendations.len(), "received suggestions");
        Ok(parsed)
    }
}
