//! Result region state for the upload form.

use serde_json::Value;
use std::fmt::Display;

use crate::PredictionResponse;

pub const PREDICTING_TEXT: &str = "Predicting...";

/// Shown when the server rejects a request without saying why.
pub const FALLBACK_ERROR: &str = "Prediction failed";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultRegion {
    #[default]
    Idle,
    Predicting,
    Success(PredictionResponse),
    Error(String),
}

impl ResultRegion {
    pub fn error(message: impl Display) -> Self {
        ResultRegion::Error(format!("Error: {}", message))
    }

    /// Interprets a finished HTTP exchange. `ok` is whether the status was
    /// in the success range; `body` is the raw response text.
    pub fn from_response(ok: bool, body: &str) -> Self {
        if !ok {
            return match serde_json::from_str::<Value>(body) {
                Ok(payload) => match reported_error(&payload) {
                    Some(message) => Self::error(message),
                    None => Self::error(FALLBACK_ERROR),
                },
                Err(e) => Self::error(e),
            };
        }

        match serde_json::from_str::<PredictionResponse>(body) {
            Ok(prediction) => ResultRegion::Success(prediction),
            Err(e) => Self::error(e),
        }
    }

    /// Plain text content of the region, if it shows text rather than a
    /// result block.
    pub fn text(&self) -> Option<&str> {
        match self {
            ResultRegion::Idle | ResultRegion::Success(_) => None,
            ResultRegion::Predicting => Some(PREDICTING_TEXT),
            ResultRegion::Error(message) => Some(message),
        }
    }
}

/// The `error` member of a rejection body, if it holds anything worth
/// showing. Empty strings, `null`, `false` and zero count as absent.
fn reported_error(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Orders overlapping submissions: only the response to the most recent
/// submission may update the result region.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    latest: u64,
}

impl SubmissionTracker {
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// Result region together with the submission ordering that guards it.
#[derive(Debug, Default)]
pub struct PredictionFlow {
    region: ResultRegion,
    submissions: SubmissionTracker,
}

impl PredictionFlow {
    pub fn region(&self) -> &ResultRegion {
        &self.region
    }

    /// Starts a submission. Every earlier submission is superseded from
    /// here on, even if this one fails before a request goes out.
    pub fn submit(&mut self) -> Ticket {
        self.region = ResultRegion::Predicting;
        self.submissions.begin()
    }

    /// Applies the outcome of a submission. Returns `false` and leaves the
    /// region alone when the ticket has been superseded.
    pub fn finish(&mut self, ticket: Ticket, region: ResultRegion) -> bool {
        if !self.submissions.is_current(ticket) {
            return false;
        }
        self.region = region;
        true
    }
}
