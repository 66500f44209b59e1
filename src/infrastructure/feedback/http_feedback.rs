//! HTTP client for the solution-review service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tokio_retry::Retry;
use tracing::{debug, warn};

use super::FeedbackClient;
use crate::domain::entities::{AiFeedback, FeedbackRequest};
use crate::error::AppError;

const MAX_ATTEMPTS: usize = 3;

#[derive(Serialize)]
struct FeedbackPayload<'a> {
    title: &'a str,
    content: &'a str,
    problem: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackBody {
    ai_big_o: Option<String>,
    ai_good: Option<String>,
    ai_bad: Option<String>,
    ai_plan: Option<String>,
}

impl From<FeedbackBody> for AiFeedback {
    fn from(body: FeedbackBody) -> Self {
        Self {
            big_o: body.ai_big_o,
            good: body.ai_good,
            bad: body.ai_bad,
            plan: body.ai_plan,
        }
    }
}

/// Posts solutions to the review service as JSON.
///
/// Connection failures are retried with exponential backoff. A non-success
/// status or an unreadable body is logged and yields no review.
pub struct HttpFeedbackClient {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedbackClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

/// Decodes a successful reply. A malformed body fails the whole request.
fn parse_feedback(bytes: &[u8]) -> Result<AiFeedback, AppError> {
    serde_json::from_slice::<FeedbackBody>(bytes)
        .map(Into::into)
        .map_err(|e| {
            warn!("Feedback response could not be parsed: {}", e);
            AppError::upstream(
                "Invalid feedback response",
                json!({ "reason": e.to_string() }),
            )
        })
}

#[async_trait]
impl FeedbackClient for HttpFeedbackClient {
    async fn request_feedback(
        &self,
        request: FeedbackRequest,
    ) -> Result<Option<AiFeedback>, AppError> {
        let payload = FeedbackPayload {
            title: &request.title,
            content: &request.content,
            problem: &request.problem,
        };

        let strategy = ExponentialBackoff::from_millis(100)
            .map(jitter)
            .take(MAX_ATTEMPTS - 1);

        let response = Retry::spawn(strategy, || async {
            self.client.post(&self.url).json(&payload).send().await
        })
        .await
        .map_err(|e| {
            warn!("Feedback service unreachable: {}", e);
            AppError::upstream(
                "Feedback service unavailable",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Feedback service rejected request");
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!("Feedback response could not be read: {}", e);
            AppError::upstream(
                "Feedback service unavailable",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let feedback = parse_feedback(&bytes)?;
        debug!("Feedback received");
        Ok(Some(feedback))
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
