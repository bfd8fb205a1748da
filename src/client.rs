use log::{debug, error};
use thiserror::Error;

use crate::error::ErrorBody;
use crate::form::{PredictionForm, SubmitBlocked};
use crate::model::PredictionResult;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Blocked(#[from] SubmitBlocked),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{error} (status {status}): {details}")]
    Server {
        status: u16,
        error: String,
        details: String,
    },
}

/// Talks to a running prediction server on behalf of a `PredictionForm`.
pub struct PredictClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Sends the form's current values once. The form records the outcome
    /// either way; the returned error says why it failed.
    pub async fn submit(&self, form: &mut PredictionForm) -> Result<PredictionResult, ClientError> {
        let payload = form.begin_submit()?;

        match self.post(&payload).await {
            Ok(result) => {
                form.complete(result.clone());
                Ok(result)
            }
            Err(e) => {
                error!("Error: {}", e);
                form.fail();
                Err(e)
            }
        }
    }

    async fn post<T: serde::Serialize>(&self, payload: &T) -> Result<PredictionResult, ClientError> {
        let url = format!("{}/api/predict", self.base_url);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_else(|e| ErrorBody {
                error: status.canonical_reason().unwrap_or("Request failed").to_string(),
                details: e.to_string(),
            });
            return Err(ClientError::Server {
                status: status.as_u16(),
                error: body.error,
                details: body.details,
            });
        }

        Ok(response.json::<PredictionResult>().await?)
    }
}
