use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PREDICTION_FAILED: &str = "Prediction failed";

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Failed to encode payload: {0}")]
    Encode(serde_json::Error),

    #[error("Inference endpoint error: {0}")]
    Invocation(String),

    #[error("Inference endpoint returned an empty body")]
    EmptyResponse,

    #[error("Failed to decode inference response: {0}")]
    Decode(String),

    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

// Every failure surfaces the same way; only `details` differs.
impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: PREDICTION_FAILED.to_string(),
            details: self.to_string(),
        })
    }
}
