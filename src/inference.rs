use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sagemakerruntime::config::Region;
use aws_sdk_sagemakerruntime::error::DisplayErrorContext;
use aws_sdk_sagemakerruntime::primitives::Blob;
use aws_sdk_sagemakerruntime::Client;
use serde_json::Value;

use crate::error::PredictError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A hosted model that turns a JSON feature payload into a JSON prediction.
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    async fn invoke(&self, payload: Vec<u8>) -> Result<Vec<u8>, PredictError>;
}

pub struct SageMakerEndpoint {
    client: Client,
    endpoint_name: String,
}

impl SageMakerEndpoint {
    /// Credentials come from the default AWS provider chain.
    pub async fn new(region: Option<String>, endpoint_name: String) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let aws_config = loader.load().await;

        Self {
            client: Client::new(&aws_config),
            endpoint_name,
        }
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    async fn invoke(&self, payload: Vec<u8>) -> Result<Vec<u8>, PredictError> {
        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(&self.endpoint_name)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(|e| PredictError::Invocation(DisplayErrorContext(&e).to_string()))?;

        output
            .body
            .map(Blob::into_inner)
            .ok_or(PredictError::EmptyResponse)
    }
}

/// Reads the first element of a JSON array response as the raw grade.
///
/// Accepts a number or a numeric string, since model containers disagree on
/// which one they emit.
pub fn decode_prediction(body: &[u8]) -> Result<f64, PredictError> {
    let text = std::str::from_utf8(body).map_err(|e| PredictError::Decode(e.to_string()))?;
    let value: Value =
        serde_json::from_str(text).map_err(|e| PredictError::Decode(e.to_string()))?;

    let first = value
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| PredictError::MalformedResponse(format!("expected a JSON array, got {}", text)))?;

    let number = match first {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| PredictError::MalformedResponse(format!("first element is not a number: {}", first)))
}
