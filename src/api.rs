use actix_web::{web, HttpResponse};
use log::{debug, error, info};
use serde_json::Value;

use crate::error::PredictError;
use crate::homepage;
use crate::inference::{decode_prediction, InferenceEndpoint};
use crate::model::PredictionResult;

pub const MAX_BODY_BYTES: usize = 256 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(serve_homepage))
        .route("/api/predict", web::post().to(predict))
        .route("/health", web::get().to(health_check));
}

// Oversized or unparsable bodies get the same 500 shape as inference failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .content_type_required(false)
        .error_handler(|err, _req| {
            let err = PredictError::InvalidBody(err.to_string());
            error!("Prediction failed: {}", err);
            err.into()
        })
}

// The body is forwarded as-is, so the field names are never checked here.
async fn predict(
    body: web::Json<Value>,
    endpoint: web::Data<dyn InferenceEndpoint>,
) -> Result<HttpResponse, PredictError> {
    let result = forward(&body, endpoint.get_ref()).await.map_err(|e| {
        error!("Prediction failed: {}", e);
        e
    })?;

    info!("Predicted grade {:.2}%", result.prediction);
    Ok(HttpResponse::Ok().json(result))
}

async fn forward(
    input: &Value,
    endpoint: &dyn InferenceEndpoint,
) -> Result<PredictionResult, PredictError> {
    let payload = serde_json::to_vec(input).map_err(PredictError::Encode)?;
    debug!("Sending data: {}", String::from_utf8_lossy(&payload));

    let response = endpoint.invoke(payload).await?;
    debug!("Raw response: {}", String::from_utf8_lossy(&response));

    let raw = decode_prediction(&response)?;
    Ok(PredictionResult::new(raw))
}

async fn serve_homepage() -> actix_web::Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(homepage::render()?))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Grade Predictor API is running!")
}
