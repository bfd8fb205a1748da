pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod homepage;
pub mod inference;
pub mod model;

pub use error::PredictError;
pub use form::{MetricField, PredictionForm, ValidationError};
pub use inference::{InferenceEndpoint, SageMakerEndpoint};
pub use model::PredictionResult;
