use std::error::Error;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use dotenv::dotenv;
use log::info;

use grade_predictor::api;
use grade_predictor::client::PredictClient;
use grade_predictor::config::{Cli, Command, PredictArgs, ServerSettings};
use grade_predictor::form::PredictionForm;
use grade_predictor::inference::{InferenceEndpoint, SageMakerEndpoint};

async fn start_api(settings: ServerSettings) -> std::io::Result<()> {
    let sagemaker = SageMakerEndpoint::new(settings.region, settings.endpoint_name).await;
    info!("Forwarding predictions to endpoint {}", sagemaker.endpoint_name());

    let endpoint: Arc<dyn InferenceEndpoint> = Arc::new(sagemaker);
    let endpoint_data = web::Data::from(endpoint);

    info!("Starting Grade Predictor on http://{}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .app_data(endpoint_data.clone())
            .configure(api::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}

async fn run_prediction(args: PredictArgs) -> Result<(), Box<dyn Error>> {
    let mut form = PredictionForm::new();
    for (field, value) in args.metrics() {
        form.set_field(field, value);
    }

    let invalid: Vec<String> = form
        .errors()
        .map(|(field, error)| format!("{}: {}", field.label(), error))
        .collect();
    if !invalid.is_empty() {
        return Err(invalid.join("; ").into());
    }

    let client = PredictClient::new(args.url);
    let result = match client.submit(&mut form).await {
        Ok(result) => result,
        Err(e) => {
            let message = form.failure().unwrap_or_default().to_string();
            return Err(format!("{} ({})", message, e).into());
        }
    };

    println!("Predicted grade: {:.2}%", result.prediction);
    println!();
    println!("Feature importance:");
    for feature in &result.feature_importance {
        let bar = "#".repeat((feature.importance * 100.0).round() as usize);
        println!("  {:<16} {:>5.2} {}", feature.name, feature.importance, bar);
    }

    Ok(())
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match cli.command {
        Command::Serve(settings) => start_api(settings).await?,
        Command::Predict(args) => run_prediction(args).await?,
    }

    Ok(())
}
