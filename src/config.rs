use clap::{Args, Parser, Subcommand};

use crate::form::MetricField;

#[derive(Parser, Debug)]
#[command(author, version, about = "Student grade prediction service", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "PREDICTOR_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the prediction page and API
    Serve(ServerSettings),
    /// Validate metrics locally and request a prediction from a running server
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServerSettings {
    #[arg(long, env = "PREDICTOR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PREDICTOR_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Falls back to the AWS default region chain when unset
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    #[arg(long, env = "SAGEMAKER_ENDPOINT_NAME")]
    pub endpoint_name: String,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long, env = "PREDICTOR_URL", default_value = "http://127.0.0.1:8080")]
    pub url: String,

    #[arg(long, allow_hyphen_values = true)]
    pub study_hours: String,
    #[arg(long, allow_hyphen_values = true)]
    pub attendance: String,
    #[arg(long, allow_hyphen_values = true)]
    pub previous_grade: String,
    #[arg(long, allow_hyphen_values = true)]
    pub project_score: String,
    #[arg(long, allow_hyphen_values = true)]
    pub quiz_average: String,
    #[arg(long, allow_hyphen_values = true)]
    pub study_group_hours: String,
    #[arg(long, allow_hyphen_values = true)]
    pub tutorial_attendance: String,
    #[arg(long, allow_hyphen_values = true)]
    pub sleep_hours: String,
    #[arg(long, allow_hyphen_values = true)]
    pub stress_level: String,
    #[arg(long, allow_hyphen_values = true)]
    pub extracurricular_hours: String,
}

impl PredictArgs {
    pub fn metrics(&self) -> Vec<(MetricField, &str)> {
        vec![
            (MetricField::StudyHours, self.study_hours.as_str()),
            (MetricField::Attendance, self.attendance.as_str()),
            (MetricField::PreviousGrade, self.previous_grade.as_str()),
            (MetricField::ProjectScore, self.project_score.as_str()),
            (MetricField::QuizAverage, self.quiz_average.as_str()),
            (MetricField::StudyGroupHours, self.study_group_hours.as_str()),
            (MetricField::TutorialAttendance, self.tutorial_attendance.as_str()),
            (MetricField::SleepHours, self.sleep_hours.as_str()),
            (MetricField::StressLevel, self.stress_level.as_str()),
            (MetricField::ExtracurricularHours, self.extracurricular_hours.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_serve_flags() {
        let cli = Cli::try_parse_from([
            "grade_predictor",
            "serve",
            "--port",
            "9000",
            "--region",
            "eu-west-1",
            "--endpoint-name",
            "grade-model",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(settings) => {
                assert_eq!(settings.port, 9000);
                assert_eq!(settings.region.as_deref(), Some("eu-west-1"));
                assert_eq!(settings.endpoint_name, "grade-model");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_predict_metrics_cover_every_field() {
        let cli = Cli::try_parse_from([
            "grade_predictor",
            "predict",
            "--url",
            "http://localhost:1",
            "--study-hours",
            "-2",
            "--attendance",
            "90",
            "--previous-grade",
            "70",
            "--project-score",
            "80",
            "--quiz-average",
            "75",
            "--study-group-hours",
            "3",
            "--tutorial-attendance",
            "85",
            "--sleep-hours",
            "7",
            "--stress-level",
            "4",
            "--extracurricular-hours",
            "5",
        ])
        .unwrap();

        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        let metrics = args.metrics();
        let fields: Vec<MetricField> = metrics.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, MetricField::ALL.to_vec());
        assert_eq!(metrics[0].1, "-2");
    }
}
