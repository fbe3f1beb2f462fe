use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use workflow::{
    ConfigError, DiseaseLabel, HttpTransport, ImageReference, PredictionWorkflow, ResultView,
    SubmitOutcome, WorkflowConfig, WorkflowEvent,
};

/// Classify a tomato leaf photo with the remote inference service.
#[derive(Parser, Debug)]
#[command(name = "tomato-predict", version)]
struct Args {
    /// Photo of a single tomato leaf.
    image: PathBuf,

    /// Prediction endpoint, e.g. http://localhost:8000/predict.
    #[arg(long)]
    endpoint: Option<String>,

    /// Seconds to wait for the service before giving up.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// YAML configuration file, read instead of the `PREDICT_*` environment
    /// variables. Flags take precedence over either source.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    match run(Args::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(args: &Args) -> Result<WorkflowConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => WorkflowConfig::load(path)?,
        None => WorkflowConfig::from_env()?,
    };
    if let Some(endpoint) = &args.endpoint {
        config = WorkflowConfig {
            timeout_secs: config.timeout_secs,
            clear_result_on_select: config.clear_result_on_select,
            ..WorkflowConfig::new(endpoint)?
        };
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;

    let image = ImageReference::from_path(&args.image).await?;
    if !image.is_image() {
        log::warn!(
            "{} does not look like an image ({})",
            image.file_name(),
            image.content_type()
        );
    }

    let workflow = PredictionWorkflow::new(config, HttpTransport::new());
    log::info!("Using prediction endpoint {}", workflow.config().endpoint);
    workflow.subscribe(|event| {
        if let WorkflowEvent::PresentResult(result) = event {
            print_result_sheet(&ResultView::from_result(Some(result)));
        }
    });
    workflow.select_image(image);

    match workflow.submit().await {
        SubmitOutcome::Success(_) => Ok(true),
        SubmitOutcome::Failed(e) => {
            eprintln!("{e}");
            eprintln!("Nothing was recorded; run the command again to retry.");
            Ok(false)
        }
        other => {
            log::warn!("Submission did not complete: {:?}", other);
            Ok(false)
        }
    }
}

fn print_result_sheet(view: &ResultView) {
    const MISSING: &str = "No information available for this label.";

    println!("Prediction");
    println!();
    match view.disease.parse::<DiseaseLabel>() {
        Ok(label) => println!("Disease:    {} ({})", label.display_name(), view.disease),
        Err(_) => println!("Disease:    {}", view.disease),
    }
    println!("Confidence: {}", view.confidence);
    println!();
    if !view.has_guidance() {
        println!("{MISSING}");
        return;
    }
    println!("Causes:");
    println!("{}", view.causes.unwrap_or(MISSING));
    println!();
    println!("Treatments:");
    println!("{}", view.treatments.unwrap_or(MISSING));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let parsed = Args::try_parse_from(["tomato-predict", "leaf.jpg", "--timeout-secs", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn config_file_values_survive_environment() {
        let file = yaml_config("endpoint: http://models.internal:9000/predict\ntimeout_secs: 7\n");
        // SAFETY: no other test in this binary touches the environment.
        unsafe { std::env::set_var("PREDICT_ENDPOINT", "http://from-env:1/predict") };

        let path = file.path().to_str().unwrap();
        let args = Args::try_parse_from(["tomato-predict", "leaf.jpg", "--config", path]).unwrap();
        let config = resolve_config(&args).unwrap();
        unsafe { std::env::remove_var("PREDICT_ENDPOINT") };

        assert_eq!(config.endpoint.as_str(), "http://models.internal:9000/predict");
        assert_eq!(config.timeout_secs, 7);
    }

    #[test]
    fn flags_override_config_file() {
        let file = yaml_config("endpoint: http://models.internal:9000/predict\ntimeout_secs: 7\n");
        let args = Args::try_parse_from([
            "tomato-predict",
            "leaf.jpg",
            "--config",
            file.path().to_str().unwrap(),
            "--endpoint",
            "https://example.org/predict",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.endpoint.as_str(), "https://example.org/predict");
        assert_eq!(config.timeout_secs, 3);
    }
}
