use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use cinesofia_core::{
    AnalysisCoordinator, AppController, ApplicationState, ProviderConfig, Submission,
};
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod interactive;
mod render;

#[derive(Parser)]
#[command(name = "cinesofia")]
#[command(
    about = "Discover the philosophy behind a film: analysis, related authors and classroom activities"
)]
struct Cli {
    /// Movie title. Leave empty (and omit --image) for interactive mode.
    #[arg(conflicts_with = "image")]
    title: Vec<String>,

    /// Screenshot, still or poster to identify and analyze
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Print the analysis as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Also save the analysis as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier
    #[arg(long, env = "CINESOFIA_MODEL")]
    model: Option<String>,

    /// Disable the provider's web search grounding
    #[arg(long)]
    no_search: bool,

    /// Show diagnostic logs
    #[arg(short, long)]
    verbose: bool,
}

pub(crate) fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

fn provider_config(cli: &Cli) -> ProviderConfig {
    let mut config = ProviderConfig::from_env();
    if let Some(key) = cli.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        config = config.with_api_key(key);
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    config.web_search = !cli.no_search;
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "cinesofia=info,cinesofia_core=info"
    } else {
        "cinesofia=warn,cinesofia_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let coordinator = Arc::new(AnalysisCoordinator::from_config(provider_config(&cli))?);
    let controller = Arc::new(AppController::new());
    tracing::info!(
        session = %controller.session_id(),
        model = %coordinator.config().model,
        web_search = coordinator.config().web_search,
        "session started"
    );

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("CineSofía").yellow().bold(),
            style("Filosofía en el cine").dim()
        );
    }

    let submission = if let Some(path) = &cli.image {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading image {}", path.display()))?;
        Submission::Image(bytes)
    } else if !cli.title.is_empty() {
        Submission::Title(cli.title.join(" "))
    } else {
        return interactive::run(controller, coordinator, cli.json, cli.output).await;
    };

    render::print_state(&controller.snapshot(), cli.json)?;

    let started = Instant::now();
    let spinner = render::create_spinner(submission.mode());
    let state = match controller.submit(coordinator.as_ref(), submission).await {
        Ok(state) => state,
        Err(rejected) => {
            spinner.finish_and_clear();
            eprintln!(
                "{} {}",
                style("Error:").red().bold(),
                render::rejection_notice(rejected)
            );
            std::process::exit(2);
        }
    };
    spinner.finish_and_clear();

    if !cli.json {
        println!(
            "{} {}\n",
            style("Tiempo:").dim(),
            style(format_duration(started.elapsed())).cyan()
        );
    }

    render::print_state(&state, cli.json)?;

    match state {
        ApplicationState::Success(analysis) => {
            if let Some(path) = &cli.output {
                render::save_analysis(&analysis, path).await?;
            }
            Ok(())
        }
        ApplicationState::Error(_) => std::process::exit(1),
        ApplicationState::Idle | ApplicationState::Analyzing => Ok(()),
    }
}
