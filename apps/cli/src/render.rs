use std::{path::Path, time::Duration};

use anyhow::Result;
use cinesofia_core::{
    ApplicationState, PhilosophicalAnalysis, SearchMode, SubmitRejected, format_analysis_readable,
};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(mode: SearchMode) -> ProgressBar {
    let msg = match mode {
        SearchMode::Title => "ANALIZANDO METRAJE... consultando a los grandes pensadores",
        SearchMode::Image => "ANALIZANDO METRAJE... identificando la película",
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.yellow} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn rejection_notice(rejected: SubmitRejected) -> &'static str {
    match rejected {
        SubmitRejected::EmptyInput => "Introduce el nombre de una película o sube una imagen.",
        SubmitRejected::Busy => "Ya hay un análisis en curso. Espera a que termine.",
    }
}

/// Print whatever the current state calls for.
pub fn print_state(state: &ApplicationState, json: bool) -> Result<()> {
    match state {
        ApplicationState::Idle => {
            if !json {
                println!(
                    "{}",
                    style("Descubre la filosofía detrás del cine").yellow()
                );
                println!(
                    "{}\n",
                    style(
                        "Introduce el nombre de una película o una captura de pantalla para desvelar sus secretos filosóficos."
                    )
                    .dim()
                );
            }
        }
        ApplicationState::Analyzing => {
            if !json {
                println!("{}", style("ANALIZANDO METRAJE...").yellow().bold());
            }
        }
        ApplicationState::Success(analysis) => {
            if json {
                println!("{}", serde_json::to_string_pretty(analysis)?);
            } else {
                println!("{}", style("─".repeat(60)).dim());
                println!("{}", format_analysis_readable(analysis));
            }
        }
        ApplicationState::Error(message) => {
            eprintln!("{} {}", style("✗").red().bold(), style(message).red());
        }
    }
    Ok(())
}

/// Save an analysis to a file
pub async fn save_analysis(analysis: &PhilosophicalAnalysis, path: &Path) -> Result<()> {
    let pretty_json = serde_json::to_string_pretty(analysis)?;
    tokio::fs::write(path, &pretty_json).await?;
    eprintln!(
        "{} {}",
        style("Guardado:").dim(),
        style(path.display()).cyan()
    );
    Ok(())
}
