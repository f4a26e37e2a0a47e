use std::{path::PathBuf, sync::Arc, time::Instant};

use anyhow::Result;
use cinesofia_core::{
    AnalysisCoordinator, AppController, ApplicationState, Commit, RequestTicket, Submission,
    share_text,
};
use console::style;
use indicatif::ProgressBar;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::{JoinError, JoinHandle},
};

use crate::{format_duration, render};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Title(String),
    Image(PathBuf),
    Share,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        ":q" | ":quit" | ":salir" => Command::Quit,
        ":share" | ":compartir" => Command::Share,
        ":help" | ":ayuda" => Command::Help,
        _ => match line.strip_prefix('@') {
            Some(path) => Command::Image(PathBuf::from(path.trim())),
            None => Command::Title(line.to_string()),
        },
    }
}

fn print_help() {
    println!(
        "{}",
        style("Escribe un título y pulsa Enter, o @ruta/a/captura.jpg para buscar por imagen.")
            .dim()
    );
    println!(
        "{}\n",
        style(":compartir  texto para compartir · :salir  terminar").dim()
    );
}

struct Running {
    ticket: RequestTicket,
    task: JoinHandle<Commit>,
    spinner: ProgressBar,
    started: Instant,
}

/// Resolves when the in-flight analysis finishes; never resolves when idle.
async fn finished(running: &mut Option<Running>) -> std::result::Result<Commit, JoinError> {
    match running {
        Some(r) => (&mut r.task).await,
        None => std::future::pending().await,
    }
}

/// Record how the analysis task ended. A task that died before reporting
/// back is aborted so the session does not stay busy.
fn settle(
    controller: &AppController,
    ticket: RequestTicket,
    joined: std::result::Result<Commit, JoinError>,
) -> Commit {
    match joined {
        Ok(commit) => commit,
        Err(e) => {
            tracing::error!(error = %e, seq = ticket.seq, "analysis task failed");
            controller.abort(ticket)
        }
    }
}

/// Read submissions from stdin until EOF or `:salir`.
///
/// Lines typed while an analysis is running are rejected by the controller,
/// so at most one request is ever in flight.
pub async fn run(
    controller: Arc<AppController>,
    coordinator: Arc<AnalysisCoordinator>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    render::print_state(&controller.snapshot(), json)?;
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut running: Option<Running> = None;

    loop {
        tokio::select! {
            joined = finished(&mut running), if running.is_some() => {
                if let Some(r) = running.take() {
                    r.spinner.finish_and_clear();
                    settle(&controller, r.ticket, joined);
                    if !json {
                        println!(
                            "{} {}\n",
                            style("Tiempo:").dim(),
                            style(format_duration(r.started.elapsed())).cyan()
                        );
                    }
                }
                let state = controller.snapshot();
                render::print_state(&state, json)?;
                if let (ApplicationState::Success(analysis), Some(path)) = (&state, &output) {
                    render::save_analysis(analysis, path).await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    if let Some(r) = running.take() {
                        let joined = r.task.await;
                        r.spinner.finish_and_clear();
                        settle(&controller, r.ticket, joined);
                        render::print_state(&controller.snapshot(), json)?;
                    }
                    break;
                };

                let submission = match parse_command(&line) {
                    Command::Quit => break,
                    Command::Help => {
                        print_help();
                        continue;
                    }
                    Command::Share => {
                        match controller.snapshot() {
                            ApplicationState::Success(analysis) => {
                                println!("{}\n", share_text(&analysis));
                            }
                            _ => println!(
                                "{}",
                                style("Aún no hay ningún análisis para compartir.").dim()
                            ),
                        }
                        continue;
                    }
                    Command::Title(title) => Submission::Title(title),
                    Command::Image(path) => match tokio::fs::read(&path).await {
                        Ok(bytes) => Submission::Image(bytes),
                        Err(e) => {
                            eprintln!(
                                "{} No se pudo leer {}: {}",
                                style("Error:").red().bold(),
                                path.display(),
                                e
                            );
                            continue;
                        }
                    },
                };

                let ticket = match controller.begin(&submission) {
                    Ok(ticket) => ticket,
                    Err(rejected) => {
                        println!("{}", style(render::rejection_notice(rejected)).yellow());
                        continue;
                    }
                };

                let spinner = render::create_spinner(ticket.mode);
                let task = {
                    let controller = Arc::clone(&controller);
                    let coordinator = Arc::clone(&coordinator);
                    tokio::spawn(async move {
                        let outcome = coordinator.analyze(&submission).await;
                        controller.complete(ticket, outcome)
                    })
                };
                running = Some(Running {
                    ticket,
                    task,
                    spinner,
                    started: Instant::now(),
                });
            }
        }
    }

    Ok(())
}
