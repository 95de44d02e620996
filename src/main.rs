//! imgfetch - sequential vs concurrent image download comparison
//!
//! Validates the request once, runs the sequential phase, then the concurrent
//! phase, and prints the elapsed time of each.

mod cli;

use crate::cli::Cli;
use clap::Parser;
use imgfetch::{Comparison, Event, ImageDownloader, Result, RunReport, run_comparison};
use std::process;
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio::task::JoinHandle;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(code = e.error_code(), "Application error: {}", e);
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    process::exit(code);
}

/// Main application logic, returning the process exit code
async fn run(cli: Cli) -> Result<i32> {
    let config = cli.to_config()?;

    // Fail before touching the network; each runner validates again
    config.request.validate()?;

    let downloader = ImageDownloader::new(config)?;
    let printer = spawn_progress_printer(downloader.subscribe());

    let comparison = run_comparison(&downloader).await;

    // Dropping the last sender closes the channel and ends the printer
    drop(downloader);
    if let Err(e) = printer.await {
        error!(error = %e, "Progress printer failed");
    }

    print_summary(&comparison);

    Ok(if comparison.is_success() { 0 } else { 1 })
}

fn spawn_progress_printer(mut events: Receiver<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Progress printer lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn print_event(event: &Event) {
    match event {
        Event::RunStarted { mode, count } => {
            println!("Starting {} download of {} images", mode, count);
        }
        Event::TaskStarted { prefix, index } => {
            println!("[{}] Downloading image {}...", prefix, index);
        }
        Event::TaskSaved { prefix, index, .. } => {
            println!("[{}] Image {} saved", prefix, index);
        }
        Event::TaskFailed { prefix, error, .. } => {
            println!("[{}] Error: {}", prefix, error);
        }
        Event::RunFinished { .. } => {}
    }
}

fn print_summary(comparison: &Comparison) {
    println!();
    print_phase("Sequential", &comparison.sequential);
    print_phase("Concurrent", &comparison.concurrent);

    if let Some(speedup) = comparison.speedup() {
        println!("Speedup: {:.2}x", speedup);
    }
}

fn print_phase(label: &str, phase: &Result<RunReport>) {
    match phase {
        Ok(report) => {
            println!(
                "{} download time: {:.3}s ({} saved, {} failed, {} bytes)",
                label,
                report.elapsed.as_secs_f64(),
                report.saved.len(),
                report.failures.len(),
                report.total_bytes()
            );
        }
        Err(e) => println!("{} download failed: {}", label, e),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,imgfetch=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}
