#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::process::ExitCode;

use args::Args;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use vocalis_config::Config;
use vocalis_job::{JobRequest, JobResponse};
use vocalis_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    let _telemetry_guard = vocalis_telemetry::init(config.telemetry.as_ref(), &args.log, args.log_format.into())?;

    if let Some(ref input) = args.test_input {
        return run_test_input(&config, input).await;
    }

    tracing::info!(
        config_path = %args.config.display(),
        "starting vocalis"
    );

    let mut server = Server::new(&config)?;
    if let Some(listen) = args.listen {
        server = server.with_listen_address(listen);
    }

    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("vocalis stopped");
    Ok(ExitCode::SUCCESS)
}

/// Run one job from the command line and print its response
///
/// The input is read like a `/runsync` body, so a malformed job prints an
/// error response instead of failing startup.
async fn run_test_input(config: &Config, input: &str) -> anyhow::Result<ExitCode> {
    let response = match read_test_job(input) {
        Ok(request) => {
            let orchestrator = vocalis_job::build_orchestrator(config)?;
            orchestrator.handle(request).await
        }
        Err(rejected) => rejected,
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.is_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_test_job(input: &str) -> Result<JobRequest, JobResponse> {
    vocalis_server::parse_job(input.as_bytes()).map_err(|(id, error)| {
        tracing::warn!(job.id = %id, error = %error, "rejected --test-input payload");
        JobResponse::rejected(id, error)
    })
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
