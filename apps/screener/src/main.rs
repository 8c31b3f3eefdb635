mod batch;
mod cli;
mod config;
mod errors;
mod extract;
mod jobs;
mod llm_client;
mod routes;
mod sample;
mod screening;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command, Console};
use crate::config::Config;
use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::llm_client::build_model;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ResultStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Needs no model or API key
    if let Some(Command::Sample { output }) = &cli.command {
        return write_sample(output);
    }

    // Fails fast when the provider's API key is missing
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the reports
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let model = build_model(&config)?;

    let extractor: Arc<dyn TextExtractor> = Arc::new(PdfTextExtractor);
    let store = ResultStore::new(&config.results_dir);

    let mut console = Console::new(io::stdin().lock(), io::stdout());

    match cli.command {
        None => {
            cli::run_interactive(&mut console, extractor.as_ref(), model.as_ref(), &store).await?;
        }
        Some(Command::Single { resume, job }) => {
            let job_description =
                cli::resolve_job_description(&job, &mut console, model.as_ref()).await?;
            cli::run_single(
                &mut console,
                &resume,
                &job_description,
                extractor.as_ref(),
                model.as_ref(),
                &store,
            )
            .await?;
        }
        Some(Command::Batch { folder, job }) => {
            let job_description =
                cli::resolve_job_description(&job, &mut console, model.as_ref()).await?;
            cli::run_batch_folder(
                &mut console,
                &folder,
                &job_description,
                extractor.as_ref(),
                model.as_ref(),
                &store,
            )
            .await?;
        }
        Some(Command::Sample { output }) => write_sample(&output)?,
        Some(Command::Serve { port }) => {
            info!("Starting resume screener API v{}", env!("CARGO_PKG_VERSION"));

            let state = AppState {
                model,
                extractor,
                store,
            };

            let app = build_router(state)
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive());

            let addr: SocketAddr = format!("0.0.0.0:{}", port.unwrap_or(config.port)).parse()?;
            info!("Listening on {addr}");

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn write_sample(output: &Path) -> Result<()> {
    sample::write_sample_resume(output)?;
    println!("[OK] Created {}", output.display());
    Ok(())
}
