use anyhow::{Context, Result};
use clap::ArgMatches;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use uritemplate::{cli, config::TemplateCatalog, create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::command().get_matches();
    match matches.subcommand() {
        Some(("serve", serve_matches)) => serve(serve_matches).await,
        Some(("expand", expand_matches)) => {
            println!("{}", cli::run_expand(expand_matches)?);
            Ok(())
        }
        _ => unreachable!("a subcommand is required"),
    }
}

async fn serve(matches: &ArgMatches) -> Result<()> {
    let templates_path = matches.get_one::<String>("templates").map(String::as_str);
    let port = matches
        .get_one::<u16>("port")
        .copied()
        .unwrap_or(cli::DEFAULT_PORT);

    let catalog = TemplateCatalog::load(templates_path)?;
    let app = create_router(Arc::new(AppState::new(catalog)));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
