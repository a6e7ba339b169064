// Funders Dashboard - Web Server

use anyhow::{Context, Result};
use funders_dashboard::server::{router, AppState};
use funders_dashboard::{Settings, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    let addr = settings.bind_addr.clone();
    log::info!("Funders dashboard v{} - GraphQL endpoint {}", VERSION, settings.graphql_url);

    let state = AppState::new(settings)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    log::info!("Server running on http://{}", addr);
    log::info!("   Page: http://{}/funders-dashboard/<slug>", addr);
    log::info!("   API:  http://{}/api/funders-dashboard/<slug>", addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
