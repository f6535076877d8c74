use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dreams_client::report::ReportScreen;
use dreams_client::{ClientConfig, DreamsApi, Session};
use dreams_core::event_status::local_today;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dreams_client=info,dreams_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ClientConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Loaded client configuration");

    let api = DreamsApi::new(&config)?;
    let session = Arc::new(Session::from_config(&config));

    // --- Sign in ---
    if let (Ok(username), Ok(password)) = (
        std::env::var("DREAMS_USERNAME"),
        std::env::var("DREAMS_PASSWORD"),
    ) {
        let login = api
            .login(&username, &password)
            .await
            .context("Login failed")?;
        session.store_token(&login.auth_token())?;
        tracing::info!(username = ?login.username, "Signed in");
    } else if !session.is_authenticated() {
        tracing::warn!("No stored token and no DREAMS_USERNAME/DREAMS_PASSWORD; requests will be skipped");
    }

    // --- Report ---
    let mut report = ReportScreen::new(api, Arc::clone(&session));
    let load = report.load().await;
    for (collection, error) in &load.failures {
        tracing::warn!(collection, error = %error, "Collection unavailable");
    }

    if let Ok(raw) = std::env::var("DREAMS_REPORT_EVENT") {
        let event_id = raw
            .trim()
            .parse()
            .with_context(|| format!("DREAMS_REPORT_EVENT must be an event id, got {raw:?}"))?;
        if let Err(e) = report.select_event(Some(event_id)).await {
            tracing::warn!(event_id, error = %e, "Assessment unavailable");
        }
    }

    let summary = report.summary(local_today());
    println!("Total participants: {}", summary.total_participants);
    println!("Upcoming events:    {}", summary.events.upcoming);
    println!("Ongoing events:     {}", summary.events.ongoing);
    println!("Closed events:      {}", summary.events.closed);

    let (completion, sufficiency) = report.charts();
    for chart in [completion, sufficiency] {
        println!("{}", chart.title);
        for point in chart.points {
            println!("  {:<18} {:>6.2}%", point.label, point.y);
        }
    }

    Ok(())
}
