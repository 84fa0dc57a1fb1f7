use anyhow::{Context, Result};
use nhl_schedule_odds::web::{router, AppState};
use nhl_schedule_odds::{build_presenter, build_service, Config};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::from_env().context("Invalid configuration")?;
    let service = Arc::new(build_service(&config));

    println!("Fetching schedule data...");

    // Warm the cache on startup; pages retry on their own if this fails
    match service.refresh().await {
        Ok(data) => {
            println!("Data loaded successfully");
            println!("  - {}", data.title());
            println!("  - {} games", data.fixtures.len());
            if !data.odds_available {
                println!("  - odds unavailable");
            }
        }
        Err(e) => {
            eprintln!("Error fetching data: {}", e);
            eprintln!("Server will start but pages may show errors");
        }
    }

    let state = AppState {
        service,
        presenter: build_presenter(&config),
    };
    let app = router(state);

    println!("\nStarting web server at http://{}", config.bind_addr);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
