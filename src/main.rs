use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use yt_daily_stats::fetcher::StatFetcher;
use yt_daily_stats::store::Store;
use yt_daily_stats::{load_config, resolve_config_path, router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config_path = resolve_config_path();
    let config = load_config(&config_path)?;

    if let Some(parent) = config.sqlite.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let store = Store::open(&config.sqlite.path).await?;
    let fetcher = StatFetcher::new(
        config.youtube.api_base.clone(),
        config.youtube.api_key.clone(),
        config.youtube.video_id.clone(),
    )?;

    let app = router(AppState::new(store, fetcher));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
