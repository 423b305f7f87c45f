use arcade::{Registry, config, db, net::http};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cfg = Arc::new(config::Config::from_env()?);

    let db = Arc::new(db::Db::new(&cfg.database_url)?);
    db.init().await?;

    let registry = Arc::new(Registry::new(db, cfg.clone()));

    let addr: SocketAddr = cfg.http_addr.parse()?;
    tracing::info!(%addr, "arcade server listening");
    http::serve(addr, registry).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().unwrap();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();
}
