use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dashboard_observability::init();

    let config = dashboard_infra::AppConfig::from_env().context("invalid configuration")?;
    let app = dashboard_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
