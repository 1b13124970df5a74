//! Prometheus exposition for the form's counters

use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;

/// Install the global recorder; every `metrics::counter!` lands here
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}

pub fn router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(|| async move { handle.render() }))
}

/// Serve `/metrics` on an already bound listener until the task is aborted
pub async fn serve(listener: TcpListener, handle: PrometheusHandle) -> anyhow::Result<()> {
    tracing::info!("Form metrics listening on {}", listener.local_addr()?);
    axum::serve(listener, router(handle)).await?;
    Ok(())
}
