use crate::cli::ServeArgs;
use crate::infra::{AppState, RecordBackend};
use crate::routes::with_underwriting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use underwriting::config::AppConfig;
use underwriting::error::AppError;
use underwriting::loans::{RecordWriter, UnderwritingService};
use underwriting::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(RecordBackend::connect(&config.database).await?);
    let (writer, record_worker) =
        RecordWriter::spawn(store.clone(), config.persistence.queue_capacity);
    let service = Arc::new(UnderwritingService::new(store.clone(), writer));

    let app = with_underwriting_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mortgage underwriting service ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last service handle, so the queue is closed once it is dropped.
    readiness_flag.store(false, Ordering::Release);
    if let Err(err) = record_worker.await {
        warn!(error = %err, "record writer did not shut down cleanly");
    }
    store.close().await;

    info!("mortgage underwriting service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
