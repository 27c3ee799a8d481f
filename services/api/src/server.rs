use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::timeline_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use buildhub_timeline::config::AppConfig;
use buildhub_timeline::error::AppError;
use buildhub_timeline::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

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
    let app_state = AppState::new(readiness_flag.clone(), prometheus_handle, &config.estimator);

    let app = timeline_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_plot_unit = ?config.estimator.default_plot_unit,
        "timeline estimator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
