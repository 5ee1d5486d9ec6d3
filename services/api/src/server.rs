use crate::cli::ServeArgs;
use crate::infra::{AppState, ScoringState};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hcc_risk::config::AppConfig;
use hcc_risk::error::AppError;
use hcc_risk::telemetry;
use hcc_risk::ModelRegistry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(tables_dir) = args.tables_dir.take() {
        config.models.tables_dir = tables_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = ModelRegistry::load_dir(&config.models.tables_dir)?;
    if registry.get(&config.models.default_model).is_err() {
        warn!(
            default_model = %config.models.default_model,
            tables_dir = %config.models.tables_dir.display(),
            "default model has no reference tables; requests must name a loaded model"
        );
    }
    let models = registry.len();
    let scoring = ScoringState::new(registry, config.models.default_model.clone());

    let app = with_scoring_routes(scoring)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, models, "hcc risk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
