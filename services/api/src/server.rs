use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemorySessionRepository};
use crate::routes::with_practice_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use interview_coach::config::AppConfig;
use interview_coach::telemetry;
use interview_coach::{AppError, OpenAiCritiqueClient, PracticeService};
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(config.catalog.path.as_deref())?);
    let repository = Arc::new(InMemorySessionRepository::default());
    let mut practice_service = PracticeService::new(catalog, repository);
    if config.critique.enabled() {
        let client = OpenAiCritiqueClient::from_config(&config.critique)?;
        info!(model = client.model(), "answer critiques enabled");
        practice_service = practice_service.with_critic(Arc::new(client));
    } else {
        warn!("OPENAI_API_KEY not set; critique endpoints will respond 503");
    }

    let app = with_practice_routes(Arc::new(practice_service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "interview coach api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
