use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_lending_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use green_lending::config::AppConfig;
use green_lending::error::AppError;
use green_lending::telemetry;
use green_lending::workflows::loan::{GeminiProvider, LendingService, SupabaseAuth};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.scoring.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; every evaluation will return the fallback result");
    }
    let provider = Arc::new(GeminiProvider::new(&config.scoring)?);

    let auth = Arc::new(SupabaseAuth::from_config(&config.auth)?);
    if !auth.is_configured() {
        warn!("SUPABASE_URL/SUPABASE_ANON_KEY not set; sign-in and sign-up are disabled");
    }

    let lending_service = Arc::new(LendingService::new(provider, auth));

    let app = with_lending_routes(lending_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = %config.scoring.model,
        "green lending evaluator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
