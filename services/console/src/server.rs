use crate::cli::ServeArgs;
use crate::infra::seed_demo;
use std::sync::Arc;
use staff_desk::config::AppConfig;
use staff_desk::error::AppError;
use staff_desk::telemetry;
use staff_desk::workflows::staff::api::sandbox_router;
use staff_desk::workflows::staff::SandboxBackend;
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

    let backend = Arc::new(SandboxBackend::new());
    if args.seed_demo {
        seed_demo(&backend)?;
        info!(
            staff = backend.staff().len(),
            vacancies = backend.vacancies().len(),
            "sandbox seeded with demo data"
        );
    }

    let app = sandbox_router(backend);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.environment, %addr, "staff sandbox backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
