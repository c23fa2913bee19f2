use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use tutor_scheduler::adapters::http::{app_router, with_middleware, SchedulingHandlers};
use tutor_scheduler::adapters::postgres::{
    PostgresEnrollmentReader, PostgresSessionReader, PostgresSessionRepository, MIGRATOR,
};
use tutor_scheduler::adapters::scheduler::{WeeklySessionJob, WeeklySessionJobConfig};
use tutor_scheduler::application::{ScheduleUpcomingWeekHandler, UpdateWeekHandler};
use tutor_scheduler::config::AppConfig;
use tutor_scheduler::domain::scheduling::RecurrenceExpander;
use tutor_scheduler::ports::SystemClock;
use tutor_scheduler::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let timezone = config.scheduling.reference_timezone()?;
    let week_start = config.scheduling.week_start()?;
    info!(
        timezone = timezone.name(),
        week_start = %week_start,
        environment = ?config.server.environment,
        "Starting tutor scheduler"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running database migrations");
        MIGRATOR.run(&pool).await?;
    }

    let repository = Arc::new(PostgresSessionRepository::new(pool.clone()));
    let update_week = Arc::new(UpdateWeekHandler::new(
        Arc::new(PostgresEnrollmentReader::new(pool.clone())),
        Arc::new(PostgresSessionReader::new(pool.clone(), timezone)),
        repository,
        RecurrenceExpander::new(timezone),
    ));
    let upcoming_week = Arc::new(ScheduleUpcomingWeekHandler::new(
        update_week.clone(),
        Arc::new(SystemClock),
        week_start,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let job_handle = if config.scheduling.weekly_job_enabled {
        let job = WeeklySessionJob::with_config(
            upcoming_week.clone(),
            WeeklySessionJobConfig::default().with_interval(config.scheduling.job_interval()),
        );
        Some(tokio::spawn(async move { job.run(shutdown_rx).await }))
    } else {
        warn!("Weekly session job disabled");
        None
    };

    let app = with_middleware(
        app_router(SchedulingHandlers::new(update_week, upcoming_week)),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = job_handle {
        if let Err(e) = handle.await {
            error!(error = %e, "Weekly session job panicked");
        }
    }

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
