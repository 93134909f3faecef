use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger};
use anyhow::Result;

use payroll::config::StorageBackend;
use payroll::database::init_database;
use payroll::middleware::RequestId;
use payroll::services::PayrollScheduler;
use payroll::{AppState, Config, MemoryStore, PayrollStore, PgPayrollStore, SystemClock};

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting payroll API (environment: {})",
        config.environment
    );

    let store: Arc<dyn PayrollStore> = match config.storage {
        StorageBackend::Postgres => {
            let pool = init_database(&config.database_url).await?;
            log::info!("Database initialized");
            Arc::new(PgPayrollStore::new(pool))
        }
        StorageBackend::Memory => {
            log::warn!("Running with in-memory storage; data is lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, Arc::new(SystemClock));

    let scheduler = PayrollScheduler::new(
        state.payroll.clone(),
        Duration::from_secs(config.pay_sync_interval_secs),
    );
    let _scheduler_handle = scheduler.start();

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config.client_base_url)
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "OPTIONS"])
            .allowed_headers(vec![
                "Authorization",
                "Content-Type",
                "Accept",
                "X-Requested-With",
                "X-Correlation-ID",
                "X-User-Id",
            ])
            .max_age(3600);

        let state = state.clone();
        App::new()
            .wrap(cors)
            .wrap(Logger::new(
                r#"%a "%r" %s %b %T correlation_id=%{x-correlation-id}o"#,
            ))
            .wrap(RequestId)
            .service(health)
            .configure(|cfg| state.configure(cfg))
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
