use std::sync::Arc;

use actix_web::web;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use database::{MemoryStore, PayrollStore, PgPayrollStore};
pub use error::AppError;
pub use services::{AdjustmentService, Clock, PayrollService, SettingsService, SystemClock};

/// Services shared by every worker, all backed by one store.
#[derive(Clone)]
pub struct AppState {
    pub payroll: PayrollService,
    pub adjustments: AdjustmentService,
    pub settings: SettingsService,
}

impl AppState {
    pub fn new(store: Arc<dyn PayrollStore>, clock: Arc<dyn Clock>) -> Self {
        let settings = SettingsService::new(store.clone(), clock);
        Self {
            payroll: PayrollService::new(store.clone(), settings.clone()),
            adjustments: AdjustmentService::new(store),
            settings,
        }
    }

    /// Registers the services as app data and mounts the API routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.payroll.clone()))
            .app_data(web::Data::new(self.adjustments.clone()))
            .app_data(web::Data::new(self.settings.clone()))
            .configure(routes::configure);
    }
}
