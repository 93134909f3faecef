use actix_web::web;

use crate::handlers::settings;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("/timezone", web::get().to(settings::get_timezone))
            .route("/timezone", web::put().to(settings::update_timezone))
            .route(
                "/timezones",
                web::get().to(settings::list_supported_timezones),
            )
            .route("/currency", web::get().to(settings::get_currency))
            .route("/currency", web::put().to(settings::update_currency))
            .route(
                "/currencies",
                web::get().to(settings::list_supported_currencies),
            )
            .route("/budget", web::get().to(settings::get_budget))
            .route("/budget", web::put().to(settings::update_budget)),
    );
}
