use actix_web::web;

pub mod adjustments;
pub mod pay;
pub mod settings;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(pay::configure)
            .configure(adjustments::configure)
            .configure(settings::configure),
    );
}
