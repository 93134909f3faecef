use actix_web::web;

use crate::handlers::pay;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pay")
            .route("/generate", web::post().to(pay::generate))
            .route("/sync-missing", web::post().to(pay::sync_missing))
            .route("/pending", web::get().to(pay::list_pending))
            .route("/approved", web::get().to(pay::list_approved))
            .route("/my", web::get().to(pay::list_mine))
            .route("/my/{id}", web::get().to(pay::get_mine))
            .route("/approve-all", web::post().to(pay::approve_all))
            .route("/{id}/hold", web::put().to(pay::toggle_hold))
            .route("/{id}/approve", web::put().to(pay::approve)),
    );
}
