use actix_web::web;

use crate::handlers::adjustments;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/adjustments")
            .route("/types", web::post().to(adjustments::create_type))
            .route("/types", web::get().to(adjustments::list_types))
            .route("/types/{id}", web::patch().to(adjustments::update_type))
            .route(
                "/employees/{employee_id}/adjustments",
                web::post().to(adjustments::assign),
            )
            .route(
                "/employees/{employee_id}/adjustments",
                web::get().to(adjustments::list_for_employee),
            )
            .route(
                "/employees/{employee_id}/adjustments/{assignment_id}",
                web::patch().to(adjustments::update_assignment),
            ),
    );
}
