use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::shared::{Actor, ApiResponse};
use crate::services::PayrollService;

pub async fn generate(
    _actor: Actor,
    payroll: web::Data<PayrollService>,
) -> Result<HttpResponse, AppError> {
    let summary = payroll.generate_if_needed().await?;
    Ok(ApiResponse::success(summary))
}

pub async fn sync_missing(
    _actor: Actor,
    payroll: web::Data<PayrollService>,
) -> Result<HttpResponse, AppError> {
    let summary = payroll.sync_missing_from_shifts().await?;
    Ok(ApiResponse::success(summary))
}

pub async fn list_pending(
    _actor: Actor,
    payroll: web::Data<PayrollService>,
) -> Result<HttpResponse, AppError> {
    let records = payroll.list_pending().await?;
    Ok(ApiResponse::success(records))
}

pub async fn list_approved(
    _actor: Actor,
    payroll: web::Data<PayrollService>,
) -> Result<HttpResponse, AppError> {
    let records = payroll.list_approved().await?;
    Ok(ApiResponse::success(records))
}

pub async fn list_mine(
    actor: Actor,
    payroll: web::Data<PayrollService>,
) -> Result<HttpResponse, AppError> {
    let records = payroll.list_for_employee(actor.id()).await?;
    Ok(ApiResponse::success(records))
}

pub async fn get_mine(
    actor: Actor,
    payroll: web::Data<PayrollService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let record = payroll
        .get_for_employee(actor.id(), path.into_inner())
        .await?;
    Ok(ApiResponse::success(record))
}

pub async fn toggle_hold(
    _actor: Actor,
    payroll: web::Data<PayrollService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = payroll.toggle_hold(path.into_inner()).await?;
    Ok(ApiResponse::success(outcome))
}

pub async fn approve(
    actor: Actor,
    payroll: web::Data<PayrollService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = payroll.approve(path.into_inner(), actor.id()).await?;
    Ok(ApiResponse::success(outcome))
}

pub async fn approve_all(
    actor: Actor,
    payroll: web::Data<PayrollService>,
) -> Result<HttpResponse, AppError> {
    let outcome = payroll.approve_all(actor.id()).await?;
    let message = format!("Approved {} pay records", outcome.approved);
    Ok(ApiResponse::success_with_message(outcome, &message))
}
