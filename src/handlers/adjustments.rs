use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::database::models::{
    CreateAdjustmentTypeInput, CreateEmployeeAdjustmentInput, UpdateAdjustmentTypeInput,
    UpdateEmployeeAdjustmentInput,
};
use crate::error::AppError;
use crate::handlers::shared::{Actor, ApiResponse};
use crate::services::AdjustmentService;

// Adjustment types
pub async fn create_type(
    _actor: Actor,
    adjustments: web::Data<AdjustmentService>,
    input: web::Json<CreateAdjustmentTypeInput>,
) -> Result<HttpResponse, AppError> {
    let adjustment = adjustments.create_type(input.into_inner()).await?;
    Ok(ApiResponse::created(adjustment))
}

pub async fn list_types(
    _actor: Actor,
    adjustments: web::Data<AdjustmentService>,
) -> Result<HttpResponse, AppError> {
    let types = adjustments.list_types().await?;
    Ok(ApiResponse::success(types))
}

pub async fn update_type(
    _actor: Actor,
    adjustments: web::Data<AdjustmentService>,
    path: web::Path<Uuid>,
    input: web::Json<UpdateAdjustmentTypeInput>,
) -> Result<HttpResponse, AppError> {
    let adjustment = adjustments
        .update_type(path.into_inner(), input.into_inner())
        .await?;
    Ok(ApiResponse::success(adjustment))
}

// Employee assignments
pub async fn assign(
    _actor: Actor,
    adjustments: web::Data<AdjustmentService>,
    path: web::Path<Uuid>,
    input: web::Json<CreateEmployeeAdjustmentInput>,
) -> Result<HttpResponse, AppError> {
    let assignment = adjustments
        .assign_to_employee(path.into_inner(), input.into_inner())
        .await?;
    Ok(ApiResponse::created(assignment))
}

pub async fn list_for_employee(
    _actor: Actor,
    adjustments: web::Data<AdjustmentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let assignments = adjustments.list_for_employee(path.into_inner()).await?;
    Ok(ApiResponse::success(assignments))
}

pub async fn update_assignment(
    _actor: Actor,
    adjustments: web::Data<AdjustmentService>,
    path: web::Path<(Uuid, Uuid)>,
    input: web::Json<UpdateEmployeeAdjustmentInput>,
) -> Result<HttpResponse, AppError> {
    let (employee_id, assignment_id) = path.into_inner();
    let assignment = adjustments
        .update_assignment(employee_id, assignment_id, input.into_inner())
        .await?;
    Ok(ApiResponse::success(assignment))
}
