use actix_web::{HttpResponse, Result, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{
    BudgetUpdateInput, Currency, CurrencyUpdateInput, TimezoneUpdateInput,
};
use crate::error::AppError;
use crate::handlers::shared::{Actor, ApiResponse};
use crate::services::SettingsService;
use crate::services::settings::{list_currencies, list_timezones};

const DEFAULT_CURRENCY_LIMIT: usize = 150;
const MAX_CURRENCY_LIMIT: usize = 500;
const DEFAULT_TIMEZONE_LIMIT: usize = 500;
const MAX_TIMEZONE_LIMIT: usize = 1000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneResponse {
    pub timezone: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyResponse {
    pub currency: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    pub budget: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CurrencyListResponse {
    pub currencies: Vec<Currency>,
}

#[derive(Debug, Serialize)]
pub struct TimezoneListResponse {
    pub timezones: Vec<&'static str>,
}

/// Search parameters shared by the timezone and currency listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}

pub async fn get_timezone(
    _actor: Actor,
    settings: web::Data<SettingsService>,
) -> Result<HttpResponse, AppError> {
    let current = settings.get().await?;
    Ok(ApiResponse::success(TimezoneResponse {
        timezone: current.timezone,
        updated_at: current.timezone_updated_at,
        updated_by: current.timezone_updated_by,
    }))
}

pub async fn update_timezone(
    actor: Actor,
    settings: web::Data<SettingsService>,
    input: web::Json<TimezoneUpdateInput>,
) -> Result<HttpResponse, AppError> {
    let updated = settings
        .update_timezone(&input.timezone, actor.id())
        .await?;
    Ok(ApiResponse::success(TimezoneResponse {
        timezone: updated.timezone,
        updated_at: updated.timezone_updated_at,
        updated_by: updated.timezone_updated_by,
    }))
}

pub async fn list_supported_timezones(
    _actor: Actor,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_TIMEZONE_LIMIT);
    if limit == 0 || limit > MAX_TIMEZONE_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_TIMEZONE_LIMIT
        )));
    }

    let timezones = list_timezones(query.search.as_deref(), limit);
    Ok(ApiResponse::success(TimezoneListResponse { timezones }))
}

pub async fn get_currency(
    _actor: Actor,
    settings: web::Data<SettingsService>,
) -> Result<HttpResponse, AppError> {
    let current = settings.get().await?;
    Ok(ApiResponse::success(CurrencyResponse {
        currency: current.currency,
        updated_at: current.currency_updated_at,
        updated_by: current.currency_updated_by,
    }))
}

pub async fn update_currency(
    actor: Actor,
    settings: web::Data<SettingsService>,
    input: web::Json<CurrencyUpdateInput>,
) -> Result<HttpResponse, AppError> {
    let updated = settings
        .update_currency(&input.currency, actor.id())
        .await?;
    Ok(ApiResponse::success(CurrencyResponse {
        currency: updated.currency,
        updated_at: updated.currency_updated_at,
        updated_by: updated.currency_updated_by,
    }))
}

pub async fn list_supported_currencies(
    _actor: Actor,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_CURRENCY_LIMIT);
    if limit == 0 || limit > MAX_CURRENCY_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_CURRENCY_LIMIT
        )));
    }

    let currencies = list_currencies(query.search.as_deref(), limit);
    Ok(ApiResponse::success(CurrencyListResponse { currencies }))
}

pub async fn get_budget(
    _actor: Actor,
    settings: web::Data<SettingsService>,
) -> Result<HttpResponse, AppError> {
    let current = settings.get().await?;
    Ok(ApiResponse::success(BudgetResponse {
        budget: current.quarterly_budget,
        updated_at: current.quarterly_budget_updated_at,
        updated_by: current.quarterly_budget_updated_by,
    }))
}

pub async fn update_budget(
    actor: Actor,
    settings: web::Data<SettingsService>,
    input: web::Json<BudgetUpdateInput>,
) -> Result<HttpResponse, AppError> {
    let updated = settings.update_budget(input.budget, actor.id()).await?;
    Ok(ApiResponse::success(BudgetResponse {
        budget: updated.quarterly_budget,
        updated_at: updated.quarterly_budget_updated_at,
        updated_by: updated.quarterly_budget_updated_by,
    }))
}
