use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organisation-wide settings. A single row exists; it is created with
/// defaults on first read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub timezone: String,
    pub timezone_updated_by: Option<Uuid>,
    pub timezone_updated_at: DateTime<Utc>,
    pub currency: String,
    pub currency_updated_by: Option<Uuid>,
    pub currency_updated_at: DateTime<Utc>,
    pub quarterly_budget: Option<f64>,
    pub quarterly_budget_updated_by: Option<Uuid>,
    pub quarterly_budget_updated_at: Option<DateTime<Utc>>,
}

impl SystemSettings {
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            timezone: "UTC".to_string(),
            timezone_updated_by: None,
            timezone_updated_at: now,
            currency: "USD".to_string(),
            currency_updated_by: None,
            currency_updated_at: now,
            quarterly_budget: None,
            quarterly_budget_updated_by: None,
            quarterly_budget_updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneUpdateInput {
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyUpdateInput {
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdateInput {
    pub budget: f64,
}
