use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    pub enum EmployeeStatus {
        Active => "active",
        Disabled => "disabled",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub pay_rate: BigDecimal, // NUMERIC(10,2)
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Hourly pay rate as used by the wage calculator. Negative rates are
    /// rejected upstream; anything unrepresentable falls back to zero.
    pub fn hourly_rate(&self) -> f64 {
        self.pay_rate.to_f64().unwrap_or(0.0).max(0.0)
    }
}
