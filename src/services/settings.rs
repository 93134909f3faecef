use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};
use moka::future::Cache;
use uuid::Uuid;

use crate::database::PayrollStore;
use crate::database::models::{Currency, SystemSettings};
use crate::error::AppError;

pub const SUPPORTED_CURRENCIES: &[Currency] = &[
    Currency { code: "USD", name: "United States Dollar" },
    Currency { code: "EUR", name: "Euro" },
    Currency { code: "GBP", name: "British Pound Sterling" },
    Currency { code: "JPY", name: "Japanese Yen" },
    Currency { code: "CAD", name: "Canadian Dollar" },
    Currency { code: "AUD", name: "Australian Dollar" },
    Currency { code: "CHF", name: "Swiss Franc" },
    Currency { code: "CNY", name: "Chinese Yuan" },
    Currency { code: "INR", name: "Indian Rupee" },
    Currency { code: "BRL", name: "Brazilian Real" },
    Currency { code: "MXN", name: "Mexican Peso" },
    Currency { code: "ZAR", name: "South African Rand" },
    Currency { code: "KES", name: "Kenyan Shilling" },
    Currency { code: "NGN", name: "Nigerian Naira" },
    Currency { code: "GHS", name: "Ghanaian Cedi" },
    Currency { code: "SGD", name: "Singapore Dollar" },
    Currency { code: "HKD", name: "Hong Kong Dollar" },
    Currency { code: "KRW", name: "South Korean Won" },
    Currency { code: "SEK", name: "Swedish Krona" },
    Currency { code: "NOK", name: "Norwegian Krone" },
    Currency { code: "DKK", name: "Danish Krone" },
    Currency { code: "NZD", name: "New Zealand Dollar" },
    Currency { code: "AED", name: "United Arab Emirates Dirham" },
    Currency { code: "SAR", name: "Saudi Riyal" },
    Currency { code: "TRY", name: "Turkish Lira" },
    Currency { code: "PKR", name: "Pakistani Rupee" },
    Currency { code: "BDT", name: "Bangladeshi Taka" },
    Currency { code: "PLN", name: "Polish Zloty" },
    Currency { code: "CZK", name: "Czech Koruna" },
    Currency { code: "HUF", name: "Hungarian Forint" },
    Currency { code: "ILS", name: "Israeli New Shekel" },
    Currency { code: "EGP", name: "Egyptian Pound" },
];

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolves an IANA zone name such as `America/New_York`. `UTC` and `Z`
/// are accepted in any case.
pub fn parse_timezone(value: &str) -> Option<Tz> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("utc") || value.eq_ignore_ascii_case("z") {
        return Some(Tz::UTC);
    }
    value.parse::<Tz>().ok()
}

/// Zone names containing `search` (case-insensitive), sorted. A zero
/// `limit` returns every match.
pub fn list_timezones(search: Option<&str>, limit: usize) -> Vec<&'static str> {
    let query = search.map(str::to_lowercase).filter(|q| !q.is_empty());
    let mut zones: Vec<&'static str> = TZ_VARIANTS
        .iter()
        .map(|tz| tz.name())
        .filter(|name| query.as_ref().is_none_or(|q| name.to_lowercase().contains(q)))
        .collect();
    zones.sort_unstable();
    if limit > 0 {
        zones.truncate(limit);
    }
    zones
}

fn normalize_currency(code: &str) -> Result<String, AppError> {
    let normalized = code.trim().to_uppercase();
    if SUPPORTED_CURRENCIES.iter().any(|c| c.code == normalized) {
        Ok(normalized)
    } else {
        Err(AppError::validation(format!("Unsupported currency: {}", code)))
    }
}

/// Currencies whose code or name contains `search`, sorted by code. A zero
/// `limit` returns every match.
pub fn list_currencies(search: Option<&str>, limit: usize) -> Vec<Currency> {
    let query = search.map(str::to_lowercase).filter(|q| !q.is_empty());
    let mut currencies: Vec<Currency> = SUPPORTED_CURRENCIES
        .iter()
        .filter(|c| {
            query.as_ref().is_none_or(|q| {
                c.code.to_lowercase().contains(q) || c.name.to_lowercase().contains(q)
            })
        })
        .copied()
        .collect();
    currencies.sort_by_key(|c| c.code);
    if limit > 0 {
        currencies.truncate(limit);
    }
    currencies
}

/// Organisation settings backed by the single settings row, with the row
/// cached in memory between updates.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn PayrollStore>,
    clock: Arc<dyn Clock>,
    cache: Cache<(), SystemSettings>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn PayrollStore>, clock: Arc<dyn Clock>) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self {
            store,
            clock,
            cache,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Loads the settings row, creating it with defaults on first use.
    pub async fn get(&self) -> Result<SystemSettings, AppError> {
        if let Some(settings) = self.cache.get(&()).await {
            return Ok(settings);
        }

        let settings = match self.store.get_settings().await? {
            Some(settings) => settings,
            None => {
                log::info!("No system settings stored yet, writing defaults");
                let settings = SystemSettings::defaults(self.now());
                self.store.save_settings(&settings).await?;
                settings
            }
        };

        self.cache.insert((), settings.clone()).await;
        Ok(settings)
    }

    /// Today's date in the configured timezone.
    pub async fn current_date(&self) -> Result<NaiveDate, AppError> {
        let settings = self.get().await?;
        let Some(tz) = parse_timezone(&settings.timezone) else {
            log::error!("Stored timezone {:?} is not a known zone", settings.timezone);
            return Err(AppError::internal_server_error_message(format!(
                "Stored timezone {} is not a known zone",
                settings.timezone
            )));
        };

        Ok(self.now().with_timezone(&tz).date_naive())
    }

    pub async fn update_timezone(
        &self,
        timezone: &str,
        updated_by: Uuid,
    ) -> Result<SystemSettings, AppError> {
        let Some(tz) = parse_timezone(timezone) else {
            return Err(AppError::validation(format!(
                "Unsupported timezone: {}",
                timezone
            )));
        };

        let mut settings = self.get().await?;
        settings.timezone = tz.name().to_string();
        settings.timezone_updated_by = Some(updated_by);
        settings.timezone_updated_at = self.now();
        self.save(settings).await
    }

    pub async fn update_currency(
        &self,
        currency: &str,
        updated_by: Uuid,
    ) -> Result<SystemSettings, AppError> {
        let code = normalize_currency(currency)?;

        let mut settings = self.get().await?;
        settings.currency = code;
        settings.currency_updated_by = Some(updated_by);
        settings.currency_updated_at = self.now();
        self.save(settings).await
    }

    pub async fn update_budget(
        &self,
        budget: f64,
        updated_by: Uuid,
    ) -> Result<SystemSettings, AppError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(AppError::validation("Budget must be non-negative"));
        }

        let mut settings = self.get().await?;
        settings.quarterly_budget = Some(budget);
        settings.quarterly_budget_updated_by = Some(updated_by);
        settings.quarterly_budget_updated_at = Some(self.now());
        self.save(settings).await
    }

    async fn save(&self, settings: SystemSettings) -> Result<SystemSettings, AppError> {
        self.store.save_settings(&settings).await?;
        self.cache.insert((), settings.clone()).await;
        Ok(settings)
    }
}
