//! Pay computation pipeline: weekly hours from completed shifts, wages with
//! overtime, layered adjustments, the pending pool and the approval ledger.

use std::sync::Arc;

use crate::database::PayrollStore;
use crate::services::settings::SettingsService;

mod adjustments;
mod approval;
mod hours;
mod sync;
mod wage;
mod week;

pub use adjustments::{ResolvedAdjustments, resolve_adjustments};
pub use hours::hours_by_employee;
pub use wage::{OVERTIME_MULTIPLIER, OVERTIME_THRESHOLD_HOURS, WageBreakdown, round2};

#[derive(Clone)]
pub struct PayrollService {
    store: Arc<dyn PayrollStore>,
    settings: SettingsService,
}

impl PayrollService {
    pub fn new(store: Arc<dyn PayrollStore>, settings: SettingsService) -> Self {
        Self { store, settings }
    }
}
