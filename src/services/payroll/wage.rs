/// Weekly hours paid at the base rate before overtime starts.
pub const OVERTIME_THRESHOLD_HOURS: f64 = 40.0;
pub const OVERTIME_MULTIPLIER: f64 = 1.5;

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WageBreakdown {
    pub base_pay: f64,
    pub overtime_pay: f64,
    pub gross: f64,
}

impl WageBreakdown {
    /// Splits `hours` at the weekly threshold. Callers pass non-negative
    /// hours and rate.
    pub fn compute(hours: f64, rate: f64) -> Self {
        let base_hours = hours.min(OVERTIME_THRESHOLD_HOURS);
        let overtime_hours = (hours - OVERTIME_THRESHOLD_HOURS).max(0.0);

        let base_pay = base_hours * rate;
        let overtime_pay = overtime_hours * rate * OVERTIME_MULTIPLIER;

        Self {
            base_pay: round2(base_pay),
            overtime_pay: round2(overtime_pay),
            gross: round2(base_pay + overtime_pay),
        }
    }
}
