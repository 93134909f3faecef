use std::time::Duration;

use super::payroll::PayrollService;

/// Periodically runs pay generation. Generation is idempotent, so a tick
/// that overlaps an administrator's manual run is harmless.
pub struct PayrollScheduler {
    payroll: PayrollService,
    interval: Duration,
}

impl PayrollScheduler {
    pub fn new(payroll: PayrollService, interval: Duration) -> Self {
        Self { payroll, interval }
    }

    /// Runs one generation pass and logs the outcome.
    pub async fn run_once(&self) {
        match self.payroll.generate_if_needed().await {
            Ok(summary) if summary.generated > 0 => log::info!(
                "Scheduled pay generation created {} records across {} weeks",
                summary.generated,
                summary.weeks_processed
            ),
            Ok(summary) => log::debug!(
                "Scheduled pay generation found nothing new ({} weeks processed)",
                summary.weeks_processed
            ),
            Err(err) => log::error!("Scheduled pay generation failed: {}", err),
        }
    }

    /// Spawns the loop on the current actix runtime. A zero interval
    /// disables scheduling and returns `None`.
    pub fn start(self) -> Option<actix_web::rt::task::JoinHandle<()>> {
        if self.interval.is_zero() {
            log::info!("Pay generation scheduler disabled");
            return None;
        }

        log::info!(
            "Pay generation scheduler running every {}s",
            self.interval.as_secs()
        );
        Some(actix_web::rt::spawn(async move {
            let mut ticker = actix_web::rt::time::interval(self.interval);
            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        }))
    }
}
