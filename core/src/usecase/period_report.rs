use crate::error::AnalyticsError;
use crate::model::record::DailyEntry;
use crate::repository::{RecordSource, SalesPeriod};
use crate::service::analytics_service::AnalyticsService;
use crate::service::dto::Report;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// A day whose record could not be loaded; it is left out of the report.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub date: NaiveDate,
    pub reason: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PeriodReport {
    pub period: SalesPeriod,
    pub report: Report,
    pub failures: Vec<LoadFailure>,
}

pub struct PeriodReportUseCase<'a, S: RecordSource> {
    source: &'a S,
    analytics: &'a AnalyticsService,
}

impl<'a, S: RecordSource> PeriodReportUseCase<'a, S> {
    pub fn new(source: &'a S, analytics: &'a AnalyticsService) -> Self {
        Self { source, analytics }
    }

    /// Loads every day of `period` and aggregates what could be read.
///
/// Unloadable days are returned in `failures`; reporting them is up to the caller.
    pub fn build(&self, period: &SalesPeriod) -> Result<PeriodReport, AnalyticsError> {
        let mut failures = Vec::new();

        // 1. Load, keeping one slot per day
        let entries: Vec<DailyEntry> = period
            .dates()
            .map(|date| match self.source.load(date) {
                Ok(record) => DailyEntry::present(date, record),
                Err(e) => {
                    let reason = format!("{:#}", e);
                    debug!(%date, %reason, "skipping day");
                    failures.push(LoadFailure { date, reason });
                    DailyEntry::missing(date)
                }
            })
            .collect();

        // 2. Aggregate
        let report = self.analytics.run(&entries)?;
        info!(
            start = %period.start,
            days = period.days,
            processed = report.days_processed,
            missing = report.days_missing,
            "period report built"
        );

        Ok(PeriodReport {
            period: *period,
            report,
            failures,
        })
    }
}
