use crate::error::AnalyticsError;
use crate::model::record::{DailyEntry, SalesRecord};
use crate::service::dto::{DayTotal, PeakHour, ProductTotal, Report, StaffVolume};
use crate::timestamp::{TimestampKeys, HOURS_PER_DAY};
use std::collections::BTreeMap;
use tracing::debug;

/// Computes the period [`Report`] from per-day sales records.
///
/// The service holds no state; every call to [`run`](Self::run) folds into
/// its own accumulators, so one instance can be shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, entries: &[DailyEntry]) -> Result<Report, AnalyticsError> {
        let tally = entries
            .iter()
            .try_fold(Tally::default(), |mut tally, entry| {
                match &entry.record {
                    Some(record) => tally.add(entry, record)?,
                    None => tally.days_missing += 1,
                }
                Ok::<_, AnalyticsError>(tally)
            })?;

        debug!(
            processed = tally.days_processed,
            missing = tally.days_missing,
            products = tally.product_totals.len(),
            months = tally.monthly_staff_volume.len(),
            "aggregation pass complete"
        );

        Ok(tally.finish())
    }
}

// Ordered maps make ties resolve to the smallest key.
#[derive(Default)]
struct Tally {
    highest_volume: DayTotal,
    highest_value: DayTotal,
    product_totals: BTreeMap<String, u64>,
    monthly_staff_volume: BTreeMap<String, BTreeMap<String, u64>>,
    hourly_transactions: [u32; HOURS_PER_DAY],
    days_processed: usize,
    days_missing: usize,
}

impl Tally {
    fn add(&mut self, entry: &DailyEntry, record: &SalesRecord) -> Result<(), AnalyticsError> {
        let keys = TimestampKeys::parse(&record.timestamp).map_err(|source| {
            AnalyticsError::MalformedRecord {
                day: entry.date,
                staff_id: record.staff_id.clone(),
                source,
            }
        })?;

        let volume = record.daily_volume();
        let value = record.sales_amount;

        // Strict comparison: the first day to reach a maximum keeps it.
        if volume > self.highest_volume.total {
            self.highest_volume = DayTotal { date: keys.date.to_string(), total: volume };
        }
        if value > self.highest_value.total {
            self.highest_value = DayTotal { date: keys.date.to_string(), total: value };
        }

        for (product, &quantity) in &record.products_sold {
            *self.product_totals.entry(product.clone()).or_default() += quantity as u64;
        }

        *self
            .monthly_staff_volume
            .entry(keys.month.to_string())
            .or_default()
            .entry(record.staff_id.clone())
            .or_default() += volume;

        self.hourly_transactions[keys.hour] += 1;
        self.days_processed += 1;
        Ok(())
    }

    fn finish(self) -> Report {
        let most_sold_product = max_by_value(&self.product_totals).map(|(id, quantity)| ProductTotal {
            product_id: id.clone(),
            quantity,
        });

        let top_staff_by_month = self
            .monthly_staff_volume
            .iter()
            .filter_map(|(month, staff)| {
                max_by_value(staff).map(|(id, volume)| {
                    (month.clone(), StaffVolume { staff_id: id.clone(), volume })
                })
            })
            .collect();

        Report {
            highest_volume_day: self.highest_volume,
            highest_value_day: self.highest_value,
            most_sold_product,
            peak_hour: peak_hour(&self.hourly_transactions),
            top_staff_by_month,
            days_processed: self.days_processed,
            days_missing: self.days_missing,
        }
    }
}

/// First key (in map order) holding the largest value.
fn max_by_value(totals: &BTreeMap<String, u64>) -> Option<(&String, u64)> {
    totals.iter().fold(None, |best, (key, &total)| match best {
        Some((_, best_total)) if total <= best_total => best,
        _ => Some((key, total)),
    })
}

fn peak_hour(counts: &[u32; HOURS_PER_DAY]) -> PeakHour {
    let mut peak = 0;
    for hour in 1..HOURS_PER_DAY {
        if counts[hour] > counts[peak] {
            peak = hour;
        }
    }
    PeakHour {
        hour: peak as u32,
        transactions: counts[peak],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimestampError;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(d as i64 - 1)
    }

    fn record(staff: &str, timestamp: &str, products: &[(&str, u32)], amount: u64) -> SalesRecord {
        let products: HashMap<String, u32> =
            products.iter().map(|(p, q)| (p.to_string(), *q)).collect();
        SalesRecord::new(staff, timestamp, products, amount)
    }

    fn entry(d: u32, record: SalesRecord) -> DailyEntry {
        DailyEntry::present(day(d), record)
    }

    #[test]
    fn test_two_day_example() {
        let entries = vec![
            entry(1, record("S1", "2025-01-01T09:00:00", &[("P1", 5)], 100)),
            entry(2, record("S2", "2025-01-02T14:00:00", &[("P1", 3), ("P2", 10)], 50)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();

        assert_eq!(report.highest_volume_day, DayTotal { date: "2025-01-02".to_string(), total: 13 });
        assert_eq!(report.highest_value_day, DayTotal { date: "2025-01-01".to_string(), total: 100 });
        assert_eq!(
            report.most_sold_product,
            Some(ProductTotal { product_id: "P2".to_string(), quantity: 10 })
        );
        assert_eq!(report.peak_hour, PeakHour { hour: 9, transactions: 1 });
        assert_eq!(
            report.top_staff_by_month.get("2025-01"),
            Some(&StaffVolume { staff_id: "S2".to_string(), volume: 13 })
        );
        assert_eq!(report.days_processed, 2);
        assert_eq!(report.days_missing, 0);
    }

    #[test]
    fn test_empty_input() {
        let report = AnalyticsService::new().run(&[]).unwrap();
        assert_eq!(report, Report::default());
        assert_eq!(report.most_sold_product_id(), "None");
        assert!(report.top_staff_by_month.is_empty());
        assert_eq!(report.peak_hour.hour, 0);
    }

    #[test]
    fn test_missing_days_are_skipped() {
        let entries = vec![
            DailyEntry::missing(day(1)),
            entry(2, record("S1", "2025-01-02T10:00:00", &[("P1", 4)], 40)),
            DailyEntry::missing(day(3)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.days_processed, 1);
        assert_eq!(report.days_missing, 2);
        assert_eq!(report.peak_hour, PeakHour { hour: 10, transactions: 1 });
        assert_eq!(report.highest_volume_day.date, "2025-01-02");
    }

    #[test]
    fn test_first_day_wins_volume_and_value_ties() {
        let entries = vec![
            entry(1, record("S1", "2025-01-01T09:00:00", &[("P1", 7)], 70)),
            entry(2, record("S2", "2025-01-02T09:00:00", &[("P2", 7)], 70)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.highest_volume_day.date, "2025-01-01");
        assert_eq!(report.highest_value_day.date, "2025-01-01");
    }

    #[test]
    fn test_date_comes_from_timestamp_not_slot() {
        let entries = vec![entry(1, record("S1", "2025-02-11T09:00:00", &[("P1", 1)], 5))];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.highest_volume_day.date, "2025-02-11");
        assert!(report.top_staff_by_month.contains_key("2025-02"));
    }

    #[test]
    fn test_zero_days_never_become_highest() {
        let entries = vec![entry(1, record("S1", "2025-01-01T09:00:00", &[], 0))];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.highest_volume_day, DayTotal::default());
        assert_eq!(report.highest_value_day, DayTotal::default());
        assert_eq!(report.most_sold_product, None);
        // The staff member still shows up for the month with zero volume
        assert_eq!(
            report.top_staff_by_month.get("2025-01"),
            Some(&StaffVolume { staff_id: "S1".to_string(), volume: 0 })
        );
    }

    #[test]
    fn test_peak_hour_counts_transactions_not_volume() {
        let entries = vec![
            entry(1, record("S1", "2025-01-01T18:00:00", &[("P1", 100)], 900)),
            entry(2, record("S1", "2025-01-02T08:00:00", &[("P1", 1)], 1)),
            entry(3, record("S1", "2025-01-03T08:30:00", &[("P1", 1)], 1)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.peak_hour, PeakHour { hour: 8, transactions: 2 });
    }

    #[test]
    fn test_peak_hour_tie_picks_lowest_hour() {
        let entries = vec![
            entry(1, record("S1", "2025-01-01T23:00:00", &[], 0)),
            entry(2, record("S1", "2025-01-02T05:00:00", &[], 0)),
            entry(3, record("S1", "2025-01-03T17:00:00", &[], 0)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.peak_hour.hour, 5);
    }

    #[test]
    fn test_product_totals_across_days() {
        let entries = vec![
            entry(1, record("S1", "2025-01-01T09:00:00", &[("A", 6), ("B", 2)], 1)),
            entry(2, record("S1", "2025-01-02T09:00:00", &[("B", 3), ("C", 4)], 1)),
            entry(3, record("S1", "2025-01-03T09:00:00", &[("B", 2)], 1)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(
            report.most_sold_product,
            Some(ProductTotal { product_id: "B".to_string(), quantity: 7 })
        );
    }

    #[test]
    fn test_product_tie_picks_smallest_id() {
        let entries = vec![entry(1, record("S1", "2025-01-01T09:00:00", &[("Z9", 4), ("A1", 4), ("M5", 4)], 1))];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.most_sold_product_id(), "A1");
    }

    #[test]
    fn test_top_staff_per_month() {
        let entries = vec![
            entry(1, record("S1", "2025-01-30T09:00:00", &[("P", 5)], 1)),
            entry(2, record("S2", "2025-01-31T09:00:00", &[("P", 3)], 1)),
            entry(3, record("S2", "2025-01-31T10:00:00", &[("P", 3)], 1)),
            entry(4, record("S1", "2025-02-01T09:00:00", &[("P", 1)], 1)),
            entry(5, record("S3", "2025-02-02T09:00:00", &[("P", 9)], 1)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();
        let months: Vec<_> = report.top_staff_by_month.keys().cloned().collect();
        assert_eq!(months, vec!["2025-01", "2025-02"]);
        assert_eq!(
            report.top_staff_by_month["2025-01"],
            StaffVolume { staff_id: "S2".to_string(), volume: 6 }
        );
        assert_eq!(
            report.top_staff_by_month["2025-02"],
            StaffVolume { staff_id: "S3".to_string(), volume: 9 }
        );
    }

    #[test]
    fn test_staff_tie_picks_smallest_id() {
        let entries = vec![
            entry(1, record("S9", "2025-03-01T09:00:00", &[("P", 5)], 1)),
            entry(2, record("S1", "2025-03-02T09:00:00", &[("P", 5)], 1)),
        ];

        let report = AnalyticsService::new().run(&entries).unwrap();
        assert_eq!(report.top_staff_by_month["2025-03"].staff_id, "S1");
    }

    #[test]
    fn test_malformed_timestamp_aborts() {
        let entries = vec![
            entry(1, record("S1", "2025-01-01T09:00:00", &[("P", 5)], 1)),
            entry(2, record("S7", "2025-01", &[("P", 5)], 1)),
        ];

        let err = AnalyticsService::new().run(&entries).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::MalformedRecord {
                day: day(2),
                staff_id: "S7".to_string(),
                source: TimestampError::TooShort("2025-01".to_string()),
            }
        );
        assert!(err.to_string().contains("2025-01-02"));
    }

    #[test]
    fn test_run_is_idempotent() {
        let entries = vec![
            entry(1, record("S1", "2025-01-01T09:00:00", &[("P1", 5), ("P2", 5)], 100)),
            DailyEntry::missing(day(2)),
            entry(3, record("S2", "2025-01-03T14:00:00", &[("P2", 1), ("P3", 5)], 50)),
        ];

        let engine = AnalyticsService::new();
        assert_eq!(engine.run(&entries).unwrap(), engine.run(&entries).unwrap());
    }
}
