use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// A run of consecutive calendar days to report on.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesPeriod {
    pub start: NaiveDate,
    pub days: u32,
}

impl Default for SalesPeriod {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            days: 365,
        }
    }
}

impl SalesPeriod {
    pub fn new(start: NaiveDate, days: u32) -> Result<Self> {
        // The last yielded day is start + (days - 1)
        let last_offset = Duration::days(days.saturating_sub(1) as i64);
        if start.checked_add_signed(last_offset).is_none() {
            return Err(anyhow!("Period of {} days from {} is out of range", days, start));
        }
        Ok(Self { start, days })
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        std::iter::successors(Some(self.start), |d| d.succ_opt()).take(self.days as usize)
    }
}
