use serde::Serialize;
use chrono::NaiveDate;
use std::collections::HashMap;

/// One day's sales as handed over by the input side.
///
/// Quantities and the amount are unsigned, so the non-negative
/// preconditions hold by construction.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub staff_id: String,
    pub timestamp: String, // yyyy-MM-ddTHH:mm:ss
    pub products_sold: HashMap<String, u32>,
    pub sales_amount: u64,
}

impl SalesRecord {
    pub fn new(
        staff_id: impl Into<String>,
        timestamp: impl Into<String>,
        products_sold: HashMap<String, u32>,
        sales_amount: u64,
    ) -> Self {
        Self {
            staff_id: staff_id.into(),
            timestamp: timestamp.into(),
            products_sold,
            sales_amount,
        }
    }

    pub fn daily_volume(&self) -> u64 {
        self.products_sold.values().map(|&q| q as u64).sum()
    }
}

/// A slot in the ordered per-day input. `record` is `None` when that
/// day's data could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub record: Option<SalesRecord>,
}

impl DailyEntry {
    pub fn present(date: NaiveDate, record: SalesRecord) -> Self {
        Self { date, record: Some(record) }
    }

    pub fn missing(date: NaiveDate) -> Self {
        Self { date, record: None }
    }
}
