use serde::Serialize;
use std::collections::BTreeMap;

/// A single day and the total it reached.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DayTotal {
    pub date: String, // yyyy-MM-dd, empty when no day beat zero
    pub total: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductTotal {
    pub product_id: String,
    pub quantity: u64,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakHour {
    pub hour: u32,
    pub transactions: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StaffVolume {
    pub staff_id: String,
    pub volume: u64,
}

/// Result of one aggregation pass.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub highest_volume_day: DayTotal,
    pub highest_value_day: DayTotal,
    pub most_sold_product: Option<ProductTotal>,
    pub peak_hour: PeakHour,
    pub top_staff_by_month: BTreeMap<String, StaffVolume>, // Key: "yyyy-MM"
    pub days_processed: usize,
    pub days_missing: usize,
}

impl Report {
    /// Product id for display, with the `None` sentinel when nothing sold.
    pub fn most_sold_product_id(&self) -> &str {
        self.most_sold_product
            .as_ref()
            .map(|p| p.product_id.as_str())
            .unwrap_or("None")
    }
}
