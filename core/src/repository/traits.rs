use crate::model::record::SalesRecord;
use anyhow::Result;
use chrono::NaiveDate;

pub trait RecordSource {
    fn load(&self, date: NaiveDate) -> Result<SalesRecord>;
}
