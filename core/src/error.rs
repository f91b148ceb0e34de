use chrono::NaiveDate;
use thiserror::Error;

/// Why a timestamp could not yield its date, month and hour keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp '{0}' is too short, expected yyyy-MM-ddTHH:mm:ss")]
    TooShort(String),
    #[error("timestamp '{0}' has no numeric hour at offset 11")]
    InvalidHour(String),
    #[error("hour {hour} in timestamp '{timestamp}' is outside 0-23")]
    HourOutOfRange { timestamp: String, hour: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("malformed record for {day} (staff {staff_id}): {source}")]
    MalformedRecord {
        day: NaiveDate,
        staff_id: String,
        #[source]
        source: TimestampError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty record line")]
    Empty,
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("invalid quantity '{quantity}' for product '{product}'")]
    InvalidQuantity { product: String, quantity: String },
    #[error("invalid sales amount '{0}'")]
    InvalidAmount(String),
}
