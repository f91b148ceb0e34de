use crate::error::TimestampError;

pub const HOURS_PER_DAY: usize = 24;

/// Grouping keys derived from a `yyyy-MM-ddTHH:mm:ss` timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampKeys<'a> {
    pub date: &'a str,
    pub month: &'a str,
    pub hour: usize,
}

impl<'a> TimestampKeys<'a> {
    pub fn parse(timestamp: &'a str) -> Result<Self, TimestampError> {
        let date = timestamp
            .get(..10)
            .ok_or_else(|| TimestampError::TooShort(timestamp.to_string()))?;
        let month = date
            .get(..7)
            .ok_or_else(|| TimestampError::TooShort(timestamp.to_string()))?;
        let hour = parse_hour(timestamp)?;

        Ok(Self { date, month, hour })
    }
}

fn parse_hour(timestamp: &str) -> Result<usize, TimestampError> {
    let digits = timestamp
        .get(11..13)
        .ok_or_else(|| TimestampError::TooShort(timestamp.to_string()))?;

    // str::parse would also accept a sign ("+9")
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::InvalidHour(timestamp.to_string()));
    }
    let hour: usize = digits
        .parse()
        .map_err(|_| TimestampError::InvalidHour(timestamp.to_string()))?;

    if hour >= HOURS_PER_DAY {
        return Err(TimestampError::HourOutOfRange {
            timestamp: timestamp.to_string(),
            hour: hour as u32,
        });
    }
    Ok(hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        let keys = TimestampKeys::parse("2025-03-14T09:26:53").unwrap();
        assert_eq!(keys.date, "2025-03-14");
        assert_eq!(keys.month, "2025-03");
        assert_eq!(keys.hour, 9);
    }

    #[test]
    fn test_parse_minimal_length() {
        // Minutes and seconds are never read
        let keys = TimestampKeys::parse("2025-12-31T23").unwrap();
        assert_eq!(keys.month, "2025-12");
        assert_eq!(keys.hour, 23);
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(TimestampKeys::parse("2025-03"), Err(TimestampError::TooShort(_))));
        assert!(matches!(TimestampKeys::parse("2025-03-14"), Err(TimestampError::TooShort(_))));
        assert!(matches!(TimestampKeys::parse("2025-03-14T9"), Err(TimestampError::TooShort(_))));
        assert!(matches!(TimestampKeys::parse(""), Err(TimestampError::TooShort(_))));
    }

    #[test]
    fn test_parse_invalid_hour() {
        assert!(matches!(TimestampKeys::parse("2025-03-14Tab:00:00"), Err(TimestampError::InvalidHour(_))));
        assert!(matches!(TimestampKeys::parse("2025-03-14T+9:00:00"), Err(TimestampError::InvalidHour(_))));
        assert_eq!(
            TimestampKeys::parse("2025-03-14T24:00:00"),
            Err(TimestampError::HourOutOfRange { timestamp: "2025-03-14T24:00:00".to_string(), hour: 24 })
        );
    }

    #[test]
    fn test_parse_multibyte_does_not_panic() {
        assert!(TimestampKeys::parse("2025-03-1é9:00:00").is_err());
        assert!(TimestampKeys::parse("2025-0é-14T09:00:00").is_err());
    }
}
