//! Timestamp parsing and millisecond normalization.

use chrono::{DateTime, Utc};

use crate::types::TimestampError;

/// Parses the textual timestamp carried by a workflow event.
pub trait TimestampParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<DateTime<Utc>, TimestampError>;
}

/// RFC 3339 date-time with explicit offset, normalized to UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc3339Parser;

impl TimestampParser for Rfc3339Parser {
    fn parse(&self, text: &str) -> Result<DateTime<Utc>, TimestampError> {
        if text.is_empty() {
            return Err(TimestampError::Empty);
        }
        let parsed = DateTime::parse_from_rfc3339(text)?;
        check_canonical(text.as_bytes())?;
        Ok(parsed.with_timezone(&Utc))
    }
}

/// Reject the forms chrono tolerates beyond RFC 3339 `date-time`.
///
/// Only called on text chrono already parsed, so the fixed-width date and time
/// fields are present and ASCII.
fn check_canonical(bytes: &[u8]) -> Result<(), TimestampError> {
    if bytes.get(10) != Some(&b'T') {
        return Err(TimestampError::NonCanonical("date and time must be separated by 'T'"));
    }
    if bytes.get(17..19) == Some(b"60".as_slice()) {
        return Err(TimestampError::NonCanonical("leap second"));
    }
    let offset_ok = match bytes {
        [.., b'Z'] => true,
        [.., sign, h1, h2, b':', m1, m2] => {
            matches!(sign, b'+' | b'-')
                && [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
        }
        _ => false,
    };
    if !offset_ok {
        return Err(TimestampError::NonCanonical("offset must be 'Z' or ±hh:mm"));
    }
    Ok(())
}

/// Whole milliseconds since the Unix epoch.
///
/// Integer division of the nanosecond count, truncating toward zero. Before the
/// epoch this differs from `DateTime::timestamp_millis`, which floors.
pub fn unix_millis_truncated(instant: &DateTime<Utc>) -> i64 {
    let nanos = i128::from(instant.timestamp()) * 1_000_000_000
        + i128::from(instant.timestamp_subsec_nanos());
    // |nanos / 10^6| <= |seconds| * 1000 + 999, always within i64
    (nanos / 1_000_000) as i64
}
