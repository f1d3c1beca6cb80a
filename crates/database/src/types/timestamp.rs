//! Timestamp encoding shared by every table.
//!
//! Instants are stored as RFC 3339 text with a fixed microsecond fraction and a
//! `Z` suffix, so `ORDER BY` on the text column is chronological.

use chrono::{DateTime, Duration, DurationRound, SecondsFormat, Utc};

use super::{DatabaseError, DatabaseResult};

/// Current instant truncated to the stored precision.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(Duration::microseconds(1)).unwrap_or(now)
}

/// The current instant, or one tick past `previous` if the clock has not moved
/// beyond it. Keeps `updated_at` strictly increasing across mutations.
pub fn advance_past(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}

pub fn encode(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode(raw: &str) -> DatabaseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| DatabaseError::InvalidData(format!("invalid timestamp '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_fixed_width_and_round_trips() {
        let instant = now();
        let encoded = encode(&instant);

        assert_eq!(encoded.len(), "2025-01-01T00:00:00.000000Z".len());
        assert!(encoded.ends_with('Z'));
        assert_eq!(decode(&encoded).unwrap(), instant);
    }

    #[test]
    fn advance_past_moves_beyond_future_instants() {
        let future = now() + Duration::seconds(60);
        let advanced = advance_past(future);
        assert_eq!(advanced, future + Duration::microseconds(1));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode("yesterday"),
            Err(DatabaseError::InvalidData(_))
        ));
    }
}
