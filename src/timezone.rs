//! Resolves the local timezone used to timestamp new transactions.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name, e.g. "Asia/Jakarta".
///
/// Returns `None` if the name is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// The current wall-clock time at `offset`.
pub fn local_now(offset: UtcOffset) -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(offset);

    PrimitiveDateTime::new(now.date(), now.time())
}

#[cfg(test)]
mod timezone_tests {
    use time::UtcOffset;

    use super::get_local_offset;

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn jakarta_has_fixed_offset() {
        let offset = get_local_offset("Asia/Jakarta").unwrap();

        assert_eq!(offset.whole_hours(), 7);
    }

    #[test]
    fn unknown_timezone_is_none() {
        assert_eq!(get_local_offset("Mars/Olympus_Mons"), None);
    }
}
