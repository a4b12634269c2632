//! .NET tick conversions.
//!
//! The game runs on Unity, so every wire timestamp is a .NET
//! `DateTime.Ticks` value: 100-nanosecond intervals since 0001-01-01. The
//! static cloud feeds also take the current time in ticks as a
//! cache-busting query parameter.

use chrono::{DateTime, TimeZone, Utc};

/// .NET ticks per millisecond.
pub const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Tick count at the Unix epoch (1970-01-01).
pub const TICKS_AT_UNIX_EPOCH: i64 = 621_355_968_000_000_000;

/// Convert a UTC time to .NET ticks.
pub fn datetime_to_ticks(datetime: DateTime<Utc>) -> i64 {
    datetime.timestamp_millis() * TICKS_PER_MILLISECOND + TICKS_AT_UNIX_EPOCH
}

/// Convert .NET ticks to a UTC time, if representable.
pub fn ticks_to_datetime(ticks: i64) -> Option<DateTime<Utc>> {
    let millis = (ticks - TICKS_AT_UNIX_EPOCH) / TICKS_PER_MILLISECOND;
    Utc.timestamp_millis_opt(millis).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tick_value_round_trips() {
        // 637841386679615130 ticks is 2022-03-29 08:17:47 UTC.
        let datetime = ticks_to_datetime(637_841_386_679_615_130).unwrap();
        assert_eq!(datetime.timestamp(), 1_648_541_867);

        let back = datetime_to_ticks(datetime);
        // Sub-millisecond precision is lost in the round trip.
        assert!((back - 637_841_386_679_615_130).abs() < TICKS_PER_MILLISECOND);
    }

    #[test]
    fn unix_epoch_maps_to_the_epoch_offset() {
        let epoch = Utc.timestamp_millis_opt(0).single().unwrap();
        assert_eq!(datetime_to_ticks(epoch), TICKS_AT_UNIX_EPOCH);
    }
}
