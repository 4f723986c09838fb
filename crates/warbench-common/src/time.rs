//! ---
//! wb_section: "01-core-functionality"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Shared primitives and utilities for the harness runtime."
//! wb_version: "v0.0.0-prealpha"
//! wb_owner: "tbd"
//! ---
use std::time::Duration;

pub const NANOS_PER_MILLI: u64 = 1_000_000;
pub const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Convert a duration into nanoseconds, saturating at `u64::MAX`.
pub fn duration_to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Whole milliseconds expressed in nanoseconds, saturating at `u64::MAX`.
pub fn millis_to_nanos(millis: u64) -> u64 {
    millis.saturating_mul(NANOS_PER_MILLI)
}

/// Nanoseconds rendered as fractional milliseconds for operator-facing messages.
pub fn nanos_to_millis_f64(nanos: u64) -> f64 {
    nanos as f64 / NANOS_PER_MILLI as f64
}

pub fn nanos_to_secs_f64(nanos: u64) -> f64 {
    nanos as f64 / NANOS_PER_SEC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_trip_through_units() {
        assert_eq!(millis_to_nanos(3), 3_000_000);
        assert_eq!(millis_to_nanos(u64::MAX), u64::MAX);
        assert_eq!(duration_to_nanos(Duration::from_micros(5)), 5_000);
        assert!((nanos_to_millis_f64(1_500_000) - 1.5).abs() < f64::EPSILON);
        assert!((nanos_to_secs_f64(250_000_000) - 0.25).abs() < f64::EPSILON);
    }
}
