//! ---
//! wb_section: "04-simulation"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Per-item work cost for the simulated workloads."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::time::Duration;

use warbench_harness::ValidationError;

/// Burns a fixed amount of wall time for every processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPacer {
    per_item: Duration,
}

impl WorkPacer {
    pub fn fixed(per_item: Duration) -> Self {
        Self { per_item }
    }

    /// Higher levels process faster: `base / level`.
    pub fn level_scaled(base: Duration, level: i64) -> Result<Self, ValidationError> {
        let divisor = u32::try_from(level)
            .ok()
            .filter(|level| *level > 0)
            .ok_or_else(|| {
                ValidationError::invalid("player level", format!("must be positive, got {level}"))
            })?;
        Ok(Self::fixed(base / divisor))
    }

    pub fn per_item(&self) -> Duration {
        self.per_item
    }

    /// Sleep once per item, mirroring work done item by item.
    pub fn burn(&self, items: u64) {
        if self.per_item.is_zero() {
            return;
        }
        for _ in 0..items {
            std::thread::sleep(self.per_item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn scales_cost_by_level() {
        let pacer = WorkPacer::level_scaled(Duration::from_micros(100), 2).unwrap();
        assert_eq!(pacer.per_item(), Duration::from_micros(50));
    }

    #[test]
    fn rejects_non_positive_levels() {
        assert!(WorkPacer::level_scaled(Duration::from_micros(100), 0).is_err());
        let err = WorkPacer::level_scaled(Duration::from_micros(100), -4).unwrap_err();
        assert_eq!(err.to_string(), "invalid player level: must be positive, got -4");
    }

    #[test]
    fn burn_sleeps_at_least_the_total_cost() {
        let pacer = WorkPacer::fixed(Duration::from_micros(200));
        let started = Instant::now();
        pacer.burn(5);
        assert!(started.elapsed() >= Duration::from_millis(1));
    }
}
