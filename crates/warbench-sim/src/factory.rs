//! ---
//! wb_section: "04-simulation"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Builds reference workloads with their pacing and failure sources."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use parking_lot::Mutex;
use rand::prelude::*;
use tracing::debug;
use warbench_common::config::SimulationConfig;
use warbench_harness::{Repetitions, ValidationError};

use crate::failure::{AlwaysFail, FailureSource, NeverFail, SeededFailure};
use crate::pacer::WorkPacer;
use crate::workloads::{FightEnemies, HitWall, SpawnGuards, WorkloadCosts};

/// How workloads built by a [`WorkloadFactory`] fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Random draws seeded from the simulation config.
    Seeded,
    Never,
    Always,
}

/// Shared by every step binding; hands each workload its own failure streams.
///
/// A workload gets two sources: one drawn per call, whose failure becomes the
/// run's structural error, and one drawn per item, whose failures go to the
/// error aggregator.
#[derive(Debug)]
pub struct WorkloadFactory {
    config: SimulationConfig,
    costs: WorkloadCosts,
    mode: FailureMode,
    item_mode: FailureMode,
    seeds: Mutex<StdRng>,
}

impl WorkloadFactory {
    pub fn new(config: SimulationConfig) -> Self {
        let mode = if config.inject_failures {
            FailureMode::Seeded
        } else {
            FailureMode::Never
        };
        Self {
            seeds: Mutex::new(StdRng::seed_from_u64(config.seed)),
            config,
            costs: WorkloadCosts::default(),
            mode,
            item_mode: mode,
        }
    }

    pub fn with_costs(mut self, costs: WorkloadCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Sets how whole calls fail. Per-item draws stay seeded under
    /// [`FailureMode::Seeded`] and are disabled otherwise; override them with
    /// [`WorkloadFactory::with_item_failure_mode`].
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self.item_mode = match mode {
            FailureMode::Seeded => FailureMode::Seeded,
            FailureMode::Never | FailureMode::Always => FailureMode::Never,
        };
        self
    }

    pub fn with_item_failure_mode(mut self, mode: FailureMode) -> Self {
        self.item_mode = mode;
        self
    }

    pub fn costs(&self) -> WorkloadCosts {
        self.costs
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.mode
    }

    pub fn item_failure_mode(&self) -> FailureMode {
        self.item_mode
    }

    pub fn fight(&self, enemies: Repetitions, player_level: i64) -> Result<FightEnemies, ValidationError> {
        let fight = FightEnemies::new(enemies, player_level, self.costs.enemy_base, self.failure_source()?)?;
        Ok(fight.with_item_failures(self.item_failure_source()?))
    }

    pub fn spawn_guards(&self, guards: Repetitions) -> Result<SpawnGuards, ValidationError> {
        Ok(SpawnGuards::new(
            guards,
            WorkPacer::fixed(self.costs.guard),
            self.failure_source()?,
        )
        .with_item_failures(self.item_failure_source()?))
    }

    pub fn hit_wall(&self, hits: Repetitions) -> Result<HitWall, ValidationError> {
        Ok(HitWall::new(
            hits,
            WorkPacer::fixed(self.costs.wall_hit),
            self.failure_source()?,
        )
        .with_item_failures(self.item_failure_source()?))
    }

    fn failure_source(&self) -> Result<Box<dyn FailureSource>, ValidationError> {
        Ok(match self.mode {
            FailureMode::Never => Box::new(NeverFail),
            FailureMode::Always => Box::new(AlwaysFail),
            FailureMode::Seeded => {
                let seed = self.seeds.lock().next_u64();
                debug!(seed, "seeding workload failure source");
                Box::new(SeededFailure::from_config(&self.config, seed)?)
            }
        })
    }

    fn item_failure_source(&self) -> Result<Box<dyn FailureSource>, ValidationError> {
        Ok(match self.item_mode {
            FailureMode::Never => Box::new(NeverFail),
            FailureMode::Always => Box::new(AlwaysFail),
            FailureMode::Seeded => {
                let seed = self.seeds.lock().next_u64();
                debug!(seed, "seeding per-item failure source");
                Box::new(SeededFailure::items_from_config(&self.config, seed)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use warbench_harness::{ErrorAggregator, Workload};

    #[test]
    fn disabled_injection_never_fails() {
        let config = SimulationConfig {
            inject_failures: false,
            ..SimulationConfig::default()
        };
        let factory = WorkloadFactory::new(config).with_costs(WorkloadCosts::uniform(Duration::ZERO));
        assert_eq!(factory.failure_mode(), FailureMode::Never);
        let mut wall = factory.hit_wall(Repetitions::new("hits", 3).unwrap()).unwrap();
        let mut sink = ErrorAggregator::with_capacity("hit wall", 1);
        assert!((0..100).all(|_| wall.run(&mut sink).is_ok()));
    }

    #[test]
    fn always_mode_fails_every_call() {
        let factory = WorkloadFactory::new(SimulationConfig::default())
            .with_costs(WorkloadCosts::uniform(Duration::ZERO))
            .with_failure_mode(FailureMode::Always);
        let mut guards = factory.spawn_guards(Repetitions::new("guards", 2).unwrap()).unwrap();
        let mut sink = ErrorAggregator::with_capacity("guard spawning", 1);
        assert!(guards.run(&mut sink).is_err());
    }

    #[test]
    fn call_mode_disables_item_draws_unless_seeded() {
        let factory = WorkloadFactory::new(SimulationConfig::default());
        assert_eq!(factory.item_failure_mode(), FailureMode::Seeded);
        let factory = factory.with_failure_mode(FailureMode::Always);
        assert_eq!(factory.item_failure_mode(), FailureMode::Never);

        let factory = factory
            .with_costs(WorkloadCosts::uniform(Duration::ZERO))
            .with_failure_mode(FailureMode::Never)
            .with_item_failure_mode(FailureMode::Always);
        let mut fight = factory.fight(Repetitions::new("enemies", 3).unwrap(), 2).unwrap();
        let mut sink = ErrorAggregator::with_capacity("fight", 8);
        assert!(fight.run(&mut sink).is_ok());
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn fight_validates_level() {
        let factory = WorkloadFactory::new(SimulationConfig::default());
        assert!(factory.fight(Repetitions::new("enemies", 1).unwrap(), -1).is_err());
        assert!(factory.fight(Repetitions::new("enemies", 1).unwrap(), 5).is_ok());
    }

    #[test]
    fn seeded_factories_are_reproducible() {
        let config = SimulationConfig {
            failure_one_in: 2,
            failure_sentinel: 0,
            ..SimulationConfig::default()
        };
        let draws = |factory: &WorkloadFactory| -> Vec<bool> {
            let mut sink = ErrorAggregator::with_capacity("hit wall", 1);
            let mut wall = factory.hit_wall(Repetitions::new("hits", 1).unwrap()).unwrap();
            (0..32).map(|_| wall.run(&mut sink).is_err()).collect()
        };
        let zero = WorkloadCosts::uniform(Duration::ZERO);
        let first = WorkloadFactory::new(config.clone()).with_costs(zero);
        let second = WorkloadFactory::new(config).with_costs(zero);
        assert_eq!(draws(&first), draws(&second));
    }
}
