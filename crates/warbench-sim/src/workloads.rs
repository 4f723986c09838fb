//! ---
//! wb_section: "04-simulation"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Reference game workloads: fighting, guard spawning and wall collisions."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::time::Duration;

use tracing::trace;
use warbench_harness::{ErrorSink, Repetitions, ValidationError, Workload, WorkloadError};

use crate::failure::{FailureSource, NeverFail};
use crate::pacer::WorkPacer;

pub const FIGHT_LABEL: &str = "fight";
pub const GUARD_SPAWNING_LABEL: &str = "guard spawning";
pub const HIT_WALL_LABEL: &str = "hit wall";

/// Per-item costs of the reference workloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadCosts {
    /// Cost of one enemy at level 1; divided by the player level.
    pub enemy_base: Duration,
    pub guard: Duration,
    pub wall_hit: Duration,
}

impl Default for WorkloadCosts {
    fn default() -> Self {
        Self {
            enemy_base: Duration::from_micros(100),
            guard: Duration::from_micros(50),
            wall_hit: Duration::from_micros(20),
        }
    }
}

impl WorkloadCosts {
    /// Same cost for every item of every workload, independent of level.
    pub fn uniform(per_item: Duration) -> Self {
        Self {
            enemy_base: per_item,
            guard: per_item,
            wall_hit: per_item,
        }
    }
}

/// One draw per item; every hit goes to `sink` as a sub-operation error.
fn record_item_failures(
    source: &mut dyn FailureSource,
    sink: &mut dyn ErrorSink,
    items: u64,
    describe: impl Fn(u64) -> String,
) {
    if !source.can_fail() {
        return;
    }
    for item in 1..=items {
        if source.should_fail() {
            sink.record(WorkloadError::new(describe(item)));
        }
    }
}

pub struct FightEnemies {
    enemies: Repetitions,
    player_level: i64,
    pacer: WorkPacer,
    failure: Box<dyn FailureSource>,
    item_failure: Box<dyn FailureSource>,
}

impl FightEnemies {
    /// `base_cost` is divided by `player_level`, which must be positive.
    pub fn new(
        enemies: Repetitions,
        player_level: i64,
        base_cost: Duration,
        failure: Box<dyn FailureSource>,
    ) -> Result<Self, ValidationError> {
        let pacer = WorkPacer::level_scaled(base_cost, player_level)?;
        Ok(Self::with_pacer(enemies, player_level, pacer, failure))
    }

    /// Use `pacer` as is; `player_level` is informational.
    pub fn with_pacer(
        enemies: Repetitions,
        player_level: i64,
        pacer: WorkPacer,
        failure: Box<dyn FailureSource>,
    ) -> Self {
        Self {
            enemies,
            player_level,
            pacer,
            failure,
            item_failure: Box::new(NeverFail),
        }
    }

    /// Draw once per enemy; hits are recorded as sub-operation errors.
    pub fn with_item_failures(mut self, source: Box<dyn FailureSource>) -> Self {
        self.item_failure = source;
        self
    }

    pub fn player_level(&self) -> i64 {
        self.player_level
    }
}

impl Workload for FightEnemies {
    fn label(&self) -> &str {
        FIGHT_LABEL
    }

    fn repetitions(&self) -> Repetitions {
        self.enemies
    }

    fn run(&mut self, sink: &mut dyn ErrorSink) -> Result<(), WorkloadError> {
        self.pacer.burn(self.enemies.get());
        let total = self.enemies;
        record_item_failures(&mut *self.item_failure, sink, total.get(), |enemy| {
            format!("enemy {enemy} of {total} fled the battlefield before it was defeated")
        });
        if self.failure.should_fail() {
            return Err(WorkloadError::new(format!(
                "a mystical force interrupted the battle after {} enemies in one iteration",
                self.enemies
            )));
        }
        trace!(enemies = self.enemies.get(), player_level = self.player_level, "fought enemies");
        Ok(())
    }
}

pub struct SpawnGuards {
    guards: Repetitions,
    pacer: WorkPacer,
    failure: Box<dyn FailureSource>,
    item_failure: Box<dyn FailureSource>,
}

impl SpawnGuards {
    pub fn new(guards: Repetitions, pacer: WorkPacer, failure: Box<dyn FailureSource>) -> Self {
        Self {
            guards,
            pacer,
            failure,
            item_failure: Box::new(NeverFail),
        }
    }

    pub fn with_item_failures(mut self, source: Box<dyn FailureSource>) -> Self {
        self.item_failure = source;
        self
    }
}

impl Workload for SpawnGuards {
    fn label(&self) -> &str {
        GUARD_SPAWNING_LABEL
    }

    fn repetitions(&self) -> Repetitions {
        self.guards
    }

    fn run(&mut self, sink: &mut dyn ErrorSink) -> Result<(), WorkloadError> {
        self.pacer.burn(self.guards.get());
        let total = self.guards;
        record_item_failures(&mut *self.item_failure, sink, total.get(), |guard| {
            format!("guard {guard} of {total} spawned inside a wall")
        });
        if self.failure.should_fail() {
            return Err(WorkloadError::new(format!(
                "a magical anomaly prevented {} guards from spawning correctly in one iteration",
                self.guards
            )));
        }
        trace!(guards = self.guards.get(), "spawned guards");
        Ok(())
    }
}

pub struct HitWall {
    hits: Repetitions,
    pacer: WorkPacer,
    failure: Box<dyn FailureSource>,
    item_failure: Box<dyn FailureSource>,
}

impl HitWall {
    pub fn new(hits: Repetitions, pacer: WorkPacer, failure: Box<dyn FailureSource>) -> Self {
        Self {
            hits,
            pacer,
            failure,
            item_failure: Box::new(NeverFail),
        }
    }

    pub fn with_item_failures(mut self, source: Box<dyn FailureSource>) -> Self {
        self.item_failure = source;
        self
    }
}

impl Workload for HitWall {
    fn label(&self) -> &str {
        HIT_WALL_LABEL
    }

    fn repetitions(&self) -> Repetitions {
        self.hits
    }

    fn run(&mut self, sink: &mut dyn ErrorSink) -> Result<(), WorkloadError> {
        self.pacer.burn(self.hits.get());
        let total = self.hits;
        record_item_failures(&mut *self.item_failure, sink, total.get(), |hit| {
            format!("hit {hit} of {total} passed through the wall")
        });
        if self.failure.should_fail() {
            return Err(WorkloadError::new(format!(
                "the wall phased out of existence during collision for {} hits in one iteration",
                self.hits
            )));
        }
        trace!(hits = self.hits.get(), "processed wall hits");
        Ok(())
    }
}
