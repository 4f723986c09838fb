//! ---
//! wb_section: "04-simulation"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Simulated game workloads and their scenario step bindings."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
//! Each workload burns a fixed per-item cost. A call may fail as a whole,
//! and individual items may fail into the error sink, each according to its
//! own [`FailureSource`].

pub mod factory;
pub mod failure;
pub mod pacer;
pub mod steps;
pub mod workloads;

pub use factory::{FailureMode, WorkloadFactory};
pub use failure::{AlwaysFail, FailureSource, NeverFail, SeededFailure};
pub use pacer::WorkPacer;
pub use steps::{game_registry, register_game_steps};
pub use workloads::{
    FightEnemies, HitWall, SpawnGuards, WorkloadCosts, FIGHT_LABEL, GUARD_SPAWNING_LABEL,
    HIT_WALL_LABEL,
};
