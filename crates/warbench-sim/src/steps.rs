//! ---
//! wb_section: "04-simulation"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Scenario step bindings for the reference game workloads."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use std::sync::Arc;

use warbench_harness::{
    BenchmarkOutcome, PerItemBound, PerOperationBound, RequireState, Result, ScenarioState,
    StateKey, StepArgs, StepContext, StepError, StepRegistry,
};
use warbench_logging::wb_warn;

use crate::factory::WorkloadFactory;

/// Build a registry holding every game step.
pub fn game_registry(factory: Arc<WorkloadFactory>) -> Result<StepRegistry> {
    let mut registry = StepRegistry::new();
    register_game_steps(&mut registry, factory)?;
    Ok(registry)
}

pub fn register_game_steps(registry: &mut StepRegistry, factory: Arc<WorkloadFactory>) -> Result<()> {
    registry
        .given("the player has a level of {int}", |state, args, _| {
            Ok(state.with(StateKey::PlayerLevel, args.int(0)?))
        })?
        .given("the player is in the {string} area", |state, args, _| {
            Ok(state.with(StateKey::Area, args.text(0)?))
        })?
        .given("the player is moving at {word} speed", |state, args, _| {
            Ok(state.with(StateKey::PlayerSpeed, args.text(0)?))
        })?;

    let fight = Arc::clone(&factory);
    registry.when("the player fights {int} enemies", move |state, args, ctx| {
        let level = state.player_level().required("player level")?;
        let outcome = ctx
            .runner()
            .run_counted("enemies", args.int(0)?, |enemies| fight.fight(enemies, level))?;
        Ok(store_outcome(state, outcome, ctx))
    })?;

    for pattern in [
        "{int} guards spawn around the player",
        "{int} guard spawns near the player",
    ] {
        let guards = Arc::clone(&factory);
        registry.when(pattern, move |state, args, ctx| {
            let outcome = ctx
                .runner()
                .run_counted("guards", args.int(0)?, |count| guards.spawn_guards(count))?;
            Ok(store_outcome(state, outcome, ctx))
        })?;
    }

    let wall = factory;
    registry.when("the player hits a wall {int} time(s)", move |state, args, ctx| {
        let outcome = ctx
            .runner()
            .run_counted("hits", args.int(0)?, |hits| wall.hit_wall(hits))?;
        Ok(store_outcome(state, outcome, ctx))
    })?;

    registry
        .then(
            "the average time per enemy defeated should be less than {int} milliseconds",
            |state, args, _| {
                let bound = PerItemBound::new("average time per enemy", "numEnemies", non_negative(args, 0)?);
                check_per_item(state, &bound)
            },
        )?
        .then(
            "the average impact processing time should be less than {int} milliseconds",
            |state, args, _| {
                let bound = PerItemBound::new("average impact processing time", "numHits", non_negative(args, 0)?);
                check_per_item(state, &bound)
            },
        )?
        .then("the player reacts to all guards within {int} seconds", |state, args, _| {
            let bound = PerOperationBound::new("reaction to all guards", non_negative(args, 0)? as f64);
            let result = state.benchmark_result().required("benchmark result")?;
            bound.check(result)?;
            Ok(())
        })?
        .then(
            "all {fight|guard spawning|hit wall} operations should complete without error",
            |state, args, _| {
                let operation = args.text(0)?;
                let errors = state.error_set().required("benchmark errors")?;
                if errors.is_empty() {
                    return Ok(());
                }
                let first = errors.messages().into_iter().next().unwrap_or_default();
                Err(StepError::OperationsFailed {
                    operation: operation.to_owned(),
                    count: errors.len(),
                    dropped: errors.dropped,
                    first,
                })
            },
        )?;
    Ok(())
}

/// Record the benchmark outputs for the assertions that follow.
fn store_outcome(state: &ScenarioState, outcome: BenchmarkOutcome, ctx: &StepContext<'_>) -> ScenarioState {
    if let Some(err) = outcome.structural_error() {
        wb_warn!(
            context = ctx.log_context().with_workload(&outcome.label),
            "workload failed in {} of {} iterations, first error: {}",
            outcome.errors.failed_iterations,
            outcome.result.iterations,
            err
        );
    }
    state
        .with(StateKey::TargetCount, outcome.repetitions.get())
        .with(StateKey::BenchmarkResult, outcome.result)
        .with(StateKey::ErrorSet, outcome.errors)
}

fn check_per_item(state: &ScenarioState, bound: &PerItemBound) -> Result<()> {
    let result = state.benchmark_result().required("benchmark result")?;
    let target_count = state.target_count().required("target count")?;
    bound.check(result, target_count)?;
    Ok(())
}

fn non_negative(args: &StepArgs, index: usize) -> Result<u64> {
    let value = args.int(index)?;
    u64::try_from(value).map_err(|_| StepError::InvalidArgument {
        step: "threshold".to_owned(),
        index,
        reason: format!("bound must not be negative, got {value}"),
    })
}
