//! ---
//! wb_section: "04-simulation"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Injectable failure draws for the simulated workloads."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use rand::prelude::*;
use warbench_common::config::SimulationConfig;
use warbench_harness::ValidationError;

/// Decides whether one workload call, or one item inside it, fails.
pub trait FailureSource: Send {
    fn should_fail(&mut self) -> bool;

    /// `false` when no draw can ever fail, letting per-item loops be skipped.
    fn can_fail(&self) -> bool {
        true
    }
}

impl<F: FailureSource + ?Sized> FailureSource for Box<F> {
    fn should_fail(&mut self) -> bool {
        (**self).should_fail()
    }

    fn can_fail(&self) -> bool {
        (**self).can_fail()
    }
}

/// Fails when a uniform draw in `0..one_in` equals `sentinel`.
#[derive(Debug, Clone)]
pub struct SeededFailure {
    rng: StdRng,
    one_in: u32,
    sentinel: u32,
}

impl SeededFailure {
    pub fn new(seed: u64, one_in: u32, sentinel: u32) -> Result<Self, ValidationError> {
        if one_in == 0 {
            return Err(ValidationError::invalid(
                "failure_one_in",
                "must be at least 1",
            ));
        }
        if sentinel >= one_in {
            return Err(ValidationError::invalid(
                "failure_sentinel",
                format!("{sentinel} is never drawn from 0..{one_in}"),
            ));
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            one_in,
            sentinel,
        })
    }

    pub fn from_config(config: &SimulationConfig, seed: u64) -> Result<Self, ValidationError> {
        Self::new(seed, config.failure_one_in, config.failure_sentinel)
    }

    /// Per-item draws over `0..item_failure_one_in`.
    pub fn items_from_config(config: &SimulationConfig, seed: u64) -> Result<Self, ValidationError> {
        Self::new(seed, config.item_failure_one_in, config.failure_sentinel)
    }
}

impl FailureSource for SeededFailure {
    fn should_fail(&mut self) -> bool {
        self.rng.gen_range(0..self.one_in) == self.sentinel
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FailureSource for NeverFail {
    fn should_fail(&mut self) -> bool {
        false
    }

    fn can_fail(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FailureSource for AlwaysFail {
    fn should_fail(&mut self) -> bool {
        true
    }
}
