//! Fault injection for the in-memory store
//!
//! A [`FaultPlan`] makes in-process CAS calls behave like calls to a remote
//! cluster under stress:
//!
//! - `latency`: every CAS request sleeps this long before reaching the store
//! - `error_rate`: fraction of requests that time out without reaching the store
//! - `lost_ack_rate`: fraction of requests that reach the store (and may apply)
//!   but whose response is lost, so the client sees a timeout
//!
//! Lost acknowledgements are the interesting case: the client cannot tell an
//! applied update from one that never arrived.

use castest_core::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::time::Duration;

/// Timeout reported for injected failures
pub const INJECTED_TIMEOUT: Duration = Duration::from_secs(2);

/// Fault configuration for sessions opened by a [`MemoryConnector`](crate::MemoryConnector)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaultPlan {
    /// Probability in `[0, 1]` that a request times out before reaching the store
    pub error_rate: f64,
    /// Probability in `[0, 1]` that a response is lost after the store handled it
    pub lost_ack_rate: f64,
    /// Delay added to every CAS request
    #[serde(deserialize_with = "castest_core::duration::deserialize")]
    pub latency: Duration,
    /// RNG seed; sessions derive their own stream from it. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FaultPlan {
    fn default() -> Self {
        Self::none()
    }
}

impl FaultPlan {
    /// No faults, no latency
    pub fn none() -> Self {
        Self {
            error_rate: 0.0,
            lost_ack_rate: 0.0,
            latency: Duration::ZERO,
            seed: None,
        }
    }

    /// Whether this plan injects anything at all
    pub fn is_none(&self) -> bool {
        self.error_rate == 0.0 && self.lost_ack_rate == 0.0 && self.latency.is_zero()
    }

    /// Check that both rates are probabilities
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("error_rate", self.error_rate),
            ("lost_ack_rate", self.lost_ack_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn injector(&self, session_index: u64) -> FaultInjector {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(session_index)),
            None => StdRng::from_entropy(),
        };
        FaultInjector {
            plan: self.clone(),
            rng,
        }
    }
}

/// Per-session fault source
#[derive(Debug)]
pub(crate) struct FaultInjector {
    plan: FaultPlan,
    rng: StdRng,
}

impl FaultInjector {
    /// Apply latency, then decide whether the request is lost on the way in.
    pub(crate) fn before_request(&mut self) -> Result<()> {
        if !self.plan.latency.is_zero() {
            std::thread::sleep(self.plan.latency);
        }
        if self.plan.error_rate > 0.0 && self.rng.gen_bool(self.plan.error_rate) {
            return Err(Error::Timeout(INJECTED_TIMEOUT));
        }
        Ok(())
    }

    /// Decide whether the response to a handled request is lost.
    pub(crate) fn drop_ack(&mut self) -> bool {
        self.plan.lost_ack_rate > 0.0 && self.rng.gen_bool(self.plan.lost_ack_rate)
    }
}
