use std::collections::HashMap;

use crate::{
    error::OutbreakError,
    forecast::{Forecast, predict},
    output::Trajectory,
    parameters::Parameters,
    sir::simulate,
};

/// Hashable identity of a parameter tuple. Floats are compared by bit
/// pattern, so only bit-identical inputs share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ParameterKey {
    population: u64,
    initial_infected: u64,
    r0: u64,
    recovery_rate: u64,
    days: usize,
}

impl From<&Parameters> for ParameterKey {
    fn from(parameters: &Parameters) -> Self {
        ParameterKey {
            population: parameters.population,
            initial_infected: parameters.initial_infected,
            r0: parameters.r0.to_bits(),
            recovery_rate: parameters.recovery_rate.to_bits(),
            days: parameters.days,
        }
    }
}

/// Memoizes simulations and forecasts for callers that re-run the same
/// scenario. Results are identical to calling [`simulate`] and [`predict`]
/// directly.
#[derive(Debug, Default)]
pub struct ModelCache {
    trajectories: HashMap<ParameterKey, Trajectory>,
    forecasts: HashMap<(ParameterKey, usize), Forecast>,
    hits: usize,
    misses: usize,
}

impl ModelCache {
    pub fn trajectory(&mut self, parameters: &Parameters) -> &Trajectory {
        let key = ParameterKey::from(parameters);
        if self.trajectories.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            log::debug!("Simulating {parameters:?}");
            self.trajectories.insert(key, simulate(parameters));
        }
        &self.trajectories[&key]
    }

    /// Forecast of the infected series of the trajectory for `parameters`,
    /// reusing a cached trajectory when there is one.
    pub fn forecast(
        &mut self,
        parameters: &Parameters,
        horizon: usize,
    ) -> Result<&Forecast, OutbreakError> {
        let key = (ParameterKey::from(parameters), horizon);
        if self.forecasts.contains_key(&key) {
            self.hits += 1;
        } else {
            let forecast = predict(self.trajectory(parameters).infected(), horizon)?;
            self.misses += 1;
            self.forecasts.insert(key, forecast);
        }
        Ok(&self.forecasts[&key])
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
