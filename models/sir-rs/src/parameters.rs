use serde::{Deserialize, Serialize};

use crate::error::OutbreakError;
use crate::output::Compartments;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub population: u64,
    pub initial_infected: u64,
    pub r0: f64,
    /// γ, the fraction of the infected compartment that recovers each day.
    pub recovery_rate: f64,
    pub days: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            population: 1_000_000,
            initial_infected: 10,
            r0: 2.5,
            recovery_rate: 0.1,
            days: 30,
        }
    }
}

impl Parameters {
    /// Range checks that must pass before the parameters are handed to the
    /// simulator, which itself assumes valid input.
    pub fn validate(&self) -> Result<(), OutbreakError> {
        if self.population == 0 {
            return Err(OutbreakError::invalid("population", "must be positive"));
        }
        if self.initial_infected == 0 {
            return Err(OutbreakError::invalid("initial_infected", "must be positive"));
        }
        if self.initial_infected > self.population {
            return Err(OutbreakError::invalid(
                "initial_infected",
                format!(
                    "{} exceeds the population of {}",
                    self.initial_infected, self.population
                ),
            ));
        }
        if !(self.r0.is_finite() && self.r0 > 0.0) {
            return Err(OutbreakError::invalid(
                "r0",
                format!("{} is not a positive number", self.r0),
            ));
        }
        if !(self.recovery_rate > 0.0 && self.recovery_rate <= 1.0) {
            return Err(OutbreakError::invalid(
                "recovery_rate",
                format!("{} is outside (0, 1]", self.recovery_rate),
            ));
        }
        if self.days == 0 {
            return Err(OutbreakError::invalid("days", "must be positive"));
        }
        Ok(())
    }

    /// Transmission rate β = R0 × γ.
    pub fn beta(&self) -> f64 {
        self.r0 * self.recovery_rate
    }

    pub fn initial_state(&self) -> Compartments {
        Compartments {
            susceptible: self.population as f64 - self.initial_infected as f64,
            infected: self.initial_infected as f64,
            recovered: 0.0,
        }
    }
}

fn default_prediction_days() -> usize {
    7
}

/// Everything a single run reads from its input document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(flatten)]
    pub parameters: Parameters,
    #[serde(default = "default_prediction_days")]
    pub prediction_days: usize,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        ScenarioInput {
            parameters: Parameters::default(),
            prediction_days: default_prediction_days(),
        }
    }
}

impl ScenarioInput {
    pub fn validate(&self) -> Result<(), OutbreakError> {
        self.parameters.validate()?;
        if self.prediction_days == 0 {
            return Err(OutbreakError::invalid("prediction_days", "must be positive"));
        }
        Ok(())
    }
}
