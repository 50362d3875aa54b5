use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    forecast::{Forecast, LinearTrend},
    output::{Compartments, Trajectory},
    parameters::Parameters,
};

/// Drift above this fraction of the population is reported.
const CONSERVATION_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub fingerprint: String,
    pub parameters: Parameters,
    pub beta: f64,
    pub gamma: f64,
    pub peak_day: Option<usize>,
    pub peak_infected: Option<f64>,
    pub final_state: Option<Compartments>,
    pub max_conservation_error: f64,
    pub negative_compartments: bool,
    pub trend: LinearTrend,
    pub forecast_start: Option<NaiveDate>,
    pub negative_forecast: bool,
}

impl RunSummary {
    pub fn new(
        fingerprint: String,
        parameters: &Parameters,
        trajectory: &Trajectory,
        forecast: &Forecast,
        generated_on: NaiveDate,
    ) -> RunSummary {
        let peak = trajectory.peak();
        RunSummary {
            fingerprint,
            parameters: *parameters,
            beta: parameters.beta(),
            gamma: parameters.recovery_rate,
            peak_day: peak.map(|(day, _)| day),
            peak_infected: peak.map(|(_, infected)| infected),
            final_state: trajectory.final_state(),
            max_conservation_error: trajectory
                .max_conservation_error(parameters.population as f64),
            negative_compartments: trajectory.has_negative_compartment(),
            trend: forecast.trend(),
            forecast_start: generated_on.succ_opt(),
            negative_forecast: forecast.has_negative(),
        }
    }

    pub fn conservation_violated(&self) -> bool {
        self.max_conservation_error > CONSERVATION_TOLERANCE * self.parameters.population as f64
    }

    /// Logs the numeric artifacts of Euler integration and linear
    /// extrapolation. None of them are errors; the values are kept as-is.
    pub fn log_numeric_drift(&self) {
        if self.negative_compartments {
            log::warn!("At least one compartment went negative during the simulation");
        }
        if self.conservation_violated() {
            log::warn!(
                "S + I + R drifted from the population by up to {:.3}",
                self.max_conservation_error
            );
        }
        if self.negative_forecast {
            log::warn!("The linear forecast predicts negative infections");
        }
    }
}
