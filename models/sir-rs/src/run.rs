use chrono::NaiveDate;
use runner::Environment;

use crate::{
    cache::ModelCache, error::OutbreakError, parameters::ScenarioInput, summary::RunSummary,
};

pub const TRAJECTORY_FILE: &str = "sir_output.csv";
pub const FORECAST_FILE: &str = "forecast_output.csv";
pub const SUMMARY_FILE: &str = "summary.json";

/// Validates the run's input, simulates and forecasts it, and writes the
/// trajectory, the dated forecast and the run summary to the environment's
/// output. Forecast dates start the day after `generated_on`.
pub fn run_scenario(
    env: &Environment<ScenarioInput>,
    generated_on: NaiveDate,
) -> Result<RunSummary, OutbreakError> {
    let input = env.input.unwrap_or_default();
    input.validate()?;

    let parameters = &input.parameters;
    log::info!(
        "Population: {}, Initial Infected: {}, β: {:.4}, γ: {:.4}",
        parameters.population,
        parameters.initial_infected,
        parameters.beta(),
        parameters.recovery_rate
    );

    let mut cache = ModelCache::default();
    let trajectory = cache.trajectory(parameters).clone();
    let forecast = cache.forecast(parameters, input.prediction_days)?.clone();

    env.write_records(TRAJECTORY_FILE, trajectory.rows())?;
    env.write_records(FORECAST_FILE, forecast.dated(generated_on))?;

    let summary = RunSummary::new(
        env.fingerprint()?,
        parameters,
        &trajectory,
        &forecast,
        generated_on,
    );
    summary.log_numeric_drift();
    env.write(SUMMARY_FILE, &serde_json::to_vec_pretty(&summary)?)?;
    log::info!(
        "Simulated {} days, forecast {} days (trend slope {:.3})",
        parameters.days,
        forecast.len(),
        summary.trend.slope
    );
    Ok(summary)
}
