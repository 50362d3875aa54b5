use chrono::NaiveDate;
use nalgebra::DVector;
use serde::Serialize;

use crate::error::OutbreakError;

/// Ordinary least-squares line through `(day index, value)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fits every point of `series` with equal weight, using the index as
    /// the independent variable.
    pub fn fit(series: &[f64]) -> Result<LinearTrend, OutbreakError> {
        let n = series.len();
        if n < 2 {
            return Err(OutbreakError::DegenerateSeries { len: n });
        }
        let x = DVector::from_iterator(n, (0..n).map(|i| i as f64));
        let y = DVector::from_column_slice(series);
        let (x_mean, y_mean) = (x.mean(), y.mean());
        let x_centered = x.add_scalar(-x_mean);
        let y_centered = y.add_scalar(-y_mean);

        let slope = x_centered.dot(&y_centered) / x_centered.norm_squared();
        let intercept = y_mean - slope * x_mean;
        Ok(LinearTrend { slope, intercept })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// A forecast value labelled with its calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatedPrediction {
    pub date: NaiveDate,
    pub predicted_infections: f64,
}

/// Trend extrapolation of a series past its last point.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    trend: LinearTrend,
    first_index: usize,
    values: Vec<f64>,
}

impl Forecast {
    pub fn trend(&self) -> LinearTrend {
        self.trend
    }

    /// Series index of the first forecast value, i.e. the length of the
    /// fitted series.
    pub fn first_index(&self) -> usize {
        self.first_index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_negative(&self) -> bool {
        self.values.iter().any(|&v| v < 0.0)
    }

    /// Pairs the values with consecutive dates, the first one being the day
    /// after `generated_on`.
    pub fn dated(&self, generated_on: NaiveDate) -> Vec<DatedPrediction> {
        generated_on
            .iter_days()
            .skip(1)
            .zip(&self.values)
            .map(|(date, &predicted_infections)| DatedPrediction {
                date,
                predicted_infections,
            })
            .collect()
    }
}

/// Fits a linear trend to `series` and evaluates it at the `horizon` indices
/// following the last point. The extrapolation is naive: it ignores the
/// curvature of an epidemic and may go negative.
pub fn predict(series: &[f64], horizon: usize) -> Result<Forecast, OutbreakError> {
    if horizon == 0 {
        return Err(OutbreakError::invalid("horizon", "must be at least one day"));
    }
    let trend = LinearTrend::fit(series)?;
    let first_index = series.len();
    let end = first_index.checked_add(horizon).ok_or_else(|| {
        OutbreakError::invalid("horizon", format!("{horizon} days is too far ahead"))
    })?;
    let values = (first_index..end)
        .map(|x| trend.evaluate(x as f64))
        .collect();
    Ok(Forecast {
        trend,
        first_index,
        values,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::{LinearTrend, predict};
    use crate::{error::OutbreakError, parameters::Parameters, sir::simulate};

    #[test]
    fn test_linear_series_continues_exactly() {
        let forecast = predict(&[10.0, 20.0, 30.0, 40.0], 3).unwrap();
        assert_eq!(forecast.first_index(), 4);
        assert_eq!(forecast.len(), 3);
        for (value, expected) in forecast.values().iter().zip([50.0, 60.0, 70.0]) {
            assert_abs_diff_eq!(*value, expected, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(forecast.trend().slope, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(forecast.trend().intercept, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_least_squares_fit() {
        // y = 1, 3, 2, 5: slope 1.1, intercept 1.1
        let trend = LinearTrend::fit(&[1.0, 3.0, 2.0, 5.0]).unwrap();
        assert_abs_diff_eq!(trend.slope, 1.1, epsilon = 1e-12);
        assert_abs_diff_eq!(trend.intercept, 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_two_points_is_enough() {
        let forecast = predict(&[4.0, 1.0], 2).unwrap();
        assert_abs_diff_eq!(forecast.values()[0], -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(forecast.values()[1], -5.0, epsilon = 1e-12);
        assert!(forecast.has_negative());
    }

    #[test]
    fn test_degenerate_series() {
        assert!(matches!(
            predict(&[], 7),
            Err(OutbreakError::DegenerateSeries { len: 0 })
        ));
        assert!(matches!(
            predict(&[12.0], 7),
            Err(OutbreakError::DegenerateSeries { len: 1 })
        ));
    }

    #[test]
    fn test_zero_horizon_is_rejected() {
        assert!(matches!(
            predict(&[1.0, 2.0], 0),
            Err(OutbreakError::InvalidParameter { name: "horizon", .. })
        ));
    }

    #[test]
    fn test_horizon_past_last_index_is_rejected() {
        assert!(matches!(
            predict(&[1.0, 2.0], usize::MAX - 1),
            Err(OutbreakError::InvalidParameter { name: "horizon", .. })
        ));
    }

    #[test]
    fn test_forecast_of_simulated_outbreak() {
        let trajectory = simulate(&Parameters::default());
        let forecast = predict(trajectory.infected(), 7).unwrap();
        assert_eq!(forecast.len(), 7);
        assert_eq!(forecast.first_index(), 31);

        let slope = forecast.trend().slope;
        assert!(slope > 0.0);
        for pair in forecast.values().windows(2) {
            assert_eq!(pair[1] > pair[0], slope > 0.0);
        }

        let again = predict(trajectory.infected(), 7).unwrap();
        assert_eq!(forecast, again);
    }

    #[test]
    fn test_dates_start_the_day_after_generation() {
        let forecast = predict(&[1.0, 2.0, 3.0], 3).unwrap();
        let generated_on = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let dated = forecast.dated(generated_on);
        let dates: Vec<NaiveDate> = dated.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ]
        );
        assert_abs_diff_eq!(dated[0].predicted_infections, 4.0, epsilon = 1e-12);
    }
}
