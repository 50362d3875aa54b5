use crate::{
    output::{Compartments, Trajectory},
    parameters::Parameters,
};

/// Deterministic SIR model advanced with explicit Euler steps of one day.
///
/// The model performs no validation. Compartments are neither clamped to be
/// non-negative nor renormalized to `population`, so large `beta` can push
/// them below zero or let the total drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirModel {
    pub beta: f64,
    pub gamma: f64,
    pub population: f64,
}

impl SirModel {
    pub fn new(beta: f64, gamma: f64, population: f64) -> SirModel {
        SirModel {
            beta,
            gamma,
            population,
        }
    }

    pub fn from_parameters(parameters: &Parameters) -> SirModel {
        SirModel::new(
            parameters.beta(),
            parameters.recovery_rate,
            parameters.population as f64,
        )
    }

    pub fn step(&self, state: Compartments) -> Compartments {
        let Compartments {
            susceptible: s,
            infected: i,
            recovered: r,
        } = state;
        let infections = self.beta * s * i / self.population;
        let recoveries = self.gamma * i;
        let ds = -infections;
        let di = infections - recoveries;
        let dr = recoveries;
        Compartments {
            susceptible: s + ds,
            infected: i + di,
            recovered: r + dr,
        }
    }

    /// Returns `days + 1` states, starting with `initial`.
    pub fn run(&self, initial: Compartments, days: usize) -> Trajectory {
        let mut trajectory = Trajectory::with_capacity(days + 1);
        let mut state = initial;
        trajectory.push(state);
        for _ in 0..days {
            state = self.step(state);
            trajectory.push(state);
        }
        trajectory
    }
}

pub fn simulate(parameters: &Parameters) -> Trajectory {
    SirModel::from_parameters(parameters).run(parameters.initial_state(), parameters.days)
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::{SirModel, simulate};
    use crate::{output::Compartments, parameters::Parameters};

    #[test]
    fn test_trajectory_length_and_initial_state() {
        let parameters = Parameters {
            population: 5_000,
            initial_infected: 3,
            days: 45,
            ..Parameters::default()
        };
        let trajectory = simulate(&parameters);
        assert_eq!(trajectory.len(), 46);
        assert_eq!(
            trajectory.get(0),
            Some(Compartments {
                susceptible: 4_997.0,
                infected: 3.0,
                recovered: 0.0,
            })
        );
    }

    #[test]
    fn test_first_step_of_default_scenario() {
        let parameters = Parameters::default();
        let trajectory = simulate(&parameters);
        assert_eq!(trajectory.len(), 31);
        assert_eq!(trajectory.infected()[0], 10.0);
        assert_abs_diff_eq!(trajectory.infected()[1], 11.4998, epsilon = 1e-3);
        assert_abs_diff_eq!(trajectory.infected()[1], 11.499975, epsilon = 1e-9);
        assert_abs_diff_eq!(trajectory.susceptible()[1], 999_987.500025, epsilon = 1e-6);
        assert_abs_diff_eq!(trajectory.recovered()[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let parameters = Parameters {
            r0: 3.7,
            recovery_rate: 0.23,
            days: 200,
            ..Parameters::default()
        };
        let first = simulate(&parameters);
        let second = simulate(&parameters);
        let bits = |values: &[f64]| values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(first.susceptible()), bits(second.susceptible()));
        assert_eq!(bits(first.infected()), bits(second.infected()));
        assert_eq!(bits(first.recovered()), bits(second.recovered()));
    }

    #[test]
    fn test_outbreak_grows_when_r0_above_one() {
        let parameters = Parameters {
            population: 10_000,
            initial_infected: 1,
            r0: 1.5,
            recovery_rate: 0.01,
            days: 5,
        };
        let trajectory = simulate(&parameters);
        assert!(trajectory.infected()[1] > trajectory.infected()[0]);
    }

    #[test]
    fn test_approximate_conservation() {
        let parameters = Parameters {
            days: 120,
            ..Parameters::default()
        };
        let population = parameters.population as f64;
        let trajectory = simulate(&parameters);
        assert!(trajectory.max_conservation_error(population) < 0.01 * population);
    }

    #[test]
    fn test_no_clamping_with_extreme_rates() {
        // With beta far above 1 a single Euler step removes more than the
        // whole susceptible compartment.
        let model = SirModel::new(20.0, 1.0, 100.0);
        let initial = Compartments {
            susceptible: 50.0,
            infected: 50.0,
            recovered: 0.0,
        };
        let trajectory = model.run(initial, 1);
        assert_eq!(trajectory.susceptible()[1], 50.0 - 500.0);
        assert!(trajectory.has_negative_compartment());
    }

    #[test]
    fn test_unvalidated_parameters_run_without_wrapping() {
        let parameters = Parameters {
            population: 5,
            initial_infected: 10,
            days: 3,
            ..Parameters::default()
        };
        let trajectory = simulate(&parameters);
        assert_eq!(trajectory.len(), 4);
        assert_eq!(trajectory.susceptible()[0], -5.0);
        assert!(trajectory.has_negative_compartment());
    }

    #[test]
    fn test_epidemic_peaks_and_declines() {
        let parameters = Parameters {
            days: 365,
            ..Parameters::default()
        };
        let trajectory = simulate(&parameters);
        let (peak_day, peak) = trajectory.peak().unwrap();
        assert!(peak_day > 0 && peak_day < 365);
        assert!(trajectory.final_state().unwrap().infected < peak);
        // Final size for R0 = 2.5 is roughly 89% of the population.
        let recovered_fraction = trajectory.final_state().unwrap().recovered / 1_000_000.0;
        assert!(f64::abs(recovered_fraction - 0.893) < 0.05);
    }
}
