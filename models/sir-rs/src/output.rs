use serde::Serialize;

/// Sizes of the three compartments at one point in time. Sizes are
/// continuous, not head counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Compartments {
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
}

impl Compartments {
    pub fn total(&self) -> f64 {
        self.susceptible + self.infected + self.recovered
    }

    pub fn has_negative(&self) -> bool {
        self.susceptible < 0.0 || self.infected < 0.0 || self.recovered < 0.0
    }
}

/// One row of the trajectory table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryRow {
    pub day: usize,
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
}

/// Daily compartment sizes of one simulation, day 0 being the initial
/// state. Read-only once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    susceptible: Vec<f64>,
    infected: Vec<f64>,
    recovered: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn with_capacity(len: usize) -> Trajectory {
        Trajectory {
            susceptible: Vec::with_capacity(len),
            infected: Vec::with_capacity(len),
            recovered: Vec::with_capacity(len),
        }
    }

    pub(crate) fn push(&mut self, state: Compartments) {
        self.susceptible.push(state.susceptible);
        self.infected.push(state.infected);
        self.recovered.push(state.recovered);
    }

    pub fn len(&self) -> usize {
        self.infected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infected.is_empty()
    }

    pub fn susceptible(&self) -> &[f64] {
        &self.susceptible
    }

    pub fn infected(&self) -> &[f64] {
        &self.infected
    }

    pub fn recovered(&self) -> &[f64] {
        &self.recovered
    }

    pub fn get(&self, day: usize) -> Option<Compartments> {
        Some(Compartments {
            susceptible: *self.susceptible.get(day)?,
            infected: *self.infected.get(day)?,
            recovered: *self.recovered.get(day)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Compartments> + '_ {
        self.susceptible
            .iter()
            .zip(&self.infected)
            .zip(&self.recovered)
            .map(|((&susceptible, &infected), &recovered)| Compartments {
                susceptible,
                infected,
                recovered,
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = TrajectoryRow> + '_ {
        self.iter().enumerate().map(|(day, state)| TrajectoryRow {
            day,
            susceptible: state.susceptible,
            infected: state.infected,
            recovered: state.recovered,
        })
    }

    pub fn final_state(&self) -> Option<Compartments> {
        self.len().checked_sub(1).and_then(|day| self.get(day))
    }

    /// Day and size of the largest infected compartment. Ties resolve to the
    /// earliest day.
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.infected
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (day, infected)| match best {
                Some((_, max)) if max >= infected => best,
                _ => Some((day, infected)),
            })
    }

    /// Largest |S + I + R - population| over all days.
    pub fn max_conservation_error(&self, population: f64) -> f64 {
        self.iter()
            .map(|state| (state.total() - population).abs())
            .fold(0.0, f64::max)
    }

    pub fn has_negative_compartment(&self) -> bool {
        self.iter().any(|state| state.has_negative())
    }
}
