//! Deterministic SIR outbreak simulation and linear trend forecasting.
//!
//! [`sir::simulate`] advances Susceptible, Infected and Recovered
//! compartments with daily Euler steps; [`forecast::predict`] fits a least
//! squares line to the infected series and extrapolates it. Both are pure
//! functions; [`cache::ModelCache`] memoizes them for callers that need it.

pub mod cache;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod output;
pub mod parameters;
pub mod run;
pub mod sir;
pub mod summary;

pub use error::OutbreakError;
