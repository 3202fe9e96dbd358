//! Coefficient containers shared by the weighting stages.

pub mod coeff_volume;

pub use coeff_volume::{CoeffPlane, CoefficientVolume};
