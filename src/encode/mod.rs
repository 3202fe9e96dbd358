pub mod weight;

// Re-export commonly used weighting functionality
pub use weight::*;

// Re-export error types for convenience
pub use crate::utils::error::{Result, WeightError};
