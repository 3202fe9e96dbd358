// src/encode/weight/mod.rs

//! Subband weighting of wavelet coefficient planes.
//!
//! The encoder scales each subband by a per-channel weight before bit-plane
//! coding so that bands of different energy are coded on an equal footing;
//! the decoder divides the same weights back out after decoding.

pub mod config;
pub mod engine;
pub mod geometry;
pub mod policy;


// Re-export commonly used types and functions
pub use config::{ChannelWeighting, TransformType, WeightMode, WeightingConfig};
pub use engine::{Direction, EngineState, WeightingEngine, weight_forward, weight_inverse};
pub use geometry::{
    SubbandGeometry, SubbandId, SubbandKind, SubbandRegion, max_levels, subband_boundaries,
    subband_count,
};
