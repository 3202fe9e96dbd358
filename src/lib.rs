//! Subband weighting for wavelet-based multispectral image compression.
//!
//! This crate implements the stage that sits between the wavelet transform and
//! the bit-plane encoder: every subband of every channel is scaled by a
//! per-channel weight on the encoder side, and the same weights are divided
//! back out on the decoder side.
//!
//! # Quick Start
//!
//! ```ignore
//! use subband_weighting::{ChannelWeighting, CoefficientVolume, WeightingConfig, WeightingEngine};
//!
//! // Three channels, integer transform, three decomposition levels
//! let config = WeightingConfig::uniform(3, ChannelWeighting::integer(3));
//! let mut volume = CoefficientVolume::from_nested(transformed_planes)?;
//!
//! WeightingEngine::forward(config.clone()).run(&mut volume)?;
//! // ... bit-plane coding, transmission, decoding ...
//! WeightingEngine::inverse(config).run(&mut volume)?;
//! ```
//!
//! # Weighting modes
//!
//! - **Default (0)**: power-of-two weights for the integer transform, none otherwise
//! - **Custom (1)**: one caller-supplied weight per subband
//! - **Disabled (2)**: samples are left untouched
//!
//! # Features
//!
//! - **Optional parallelism**: enable the `rayon` feature to weight channels in parallel

pub mod encode;
pub mod image;
pub mod utils;

// Weighting API
pub use encode::weight::{
    ChannelWeighting, Direction, EngineState, TransformType, WeightMode, WeightingConfig,
    WeightingEngine, weight_forward, weight_inverse,
};

// Geometry
pub use encode::weight::{SubbandGeometry, SubbandId, SubbandKind, SubbandRegion};

// Coefficient containers
pub use image::coeff_volume::{CoeffPlane, CoefficientVolume};

// Error types
pub use utils::error::{ErrorKind, Result, WeightError};
