// src/encode/weight/engine.rs

use super::config::{ChannelWeighting, WeightingConfig};
use super::geometry::SubbandGeometry;
use crate::image::coeff_volume::{CoeffPlane, CoefficientVolume};
use crate::utils::error::{Result, WeightError};
use crate::utils::log::{debug, trace};
use std::fmt;

/// Which way the weights are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Encoder side: multiply every subband by its weight
    Forward,
    /// Decoder side: divide every subband by its weight
    Inverse,
}

impl Direction {
    #[inline]
    fn apply(self, sample: f32, weight: f32) -> f32 {
        match self {
            Direction::Forward => sample * weight,
            Direction::Inverse => sample / weight,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Inverse => write!(f, "inverse"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unconfigured,
    Configured,
    /// At least one volume has been weighted with the current configuration
    Executed,
}

/// Applies or removes subband weights over a whole coefficient volume.
///
/// The engine keeps only its configuration between runs; volumes are borrowed
/// for the duration of [`WeightingEngine::run`] and mutated in place.
///
/// ```ignore
/// let config = WeightingConfig::uniform(3, ChannelWeighting::integer(3));
/// WeightingEngine::forward(config.clone()).run(&mut volume)?;
/// // ... entropy coding and decoding ...
/// WeightingEngine::inverse(config).run(&mut volume)?;
/// ```
#[derive(Debug, Clone)]
pub struct WeightingEngine {
    direction: Direction,
    config: Option<WeightingConfig>,
    state: EngineState,
}

impl WeightingEngine {
    /// Creates an engine without a configuration; call `configure` before `run`.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            config: None,
            state: EngineState::Unconfigured,
        }
    }

    pub fn with_config(direction: Direction, config: WeightingConfig) -> Self {
        Self {
            direction,
            config: Some(config),
            state: EngineState::Configured,
        }
    }

    pub fn forward(config: WeightingConfig) -> Self {
        Self::with_config(Direction::Forward, config)
    }

    pub fn inverse(config: WeightingConfig) -> Self {
        Self::with_config(Direction::Inverse, config)
    }

    /// Installs (or replaces) the configuration.
    pub fn configure(&mut self, config: WeightingConfig) {
        self.config = Some(config);
        self.state = EngineState::Configured;
    }

    /// Configures from the per-channel parallel arrays.
    /// See [`WeightingConfig::from_parallel`].
    pub fn configure_parallel(
        &mut self,
        transform_types: &[u8],
        depths: &[u32],
        modes: &[u8],
        custom_tables: Option<&[Vec<f32>]>,
    ) -> Result<()> {
        let config = WeightingConfig::from_parallel(transform_types, depths, modes, custom_tables)?;
        self.configure(config);
        Ok(())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> Option<&WeightingConfig> {
        self.config.as_ref()
    }

    /// Weights every channel of `volume` in place.
    ///
    /// All weights are resolved and checked before the first sample is
    /// touched, so on error the volume is left unmodified.
    pub fn run(&mut self, volume: &mut CoefficientVolume) -> Result<()> {
        let config = self.config.as_ref().ok_or(WeightError::NotConfigured)?;
        if config.channel_count() != volume.channel_count() {
            return Err(WeightError::ChannelCountMismatch {
                expected: config.channel_count(),
                actual: volume.channel_count(),
            });
        }

        let resolved = config.validate()?;
        let skipped = resolved.iter().filter(|w| w.is_none()).count();
        debug!(
            "{} weighting of {} channels ({} skipped)",
            self.direction,
            config.channel_count(),
            skipped
        );

        let direction = self.direction;

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            volume
                .planes_mut()
                .par_iter_mut()
                .zip(resolved.par_iter())
                .zip(config.channels().par_iter())
                .enumerate()
                .for_each(|(z, ((plane, weights), channel))| {
                    if let Some(weights) = weights {
                        weight_plane(plane, z, channel, weights, direction);
                    }
                });
        }

        #[cfg(not(feature = "rayon"))]
        for (z, ((plane, weights), channel)) in volume
            .planes_mut()
            .iter_mut()
            .zip(&resolved)
            .zip(config.channels())
            .enumerate()
        {
            if let Some(weights) = weights {
                weight_plane(plane, z, channel, weights, direction);
            }
        }

        self.state = EngineState::Executed;
        Ok(())
    }
}

/// Weights one channel: residual first, then horizontal, vertical and
/// diagonal detail of each level from coarse to fine.
fn weight_plane(
    plane: &mut CoeffPlane,
    channel: usize,
    params: &ChannelWeighting,
    weights: &[f32],
    direction: Direction,
) {
    let geometry = SubbandGeometry::new(plane.width(), plane.height(), params.levels);
    for region in geometry.regions() {
        let weight = weights[region.id.index()];
        trace!(
            "channel {} subband {} rows {:?} cols {:?} weight {}",
            channel,
            region.id.index(),
            region.rows,
            region.cols,
            weight
        );
        if weight == 1.0 || region.is_empty() {
            continue;
        }
        plane.apply_region(region.rows, region.cols, |v| direction.apply(v, weight));
    }
}

/// Multiplies every subband of `volume` by its weight.
pub fn weight_forward(config: &WeightingConfig, volume: &mut CoefficientVolume) -> Result<()> {
    WeightingEngine::forward(config.clone()).run(volume)
}

/// Divides every subband of `volume` by its weight, undoing [`weight_forward`].
pub fn weight_inverse(config: &WeightingConfig, volume: &mut CoefficientVolume) -> Result<()> {
    WeightingEngine::inverse(config.clone()).run(volume)
}
