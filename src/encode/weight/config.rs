// src/encode/weight/config.rs

//! Per-channel weighting configuration.
//!
//! Each channel carries its own transform type, decomposition depth and
//! weighting mode in a single record, so the values can never drift out of
//! alignment the way parallel arrays can.

use super::geometry::subband_count;
use crate::utils::error::{Result, WeightError};
use crate::utils::log::warn;

/// Wavelet transform code as written in the stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformType(pub u8);

impl TransformType {
    /// 9/7 floating point transform
    pub const FLOAT: TransformType = TransformType(0);
    /// Integer (reversible) transform; enables power-of-two default weights
    pub const INTEGER: TransformType = TransformType(4);

    #[inline]
    pub fn is_integer(self) -> bool {
        self == Self::INTEGER
    }

    pub fn code(self) -> u8 {
        self.0
    }
}

impl From<u8> for TransformType {
    fn from(code: u8) -> Self {
        TransformType(code)
    }
}

/// Weighting policy of one channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeightMode {
    /// Power-of-two weights for the integer transform, unit weights otherwise
    #[default]
    Default,
    /// Caller-supplied weight per subband, indexed by subband
    Custom(Vec<f32>),
    /// Every weight is 1.0
    Disabled,
}

impl WeightMode {
    pub const DEFAULT_CODE: u8 = 0;
    pub const CUSTOM_CODE: u8 = 1;
    pub const DISABLED_CODE: u8 = 2;

    /// Header code of this mode.
    pub fn code(&self) -> u8 {
        match self {
            WeightMode::Default => Self::DEFAULT_CODE,
            WeightMode::Custom(_) => Self::CUSTOM_CODE,
            WeightMode::Disabled => Self::DISABLED_CODE,
        }
    }

    /// Decodes a header mode code. `table` is only kept for the custom mode.
    pub fn from_code(channel: usize, code: u8, table: Option<Vec<f32>>) -> Result<Self> {
        match code {
            Self::DEFAULT_CODE | Self::DISABLED_CODE => {
                if table.as_ref().is_some_and(|t| !t.is_empty()) {
                    warn!(
                        "channel {}: custom weight table ignored for mode {}",
                        channel, code
                    );
                }
                Ok(if code == Self::DEFAULT_CODE {
                    WeightMode::Default
                } else {
                    WeightMode::Disabled
                })
            }
            Self::CUSTOM_CODE => Ok(WeightMode::Custom(table.unwrap_or_default())),
            _ => Err(WeightError::UnknownMode { channel, code }),
        }
    }
}

/// Weighting parameters of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelWeighting {
    pub transform: TransformType,
    pub levels: u32,
    pub mode: WeightMode,
}

impl Default for ChannelWeighting {
    fn default() -> Self {
        Self {
            transform: TransformType::INTEGER,
            levels: 3,
            mode: WeightMode::Default,
        }
    }
}

impl ChannelWeighting {
    pub fn new(transform: TransformType, levels: u32, mode: WeightMode) -> Self {
        Self {
            transform,
            levels,
            mode,
        }
    }

    /// Integer transform with default (power-of-two) weights.
    pub fn integer(levels: u32) -> Self {
        Self::new(TransformType::INTEGER, levels, WeightMode::Default)
    }

    /// Float transform with default (unit) weights.
    pub fn float(levels: u32) -> Self {
        Self::new(TransformType::FLOAT, levels, WeightMode::Default)
    }

    pub fn custom(transform: TransformType, levels: u32, table: Vec<f32>) -> Self {
        Self::new(transform, levels, WeightMode::Custom(table))
    }

    pub fn disabled(transform: TransformType, levels: u32) -> Self {
        Self::new(transform, levels, WeightMode::Disabled)
    }

    pub fn subband_count(&self) -> usize {
        subband_count(self.levels)
    }
}

/// Weighting parameters for every channel of an image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightingConfig {
    channels: Vec<ChannelWeighting>,
}

impl WeightingConfig {
    pub fn new(channels: Vec<ChannelWeighting>) -> Self {
        Self { channels }
    }

    /// Same configuration for `count` channels.
    pub fn uniform(count: usize, channel: ChannelWeighting) -> Self {
        Self {
            channels: vec![channel; count],
        }
    }

    /// Builds the configuration from the parallel per-channel arrays handed
    /// over by the transform and the option parser.
    ///
    /// `custom_tables`, when given, holds one table per channel; only the
    /// tables of mode-1 channels are kept.
    pub fn from_parallel(
        transform_types: &[u8],
        depths: &[u32],
        modes: &[u8],
        custom_tables: Option<&[Vec<f32>]>,
    ) -> Result<Self> {
        let count = transform_types.len();
        let check = |what: &'static str, actual: usize| {
            if actual == count {
                Ok(())
            } else {
                Err(WeightError::MisalignedChannelArrays {
                    what,
                    expected: count,
                    actual,
                })
            }
        };
        check("depths", depths.len())?;
        check("modes", modes.len())?;
        if let Some(tables) = custom_tables {
            check("custom tables", tables.len())?;
        }

        let channels = (0..count)
            .map(|z| -> Result<ChannelWeighting> {
                let table = custom_tables.map(|tables| tables[z].clone());
                let mode = WeightMode::from_code(z, modes[z], table)?;
                Ok(ChannelWeighting::new(transform_types[z].into(), depths[z], mode))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { channels })
    }

    pub fn push(&mut self, channel: ChannelWeighting) {
        self.channels.push(channel);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channels(&self) -> &[ChannelWeighting] {
        &self.channels
    }

    /// Record of one channel, or a range error.
    pub fn channel(&self, channel: usize) -> Result<&ChannelWeighting> {
        self.channels
            .get(channel)
            .ok_or(WeightError::ChannelOutOfRange {
                channel,
                channels: self.channels.len(),
            })
    }

    // Accessors used by the header writer.

    pub fn mode_code(&self, channel: usize) -> Result<u8> {
        Ok(self.channel(channel)?.mode.code())
    }

    pub fn transform_type(&self, channel: usize) -> Result<TransformType> {
        Ok(self.channel(channel)?.transform)
    }

    pub fn depth(&self, channel: usize) -> Result<u32> {
        Ok(self.channel(channel)?.levels)
    }

    /// Custom table of a mode-1 channel, `None` for the other modes.
    pub fn custom_table(&self, channel: usize) -> Result<Option<&[f32]>> {
        Ok(match &self.channel(channel)?.mode {
            WeightMode::Custom(table) => Some(table.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_codes() {
        assert_eq!(WeightMode::Default.code(), 0);
        assert_eq!(WeightMode::Custom(vec![1.0]).code(), 1);
        assert_eq!(WeightMode::Disabled.code(), 2);
        assert_eq!(
            WeightMode::from_code(0, 1, Some(vec![1.0, 2.0])).unwrap(),
            WeightMode::Custom(vec![1.0, 2.0])
        );
        assert_eq!(WeightMode::from_code(0, 2, None).unwrap(), WeightMode::Disabled);
        assert_eq!(
            WeightMode::from_code(4, 3, None).unwrap_err(),
            WeightError::UnknownMode { channel: 4, code: 3 }
        );
    }

    #[test]
    fn test_from_parallel() {
        let tables = vec![vec![], vec![1.0, 2.0, 4.0, 8.0], vec![9.0]];
        let config =
            WeightingConfig::from_parallel(&[4, 0, 0], &[3, 1, 2], &[0, 1, 2], Some(tables.as_slice()))
                .unwrap();
        assert_eq!(config.channel_count(), 3);
        assert_eq!(config.mode_code(1).unwrap(), 1);
        assert_eq!(config.transform_type(0).unwrap(), TransformType::INTEGER);
        assert_eq!(config.depth(2).unwrap(), 2);
        assert_eq!(
            config.custom_table(1).unwrap(),
            Some(&[1.0, 2.0, 4.0, 8.0][..])
        );
        assert_eq!(config.custom_table(2).unwrap(), None);
        assert!(config.custom_table(3).is_err());
    }

    #[test]
    fn test_from_parallel_misaligned() {
        let err = WeightingConfig::from_parallel(&[4, 4], &[3], &[0, 0], None).unwrap_err();
        assert_eq!(
            err,
            WeightError::MisalignedChannelArrays {
                what: "depths",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_default_channel() {
        let channel = ChannelWeighting::default();
        assert!(channel.transform.is_integer());
        assert_eq!(channel.subband_count(), 10);
    }
}
