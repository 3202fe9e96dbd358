// src/encode/weight/policy.rs

//! Resolves the scalar weight of a (subband, channel) pair.

use super::config::{ChannelWeighting, WeightMode, WeightingConfig};
use crate::utils::error::{Result, WeightError};
use crate::utils::log::warn;

/// Exponents past this overflow `f32`; the clamp keeps `powi` well defined.
const MAX_EXPONENT: u32 = 1024;

impl ChannelWeighting {
    /// True when weighting this channel changes any sample.
    pub fn needed(&self) -> bool {
        match self.mode {
            WeightMode::Custom(_) => true,
            WeightMode::Default => self.transform.is_integer(),
            WeightMode::Disabled => false,
        }
    }

    /// Weight of `subband` for this channel; `channel` is used for error context.
    ///
    /// The returned weight is always strictly positive and finite.
    pub fn weight(&self, channel: usize, subband: usize) -> Result<f32> {
        let max = 3 * self.levels as usize;
        if subband > max {
            return Err(WeightError::SubbandOutOfRange {
                channel,
                subband,
                max,
            });
        }

        let value = match &self.mode {
            WeightMode::Disabled => return Ok(1.0),
            WeightMode::Default if !self.transform.is_integer() => return Ok(1.0),
            WeightMode::Default => {
                let exponent = self.levels - (subband / 3) as u32;
                2f32.powi(exponent.min(MAX_EXPONENT) as i32)
            }
            WeightMode::Custom(table) => {
                if table.len() < self.subband_count() {
                    return Err(WeightError::TableTooShort {
                        channel,
                        depth: self.levels,
                        expected: self.subband_count(),
                        actual: table.len(),
                    });
                }
                table[subband]
            }
        };

        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(WeightError::InvalidWeight {
                channel,
                subband,
                value,
            })
        }
    }

    /// Weights of every subband, in subband order. Fails on the first bad entry.
    pub fn resolve_weights(&self, channel: usize) -> Result<Vec<f32>> {
        if let WeightMode::Custom(table) = &self.mode {
            if table.len() > self.subband_count() {
                warn!(
                    "channel {}: custom weight table has {} entries, only the first {} are used",
                    channel,
                    table.len(),
                    self.subband_count()
                );
            }
        }
        (0..self.subband_count())
            .map(|subband| self.weight(channel, subband))
            .collect()
    }
}

impl WeightingConfig {
    /// Weight of `subband` in `channel`.
    pub fn weight(&self, subband: usize, channel: usize) -> Result<f32> {
        self.channel(channel)?.weight(channel, subband)
    }

    /// Whether `channel` needs weighting at all.
    pub fn needed(&self, channel: usize) -> Result<bool> {
        Ok(self.channel(channel)?.needed())
    }

    /// Resolves every weight of every channel that needs weighting.
    ///
    /// Entry `z` is `None` for channels that are left untouched.
    pub fn validate(&self) -> Result<Vec<Option<Vec<f32>>>> {
        self.channels()
            .iter()
            .enumerate()
            .map(|(z, channel)| {
                if channel.needed() {
                    channel.resolve_weights(z).map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::weight::config::TransformType;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_default_integer_weights() {
        let channel = ChannelWeighting::integer(3);
        let weights = channel.resolve_weights(0).unwrap();
        assert_eq!(
            weights,
            vec![8.0, 8.0, 8.0, 4.0, 4.0, 4.0, 2.0, 2.0, 2.0, 1.0]
        );
        // level 0 horizontal and level 2 horizontal
        assert_eq!(channel.weight(0, 1).unwrap(), 8.0);
        assert_eq!(channel.weight(0, 7).unwrap(), 2.0);
    }

    #[test]
    fn test_default_float_weights_are_unit() {
        let channel = ChannelWeighting::float(4);
        assert!(!channel.needed());
        assert!((0..13).all(|s| channel.weight(0, s).unwrap() == 1.0));
    }

    #[test]
    fn test_disabled_weights_are_unit() {
        let channel = ChannelWeighting::disabled(TransformType::INTEGER, 2);
        assert!(!channel.needed());
        assert_eq!(channel.weight(0, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_custom_weights_read_directly() {
        let channel = ChannelWeighting::custom(TransformType::FLOAT, 1, vec![1.0, 2.0, 4.0, 8.0]);
        assert!(channel.needed());
        assert_eq!(channel.resolve_weights(0).unwrap(), vec![1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_custom_table_too_short() {
        let channel = ChannelWeighting::custom(TransformType::FLOAT, 2, vec![1.0; 4]);
        let err = channel.weight(5, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err,
            WeightError::TableTooShort {
                channel: 5,
                depth: 2,
                expected: 7,
                actual: 4
            }
        );
    }

    #[test]
    fn test_custom_invalid_entries() {
        for bad in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            let channel =
                ChannelWeighting::custom(TransformType::FLOAT, 1, vec![1.0, 1.0, bad, 1.0]);
            let err = channel.resolve_weights(1).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidWeight);
            assert_eq!(err.channel(), Some(1));
        }
    }

    #[test]
    fn test_subband_out_of_range() {
        let channel = ChannelWeighting::integer(1);
        assert_eq!(
            channel.weight(0, 4).unwrap_err(),
            WeightError::SubbandOutOfRange {
                channel: 0,
                subband: 4,
                max: 3
            }
        );
    }

    #[test]
    fn test_extreme_depth_rejected() {
        let channel = ChannelWeighting::integer(200);
        let err = channel.weight(0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidWeight);
        // deep enough subbands are still representable
        assert_eq!(channel.weight(0, 600).unwrap(), 1.0);
    }

    #[test]
    fn test_config_validate() {
        let config = WeightingConfig::new(vec![
            ChannelWeighting::integer(1),
            ChannelWeighting::float(1),
            ChannelWeighting::custom(TransformType::FLOAT, 0, vec![3.0]),
        ]);
        let resolved = config.validate().unwrap();
        assert_eq!(resolved[0], Some(vec![2.0, 2.0, 2.0, 1.0]));
        assert_eq!(resolved[1], None);
        assert_eq!(resolved[2], Some(vec![3.0]));
        assert!(config.needed(0).unwrap());
        assert!(!config.needed(1).unwrap());
        assert_eq!(config.weight(0, 2).unwrap(), 3.0);
        assert!(config.weight(0, 3).is_err());
    }
}
