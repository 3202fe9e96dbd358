// src/utils/error.rs

use thiserror::Error;

/// Coarse classification of a [`WeightError`].
///
/// Every kind is fatal for the image being coded: a bad weight corrupts every
/// bit-plane derived from the affected channel, so callers abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The engine was driven before it had a configuration.
    Configuration,
    /// A table, channel or subband index does not fit the configured geometry.
    Range,
    /// A resolved weight is zero, negative or not finite.
    InvalidWeight,
}

/// The error type for all weighting operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightError {
    #[error("weighting engine run before it was configured")]
    NotConfigured,

    #[error("channel {channel}: custom weight table has {actual} entries, depth {depth} needs {expected}")]
    TableTooShort {
        channel: usize,
        depth: u32,
        expected: usize,
        actual: usize,
    },

    #[error("channel {channel}: subband {subband} outside 0..={max}")]
    SubbandOutOfRange {
        channel: usize,
        subband: usize,
        max: usize,
    },

    #[error("channel {channel} outside 0..{channels}")]
    ChannelOutOfRange { channel: usize, channels: usize },

    #[error("configuration describes {expected} channels, coefficient volume has {actual}")]
    ChannelCountMismatch { expected: usize, actual: usize },

    #[error("parallel channel arrays disagree: {what} has {actual} entries, expected {expected}")]
    MisalignedChannelArrays {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("channel {channel}: unknown weighting mode code {code}")]
    UnknownMode { channel: usize, code: u8 },

    #[error("channel {channel}: row {row} has {actual} samples, expected {expected}")]
    RaggedPlane {
        channel: usize,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("channel {channel}: invalid weight {value} for subband {subband}")]
    InvalidWeight {
        channel: usize,
        subband: usize,
        value: f32,
    },
}

impl WeightError {
    /// Maps the error onto its reporting kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeightError::NotConfigured => ErrorKind::Configuration,
            WeightError::InvalidWeight { .. } => ErrorKind::InvalidWeight,
            WeightError::TableTooShort { .. }
            | WeightError::SubbandOutOfRange { .. }
            | WeightError::ChannelOutOfRange { .. }
            | WeightError::ChannelCountMismatch { .. }
            | WeightError::MisalignedChannelArrays { .. }
            | WeightError::UnknownMode { .. }
            | WeightError::RaggedPlane { .. } => ErrorKind::Range,
        }
    }

    /// Channel the error refers to, when there is one.
    pub fn channel(&self) -> Option<usize> {
        match *self {
            WeightError::TableTooShort { channel, .. }
            | WeightError::SubbandOutOfRange { channel, .. }
            | WeightError::ChannelOutOfRange { channel, .. }
            | WeightError::UnknownMode { channel, .. }
            | WeightError::RaggedPlane { channel, .. }
            | WeightError::InvalidWeight { channel, .. } => Some(channel),
            _ => None,
        }
    }
}

/// A specialized `Result` type for weighting operations.
pub type Result<T> = std::result::Result<T, WeightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(WeightError::NotConfigured.kind(), ErrorKind::Configuration);
        let err = WeightError::InvalidWeight {
            channel: 2,
            subband: 5,
            value: -1.0,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidWeight);
        assert_eq!(err.channel(), Some(2));

        let err = WeightError::TableTooShort {
            channel: 1,
            depth: 2,
            expected: 7,
            actual: 4,
        };
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.to_string(),
            "channel 1: custom weight table has 4 entries, depth 2 needs 7"
        );
    }
}
