// src/image/coeff_volume.rs

//! In-memory coefficient planes produced by the wavelet transform.
//!
//! A `CoeffPlane` holds one channel's transformed samples in row-major order.
//! A `CoefficientVolume` is the ordered set of planes for every spectral
//! channel of an image; extents may differ from channel to channel.

use crate::utils::error::{Result, WeightError};
use std::ops::Range;

/// A 2D buffer of wavelet coefficients for one channel, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct CoeffPlane {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl CoeffPlane {
    /// Creates a zero-filled plane.
    pub fn new(width: usize, height: usize) -> Self {
        CoeffPlane {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Creates a plane from a raw row-major vector.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), width * height);
        CoeffPlane {
            width,
            height,
            data,
        }
    }

    /// Builds a plane from nested rows. `channel` is only used for error context.
    ///
    /// Every row must have the length of the first one.
    pub fn from_rows(channel: usize, rows: Vec<Vec<f32>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * height);
        for (row, samples) in rows.into_iter().enumerate() {
            if samples.len() != width {
                return Err(WeightError::RaggedPlane {
                    channel,
                    row,
                    expected: width,
                    actual: samples.len(),
                });
            }
            data.extend(samples);
        }
        Ok(CoeffPlane {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the dimensions as a tuple (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.height && col < self.width);
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.height && col < self.width);
        self.data[row * self.width + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        &mut self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the samples as raw native-endian bytes, for coders that
    /// consume an untyped buffer.
    pub fn as_raw(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Applies `op` to every sample in the rectangle `rows × cols`, visiting
    /// rows top to bottom and each row left to right.
    pub fn apply_region<F>(&mut self, rows: Range<usize>, cols: Range<usize>, mut op: F)
    where
        F: FnMut(f32) -> f32,
    {
        assert!(rows.end <= self.height && cols.end <= self.width);
        if cols.is_empty() {
            return;
        }
        for r in rows {
            let line = &mut self.row_mut(r)[cols.clone()];
            for sample in line.iter_mut() {
                *sample = op(*sample);
            }
        }
    }

    /// Converts back to nested rows.
    pub fn into_rows(self) -> Vec<Vec<f32>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.data.chunks(self.width).map(<[f32]>::to_vec).collect()
    }
}

/// The per-channel planes of one transformed image, indexed `[channel][row][col]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoefficientVolume {
    planes: Vec<CoeffPlane>,
}

impl CoefficientVolume {
    pub fn from_planes(planes: Vec<CoeffPlane>) -> Self {
        CoefficientVolume { planes }
    }

    /// Builds a volume from `[channel][row][col]` nested vectors.
    pub fn from_nested(channels: Vec<Vec<Vec<f32>>>) -> Result<Self> {
        let planes = channels
            .into_iter()
            .enumerate()
            .map(|(channel, rows)| CoeffPlane::from_rows(channel, rows))
            .collect::<Result<Vec<_>>>()?;
        Ok(CoefficientVolume { planes })
    }

    pub fn into_nested(self) -> Vec<Vec<Vec<f32>>> {
        self.planes.into_iter().map(CoeffPlane::into_rows).collect()
    }

    pub fn channel_count(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, channel: usize) -> Option<&CoeffPlane> {
        self.planes.get(channel)
    }

    pub fn plane_mut(&mut self, channel: usize) -> Option<&mut CoeffPlane> {
        self.planes.get_mut(channel)
    }

    pub fn planes(&self) -> &[CoeffPlane] {
        &self.planes
    }

    pub fn planes_mut(&mut self) -> &mut [CoeffPlane] {
        &mut self.planes
    }

    pub fn into_planes(self) -> Vec<CoeffPlane> {
        self.planes
    }
}
