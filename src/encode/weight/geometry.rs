// src/encode/weight/geometry.rs

//! Dyadic subband layout of a transformed plane.
//!
//! After `L` levels of decomposition a plane of `N` samples along one axis is
//! split at boundaries `b[0] <= b[1] <= ... <= b[L] = N`, where
//! `b[k] = ceil(b[k + 1] / 2)`. An odd remainder always goes to the coarser
//! (low-pass) half. Level 0 is the coarsest detail level; its bands sit right
//! next to the residual in the top-left corner.
//!
//! ```text
//! +----+----+---------+
//! | R  | H0 |         |
//! +----+----+   H1    |
//! | V0 | D0 |         |
//! +----+----+---------+
//! |         |         |
//! |   V1    |   D1    |
//! |         |         |
//! +---------+---------+
//! ```

use std::ops::Range;

/// Orientation of a subband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubbandKind {
    /// Coarsest approximation (low-pass on both axes)
    Residual,
    /// High-pass along columns, low-pass along rows
    Horizontal,
    /// Low-pass along columns, high-pass along rows
    Vertical,
    /// High-pass on both axes
    Diagonal,
}

/// A subband of one channel: residual, or a detail band at some level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubbandId {
    pub kind: SubbandKind,
    pub level: u32,
}

impl SubbandId {
    pub const RESIDUAL: SubbandId = SubbandId {
        kind: SubbandKind::Residual,
        level: 0,
    };

    pub fn new(kind: SubbandKind, level: u32) -> Self {
        match kind {
            SubbandKind::Residual => Self::RESIDUAL,
            _ => SubbandId { kind, level },
        }
    }

    /// Maps a flat subband index onto (kind, level).
    /// Index 0 is the residual; `3k+1`, `3k+2`, `3k+3` are the detail bands of level `k`.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            return Self::RESIDUAL;
        }
        let level = ((index - 1) / 3) as u32;
        let kind = match (index - 1) % 3 {
            0 => SubbandKind::Horizontal,
            1 => SubbandKind::Vertical,
            _ => SubbandKind::Diagonal,
        };
        SubbandId { kind, level }
    }

    /// Flat subband index, the inverse of [`SubbandId::from_index`].
    pub fn index(&self) -> usize {
        let base = 3 * self.level as usize;
        match self.kind {
            SubbandKind::Residual => 0,
            SubbandKind::Horizontal => base + 1,
            SubbandKind::Vertical => base + 2,
            SubbandKind::Diagonal => base + 3,
        }
    }
}

/// Number of subbands for a channel decomposed `levels` times.
#[inline]
pub fn subband_count(levels: u32) -> usize {
    3 * levels as usize + 1
}

/// Boundary indices along one axis of extent `extent` after `levels` decompositions.
///
/// The result has `levels + 1` entries and always ends at `extent`.
pub fn subband_boundaries(extent: usize, levels: u32) -> Vec<usize> {
    let levels = levels as usize;
    let mut bounds = vec![0usize; levels + 1];
    bounds[levels] = extent;
    for k in (0..levels).rev() {
        bounds[k] = bounds[k + 1].div_ceil(2);
    }
    bounds
}

/// Deepest decomposition for which `2^levels` still fits in both extents.
pub fn max_levels(width: usize, height: usize) -> u32 {
    let min = width.min(height);
    if min == 0 { 0 } else { min.ilog2() }
}

/// A rectangular subband region of one plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubbandRegion {
    pub id: SubbandId,
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl SubbandRegion {
    pub fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }
}

/// Row and column boundaries of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubbandGeometry {
    levels: u32,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl SubbandGeometry {
    pub fn new(width: usize, height: usize, levels: u32) -> Self {
        SubbandGeometry {
            levels,
            rows: subband_boundaries(height, levels),
            cols: subband_boundaries(width, levels),
        }
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn row_bounds(&self) -> &[usize] {
        &self.rows
    }

    pub fn col_bounds(&self) -> &[usize] {
        &self.cols
    }

    /// Region of a single subband.
    pub fn region(&self, id: SubbandId) -> SubbandRegion {
        let (by, bx) = (&self.rows, &self.cols);
        let k = id.level as usize;
        let (rows, cols) = match id.kind {
            SubbandKind::Residual => (0..by[0], 0..bx[0]),
            SubbandKind::Horizontal => (0..by[k], bx[k]..bx[k + 1]),
            SubbandKind::Vertical => (by[k]..by[k + 1], 0..bx[k]),
            SubbandKind::Diagonal => (by[k]..by[k + 1], bx[k]..bx[k + 1]),
        };
        SubbandRegion { id, rows, cols }
    }

    /// All regions in traversal order: the residual, then for each level the
    /// horizontal, vertical and diagonal bands.
    pub fn regions(&self) -> impl Iterator<Item = SubbandRegion> + '_ {
        (0..subband_count(self.levels)).map(|index| self.region(SubbandId::from_index(index)))
    }
}
