//! Fixed-threshold binarization of grayscale rasters.

use crate::{GrayImageView, HoughError};
use serde::{Deserialize, Serialize};

/// Threshold that keeps any visible stroke on a black canvas.
pub const STROKE_THRESHOLD: u8 = 10;
/// Mid-gray threshold; keeps only the bright core of anti-aliased strokes.
pub const MIDTONE_THRESHOLD: u8 = 127;

/// Binarization settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Intensity boundary between background and foreground.
    pub threshold: u8,
    /// When true, pixels equal to `threshold` are foreground (`>=`); otherwise
    /// only pixels strictly brighter are (`>`).
    pub inclusive: bool,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            threshold: STROKE_THRESHOLD,
            inclusive: false,
        }
    }
}

impl BinarizeParams {
    #[inline]
    pub fn is_foreground(&self, value: u8) -> bool {
        if self.inclusive {
            value >= self.threshold
        } else {
            value > self.threshold
        }
    }
}

/// Foreground/background mask with the raster's dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl BinaryGrid {
    /// Build a grid from row-major cells (`true` = foreground).
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, HoughError> {
        if width == 0 || height == 0 {
            return Err(HoughError::EmptyRaster { width, height });
        }
        if cells.len() != width * height {
            return Err(HoughError::BufferLength {
                expected: width * height,
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Foreground pixel coordinates in row-major order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &fg)| fg)
            .map(move |(i, _)| (i % w, i / w))
    }

    pub fn count_foreground(&self) -> usize {
        self.cells.iter().filter(|&&fg| fg).count()
    }
}

/// Classify every pixel of `raster` as foreground or background.
pub fn binarize(
    raster: &GrayImageView<'_>,
    params: &BinarizeParams,
) -> Result<BinaryGrid, HoughError> {
    raster.validate()?;
    let cells = raster
        .data
        .iter()
        .map(|&v| params.is_foreground(v))
        .collect();
    Ok(BinaryGrid {
        width: raster.width,
        height: raster.height,
        cells,
    })
}
