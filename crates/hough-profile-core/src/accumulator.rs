//! Rho/theta vote accumulator.
//!
//! Lines are parametrized as `rho = (x - cx) cos θ + (y - cy) sin θ` with
//! `(cx, cy) = (W/2, H/2)`. Rho spans `[-max_rho, max_rho]` with
//! `max_rho = hypot(W, H)`, which leaves every pixel of the raster well
//! inside the range.

use crate::sampling::MAX_CELLS;
use crate::{AngleSampling, BinaryGrid, HoughError};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Vote counts over `num_rho × num_theta` buckets.
///
/// Storage is theta-major: each theta bucket owns a contiguous column of
/// `num_rho` counts. The accumulator is read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator {
    data: Vec<u32>,
    num_rho: usize,
    num_theta: usize,
    max_rho: f64,
    sampling: AngleSampling,
}

impl Accumulator {
    /// Fails with `InvalidRhoStep` when the rho step is too fine for the
    /// table to be allocated.
    fn zeroed(width: usize, height: usize, sampling: AngleSampling) -> Result<Self, HoughError> {
        let too_fine = HoughError::InvalidRhoStep(sampling.rho_step);
        let max_rho = (width as f64).hypot(height as f64);
        let rho_buckets = (2.0 * max_rho / sampling.rho_step).ceil().max(1.0);
        if rho_buckets > MAX_CELLS as f64 {
            return Err(too_fine);
        }
        let num_rho = rho_buckets as usize;
        let num_theta = sampling.num_theta();
        let len = num_rho
            .checked_mul(num_theta)
            .filter(|&len| len <= MAX_CELLS)
            .ok_or_else(|| too_fine.clone())?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| too_fine)?;
        data.resize(len, 0);

        Ok(Self {
            data,
            num_rho,
            num_theta,
            max_rho,
            sampling,
        })
    }

    pub fn num_rho(&self) -> usize {
        self.num_rho
    }

    pub fn num_theta(&self) -> usize {
        self.num_theta
    }

    pub fn max_rho(&self) -> f64 {
        self.max_rho
    }

    pub fn sampling(&self) -> &AngleSampling {
        &self.sampling
    }

    /// Votes at `(rho_idx, theta_idx)`; zero outside the grid.
    #[inline]
    pub fn get(&self, rho_idx: usize, theta_idx: usize) -> u32 {
        if rho_idx >= self.num_rho || theta_idx >= self.num_theta {
            return 0;
        }
        self.data[theta_idx * self.num_rho + rho_idx]
    }

    /// All rho buckets of one theta bucket.
    pub fn column(&self, theta_idx: usize) -> &[u32] {
        let start = theta_idx.min(self.num_theta) * self.num_rho;
        let end = (start + self.num_rho).min(self.data.len());
        &self.data[start..end]
    }

    pub fn columns(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.data.chunks_exact(self.num_rho)
    }

    pub fn total_votes(&self) -> u64 {
        self.data.iter().map(|&v| v as u64).sum()
    }

    /// Signed distance represented by a rho bucket.
    #[inline]
    pub fn rho_at(&self, rho_idx: usize) -> f64 {
        rho_idx as f64 * self.sampling.rho_step - self.max_rho
    }

    #[inline]
    fn rho_to_index(&self, rho: f64) -> usize {
        let idx = ((rho + self.max_rho) / self.sampling.rho_step).round();
        // Unreachable for in-raster pixels; guards rounding at the extremes.
        idx.clamp(0.0, (self.num_rho - 1) as f64) as usize
    }
}

/// Cast `num_theta` votes for every foreground pixel of `grid`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(grid, sampling),
        fields(width = grid.width(), height = grid.height())
    )
)]
pub fn build_accumulator(
    grid: &BinaryGrid,
    sampling: &AngleSampling,
) -> Result<Accumulator, HoughError> {
    sampling.validate()?;
    if grid.width() == 0 || grid.height() == 0 {
        return Err(HoughError::EmptyRaster {
            width: grid.width(),
            height: grid.height(),
        });
    }

    let mut acc = Accumulator::zeroed(grid.width(), grid.height(), *sampling)?;
    let trig = sampling.trig_table();
    let cx = grid.width() as f64 / 2.0;
    let cy = grid.height() as f64 / 2.0;

    let mut voters = 0usize;
    for (x, y) in grid.foreground() {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        for (t, &(cos_t, sin_t)) in trig.iter().enumerate() {
            let r = acc.rho_to_index(dx * cos_t + dy * sin_t);
            let idx = t * acc.num_rho + r;
            acc.data[idx] += 1;
        }
        voters += 1;
    }

    debug!(
        "accumulator {}x{} (rho x theta), {voters} foreground pixels, max_rho {:.2}",
        acc.num_rho, acc.num_theta, acc.max_rho
    );
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{binarize, BinarizeParams, GrayImage};

    fn grid_from(img: &GrayImage) -> BinaryGrid {
        binarize(&img.view(), &BinarizeParams::default()).expect("binarize")
    }

    #[test]
    fn dimensions_follow_diagonal() {
        let grid = grid_from(&GrayImage::filled(100, 100, 0));
        let acc = build_accumulator(&grid, &AngleSampling::default()).expect("build");
        assert_eq!(acc.num_theta(), 180);
        assert_eq!(acc.num_rho(), 283);
        assert_eq!(acc.total_votes(), 0);
    }

    #[test]
    fn corner_pixels_stay_in_range() {
        let (w, h) = (37, 23);
        let mut img = GrayImage::filled(w, h, 0);
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            img.set(x, y, 255);
        }
        let grid = grid_from(&img);

        for rho_step in [1.0, 0.5, 3.0, 7.3] {
            let sampling = AngleSampling {
                theta_step_deg: 1.0,
                rho_step,
            };
            let acc = build_accumulator(&grid, &sampling).expect("build");
            assert_eq!(acc.total_votes(), 4 * acc.num_theta() as u64);
            for col in acc.columns() {
                assert_eq!(col.len(), acc.num_rho());
                assert_eq!(col.iter().map(|&v| v as u64).sum::<u64>(), 4);
                // nothing should pile up on the outermost buckets
                assert_eq!(col[0], 0);
                assert_eq!(col[acc.num_rho() - 1], 0);
            }
        }
    }

    #[test]
    fn single_pixel_raster_votes_once_per_theta() {
        let img = GrayImage::filled(1, 1, 255);
        let acc = build_accumulator(&grid_from(&img), &AngleSampling::default()).expect("build");
        assert_eq!(acc.num_rho(), 3);
        for t in 0..acc.num_theta() {
            assert_eq!(acc.column(t).iter().sum::<u32>(), 1);
        }
    }

    #[test]
    fn horizontal_line_collapses_into_one_bucket_at_90_degrees() {
        let mut img = GrayImage::filled(100, 100, 0);
        for x in 10..=90 {
            img.set(x, 50, 255);
        }
        let acc = build_accumulator(&grid_from(&img), &AngleSampling::default()).expect("build");
        // rho = 0 maps to bucket round(max_rho) = 141
        assert_eq!(acc.get(141, 90), 81);
        assert_eq!(acc.column(90).iter().filter(|&&v| v > 0).count(), 1);
        assert!((acc.rho_at(141)).abs() < 0.5);
    }

    #[test]
    fn invalid_sampling_fails_fast() {
        let grid = grid_from(&GrayImage::filled(4, 4, 255));
        let sampling = AngleSampling {
            theta_step_deg: -2.0,
            rho_step: 1.0,
        };
        assert_eq!(
            build_accumulator(&grid, &sampling),
            Err(HoughError::InvalidThetaStep(-2.0))
        );
    }

    #[test]
    fn oversized_tables_are_rejected() {
        let grid = grid_from(&GrayImage::filled(4, 4, 255));
        for rho_step in [1e-300, f64::MIN_POSITIVE] {
            let sampling = AngleSampling {
                theta_step_deg: 1.0,
                rho_step,
            };
            assert_eq!(
                build_accumulator(&grid, &sampling),
                Err(HoughError::InvalidRhoStep(rho_step))
            );
        }

        // Fits on its own but not once multiplied by 180 theta buckets.
        let rho_step = 2.0 * 32f64.sqrt() / (MAX_CELLS / 100) as f64;
        let sampling = AngleSampling {
            theta_step_deg: 1.0,
            rho_step,
        };
        assert_eq!(
            build_accumulator(&grid, &sampling),
            Err(HoughError::InvalidRhoStep(rho_step))
        );
    }
}
