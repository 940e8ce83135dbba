//! Line detection on a finished accumulator.
//!
//! A bucket becomes a line candidate when its votes exceed `vote_threshold`
//! and it is a local maximum over its four rho/theta neighbours. Ties between
//! neighbours go to the earlier bucket (lower rho, lower theta), so a plateau
//! yields one line instead of two. Theta does not wrap around 180°.

use crate::Accumulator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Settings for accumulator peak extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LineDetectionParams {
    /// Buckets need strictly more votes than this to become lines.
    pub vote_threshold: u32,
    /// Keep only the strongest `max_lines` lines when set.
    pub max_lines: Option<usize>,
}

impl Default for LineDetectionParams {
    fn default() -> Self {
        Self {
            vote_threshold: 50,
            max_lines: None,
        }
    }
}

/// One detected line in accumulator coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoughLine {
    /// Signed distance from the image center.
    pub rho: f64,
    pub theta_deg: f64,
    pub rho_idx: usize,
    pub theta_idx: usize,
    pub votes: u32,
}

/// Extract thresholded local maxima, strongest first.
pub fn detect_lines(acc: &Accumulator, params: &LineDetectionParams) -> Vec<HoughLine> {
    let num_rho = acc.num_rho();
    let num_theta = acc.num_theta();
    let mut lines = Vec::new();

    for t in 0..num_theta {
        for r in 0..num_rho {
            let votes = acc.get(r, t);
            if votes <= params.vote_threshold {
                continue;
            }

            // `get` returns 0 past the borders.
            let prev_rho = if r > 0 { acc.get(r - 1, t) } else { 0 };
            let prev_theta = if t > 0 { acc.get(r, t - 1) } else { 0 };
            let is_peak = votes > prev_rho
                && votes >= acc.get(r + 1, t)
                && votes > prev_theta
                && votes >= acc.get(r, t + 1);

            if is_peak {
                lines.push(HoughLine {
                    rho: acc.rho_at(r),
                    theta_deg: acc.sampling().theta_deg(t),
                    rho_idx: r,
                    theta_idx: t,
                    votes,
                });
            }
        }
    }

    lines.sort_by(|a, b| match b.votes.cmp(&a.votes) {
        Ordering::Equal => (a.theta_idx, a.rho_idx).cmp(&(b.theta_idx, b.rho_idx)),
        other => other,
    });
    if let Some(max_lines) = params.max_lines {
        lines.truncate(max_lines);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{binarize, build_accumulator, AngleSampling, BinarizeParams, GrayImage};

    fn accumulate(img: &GrayImage) -> Accumulator {
        let grid = binarize(&img.view(), &BinarizeParams::default()).expect("binarize");
        build_accumulator(&grid, &AngleSampling::default()).expect("build")
    }

    fn cross() -> GrayImage {
        let mut img = GrayImage::filled(100, 100, 0);
        for i in 10..=90 {
            img.set(i, 50, 255);
            img.set(30, i, 255);
        }
        img
    }

    #[test]
    fn horizontal_line_gives_one_line_at_90_degrees() {
        let mut img = GrayImage::filled(100, 100, 0);
        for x in 10..=90 {
            img.set(x, 50, 255);
        }
        let lines = detect_lines(&accumulate(&img), &LineDetectionParams::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].theta_idx, 90);
        assert_eq!(lines[0].votes, 81);
        assert!(lines[0].rho.abs() < 0.5);
    }

    #[test]
    fn cross_gives_two_orthogonal_lines() {
        let lines = detect_lines(&accumulate(&cross()), &LineDetectionParams::default());
        let mut thetas: Vec<usize> = lines.iter().map(|l| l.theta_idx).collect();
        thetas.sort_unstable();
        assert_eq!(thetas, vec![0, 90]);

        let vertical = lines.iter().find(|l| l.theta_idx == 0).expect("vertical");
        assert!((vertical.rho + 20.0).abs() < 1.0);
    }

    #[test]
    fn max_lines_keeps_strongest() {
        let mut img = cross();
        // shorten the vertical stroke so the horizontal one wins
        for y in 70..=90 {
            img.set(30, y, 0);
        }
        let params = LineDetectionParams {
            max_lines: Some(1),
            ..LineDetectionParams::default()
        };
        let lines = detect_lines(&accumulate(&img), &params);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].theta_idx, 90);
    }

    #[test]
    fn blank_raster_has_no_lines() {
        let img = GrayImage::filled(40, 30, 0);
        assert!(detect_lines(&accumulate(&img), &LineDetectionParams::default()).is_empty());
    }
}
