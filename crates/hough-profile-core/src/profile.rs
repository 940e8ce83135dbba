//! Reduction of the accumulator into one energy value per theta bucket.

use crate::{detect_lines, Accumulator, LineDetectionParams};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// How the rho axis is collapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReductionMode {
    /// `Σ_rho votes²` per theta, normalized so the strongest theta is 1.
    #[default]
    SumOfSquares,
    /// Number of detected lines per theta bucket, unnormalized.
    PeakCount(LineDetectionParams),
}

impl ReductionMode {
    pub fn kind(&self) -> ProfileKind {
        match self {
            ReductionMode::SumOfSquares => ProfileKind::SumOfSquares,
            ReductionMode::PeakCount(_) => ProfileKind::PeakCount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    SumOfSquares,
    PeakCount,
}

/// Energy per theta bucket, index `t` covering `t * theta_step_deg` degrees.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AngularProfile {
    values: Vec<f64>,
    theta_step_deg: f64,
    kind: ProfileKind,
}

impl AngularProfile {
    pub fn from_values(values: Vec<f64>, theta_step_deg: f64, kind: ProfileKind) -> Self {
        Self {
            values,
            theta_step_deg,
            kind,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn theta_step_deg(&self) -> f64 {
        self.theta_step_deg
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// Bucket angles in degrees, the x-axis labels of a chart.
    pub fn labels_deg(&self) -> Vec<f64> {
        (0..self.values.len())
            .map(|t| t as f64 * self.theta_step_deg)
            .collect()
    }

    /// Largest value, `0.0` for an empty profile.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Index of the first bucket holding the maximum.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| i)
    }

    /// No energy anywhere, e.g. a blank canvas.
    pub fn is_degenerate(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// Angle of the strongest bucket, `None` for degenerate profiles.
    pub fn dominant_theta_deg(&self) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        self.argmax().map(|t| t as f64 * self.theta_step_deg)
    }

    /// Same profile with outliers capped by [`crate::clamp_peaks`].
    pub fn clamped(&self, factor: f64) -> Self {
        Self {
            values: crate::clamp_peaks(&self.values, factor),
            theta_step_deg: self.theta_step_deg,
            kind: self.kind,
        }
    }
}

/// Collapse `acc` along rho according to `mode`.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(acc)))]
pub fn reduce_to_profile(acc: &Accumulator, mode: &ReductionMode) -> AngularProfile {
    let values = match mode {
        ReductionMode::SumOfSquares => sum_of_squares(acc),
        ReductionMode::PeakCount(params) => peak_count(acc, params),
    };
    AngularProfile {
        values,
        theta_step_deg: acc.sampling().theta_step_deg,
        kind: mode.kind(),
    }
}

fn sum_of_squares(acc: &Accumulator) -> Vec<f64> {
    let mut energy: Vec<f64> = acc
        .columns()
        .map(|col| col.iter().map(|&v| (v as f64) * (v as f64)).sum())
        .collect();

    let max = energy.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for e in &mut energy {
            *e /= max;
        }
    } else {
        debug!("degenerate profile: no votes in accumulator");
    }
    energy
}

fn peak_count(acc: &Accumulator, params: &LineDetectionParams) -> Vec<f64> {
    let mut counts = vec![0.0; acc.num_theta()];
    let lines = detect_lines(acc, params);
    for line in &lines {
        counts[line.theta_idx] += 1.0;
    }
    debug!("{} lines above {} votes", lines.len(), params.vote_threshold);
    counts
}
