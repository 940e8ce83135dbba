use crate::HoughError;
use serde::{Deserialize, Serialize};

/// Largest number of `u32` vote cells a single allocation can hold.
pub(crate) const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<u32>();

/// Discretization of the (rho, theta) parameter space.
///
/// Theta buckets cover `[0°, 180°)` in steps of `theta_step_deg`; rho buckets
/// are `rho_step` pixels wide.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AngleSampling {
    pub theta_step_deg: f64,
    pub rho_step: f64,
}

impl Default for AngleSampling {
    fn default() -> Self {
        Self {
            theta_step_deg: 1.0,
            rho_step: 1.0,
        }
    }
}

impl AngleSampling {
    pub fn validate(&self) -> Result<(), HoughError> {
        let step = self.theta_step_deg;
        if !step.is_finite() || step <= 0.0 {
            return Err(HoughError::InvalidThetaStep(step));
        }
        let buckets = (180.0 / step).floor();
        if buckets < 1.0 || buckets > MAX_CELLS as f64 {
            return Err(HoughError::InvalidThetaStep(step));
        }
        if !self.rho_step.is_finite() || self.rho_step <= 0.0 {
            return Err(HoughError::InvalidRhoStep(self.rho_step));
        }
        Ok(())
    }

    /// Number of theta buckets, `floor(180 / theta_step_deg)`.
    ///
    /// Only meaningful for a sampling that passed [`AngleSampling::validate`].
    pub fn num_theta(&self) -> usize {
        (180.0 / self.theta_step_deg).floor() as usize
    }

    #[inline]
    pub fn theta_deg(&self, bucket: usize) -> f64 {
        bucket as f64 * self.theta_step_deg
    }

    /// `(cos θ, sin θ)` for every theta bucket.
    pub(crate) fn trig_table(&self) -> Vec<(f64, f64)> {
        (0..self.num_theta())
            .map(|t| {
                let theta = self.theta_deg(t).to_radians();
                (theta.cos(), theta.sin())
            })
            .collect()
    }
}
