//! Event-driven analysis passes over a drawing canvas.
//!
//! Each event (stroke finished, rotation changed, clear) runs synchronously
//! to completion. The session carries two pieces of state between passes:
//! the last stroke-complete raster, used as the source for rotations, and the
//! running display maximum. A failed pass leaves both untouched.

use hough_profile_core::{
    analyze, rotate_about_center, AnalysisParams, AngularProfile, GrayImage, HoughError,
    ProfileKind,
};
use log::{debug, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Fixed y-axis maximum for normalized profiles, leaving headroom above 1.0.
pub const NORMALIZED_AXIS_MAX: f64 = 1.04;

/// Rotation inputs are clamped to this range, in whole degrees.
const MAX_ROTATION_DEG: i32 = 360;

/// Chart y-axis scale that never shrinks between passes.
///
/// Peak-count profiles are unnormalized, so the axis follows the largest
/// count seen since the last reset. Normalized profiles always use
/// [`NORMALIZED_AXIS_MAX`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayScale {
    saved_max: Option<f64>,
}

impl DisplayScale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously observed maximum.
    pub fn with_hint(previous_max: Option<f64>) -> Self {
        Self {
            saved_max: previous_max,
        }
    }

    pub fn current(&self) -> Option<f64> {
        self.saved_max
    }

    /// Axis maximum to plot `profile` with.
    pub fn observe(&mut self, profile: &AngularProfile) -> f64 {
        match profile.kind() {
            ProfileKind::SumOfSquares => NORMALIZED_AXIS_MAX,
            ProfileKind::PeakCount => {
                let max = match self.saved_max {
                    Some(saved) => saved.max(profile.max()),
                    None => profile.max(),
                };
                self.saved_max = Some(max);
                max
            }
        }
    }

    pub fn reset(&mut self) {
        self.saved_max = None;
    }
}

/// Result of one completed pass, ready for a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisFrame {
    pub profile: AngularProfile,
    /// Y-axis maximum from [`DisplayScale::observe`].
    pub axis_max: f64,
    /// Rotation applied to the cached canvas, 0 for a fresh stroke.
    pub rotation_deg: i32,
}

/// Drives analysis passes for one canvas.
#[derive(Debug)]
pub struct AnalysisSession {
    params: AnalysisParams,
    original: Option<GrayImage>,
    scale: DisplayScale,
    last: Option<AnalysisFrame>,
}

impl AnalysisSession {
    pub fn new(params: AnalysisParams) -> Self {
        Self {
            params,
            original: None,
            scale: DisplayScale::new(),
            last: None,
        }
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Swap parameters; takes effect on the next pass.
    pub fn set_params(&mut self, params: AnalysisParams) {
        self.params = params;
    }

    pub fn display_scale(&self) -> &DisplayScale {
        &self.scale
    }

    pub fn last_frame(&self) -> Option<&AnalysisFrame> {
        self.last.as_ref()
    }

    pub fn cached_raster(&self) -> Option<&GrayImage> {
        self.original.as_ref()
    }

    /// A stroke finished: cache `raster` as the rotation source and analyze it.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, raster),
            fields(width = raster.width, height = raster.height)
        )
    )]
    pub fn on_raster_ready(&mut self, raster: GrayImage) -> Result<&AnalysisFrame, HoughError> {
        let profile = analyze(&raster.view(), &self.params).inspect_err(|err| {
            warn!("analysis pass skipped: {err}");
        })?;
        self.original = Some(raster);
        Ok(self.publish(profile, 0))
    }

    /// Rotation input changed: rotate the cached canvas and analyze it.
    ///
    /// `angle_deg` is clamped to `[0, 360]`. Returns `Ok(None)` when no canvas
    /// has been captured since the last clear.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub fn on_rotate(&mut self, angle_deg: i32) -> Result<Option<&AnalysisFrame>, HoughError> {
        let Some(original) = self.original.as_ref() else {
            debug!("rotation ignored: no canvas captured");
            return Ok(None);
        };

        let angle = angle_deg.clamp(0, MAX_ROTATION_DEG);
        let rotated = rotate_about_center(&original.view(), angle as f64, 0);
        let profile = analyze(&rotated.view(), &self.params).inspect_err(|err| {
            warn!("analysis pass skipped: {err}");
        })?;
        Ok(Some(self.publish(profile, angle)))
    }

    /// Forget the canvas, the last frame and the display scale.
    pub fn clear(&mut self) {
        self.original = None;
        self.last = None;
        self.scale.reset();
    }

    fn publish(&mut self, profile: AngularProfile, rotation_deg: i32) -> &AnalysisFrame {
        let axis_max = self.scale.observe(&profile);
        self.last.insert(AnalysisFrame {
            profile,
            axis_max,
            rotation_deg,
        })
    }
}
