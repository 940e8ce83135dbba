use crate::{
    binarize, build_accumulator, reduce_to_profile, AngleSampling, AngularProfile,
    BinarizeParams, GrayImageView, HoughError, ReductionMode,
};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Parameters of one analysis pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub binarize: BinarizeParams,
    pub sampling: AngleSampling,
    pub reduction: ReductionMode,
    /// Cap outliers with [`crate::clamp_peaks`] after reduction.
    pub clamp_factor: Option<f64>,
}

/// Raster -> binary grid -> accumulator -> angular profile.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(raster, params),
        fields(width = raster.width, height = raster.height)
    )
)]
pub fn analyze(
    raster: &GrayImageView<'_>,
    params: &AnalysisParams,
) -> Result<AngularProfile, HoughError> {
    params.sampling.validate()?;
    let grid = binarize(raster, &params.binarize)?;
    let acc = build_accumulator(&grid, &params.sampling)?;
    let profile = reduce_to_profile(&acc, &params.reduction);

    let profile = match params.clamp_factor {
        Some(factor) => profile.clamped(factor),
        None => profile,
    };

    debug!(
        "{}x{} raster, {} foreground, {:?} profile peak {:?}",
        raster.width,
        raster.height,
        grid.count_foreground(),
        profile.kind(),
        profile.dominant_theta_deg()
    );
    Ok(profile)
}
