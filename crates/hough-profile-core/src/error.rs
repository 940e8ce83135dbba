/// Errors returned by the analysis pipeline.
///
/// Every variant is an invalid-input failure: the pass is rejected before any
/// voting happens and no carried state is touched.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HoughError {
    #[error("raster has zero area (width={width}, height={height})")]
    EmptyRaster { width: usize, height: usize },

    #[error("invalid raster buffer length (expected {expected} pixels, got {got})")]
    BufferLength { expected: usize, got: usize },

    #[error("theta step must be in (0, 180] degrees and coarse enough to allocate (got {0})")]
    InvalidThetaStep(f64),

    #[error("rho step must be positive and coarse enough to allocate (got {0})")]
    InvalidRhoStep(f64),
}

impl HoughError {
    /// Whether the error rejects the input itself (as opposed to a runtime failure).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            HoughError::EmptyRaster { .. }
                | HoughError::BufferLength { .. }
                | HoughError::InvalidThetaStep(_)
                | HoughError::InvalidRhoStep(_)
        )
    }
}
