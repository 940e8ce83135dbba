//! Live line-orientation profiles for drawn rasters.
//!
//! This crate provides:
//! - re-exports of the numeric pipeline from `hough-profile-core`,
//! - [`AnalysisSession`], which reruns the pipeline on every finished stroke
//!   or rotation and keeps the display scale between passes,
//! - JSON config/report helpers in [`io`],
//! - (feature `image`) raster loading from image files and buffers,
//! - (feature `cli`) the `hough-profile` command-line tool.
//!
//! ## Quickstart
//!
//! ```
//! use hough_profile::{AnalysisParams, AnalysisSession, GrayImage};
//!
//! let mut canvas = GrayImage::filled(100, 100, 0);
//! for x in 10..=90 {
//!     canvas.set(x, 50, 255);
//! }
//!
//! let mut session = AnalysisSession::new(AnalysisParams::default());
//! let frame = session.on_raster_ready(canvas).unwrap();
//! assert_eq!(frame.profile.dominant_theta_deg(), Some(90.0));
//!
//! let rotated = session.on_rotate(90).unwrap().expect("canvas cached");
//! assert_eq!(rotated.profile.dominant_theta_deg(), Some(0.0));
//! ```
//!
//! ## API map
//! - `hough_profile::core`: binarizer, accumulator, reducer, line detection, rotation.
//! - `hough_profile::session`: stateful pass driver and display scaling.
//! - `hough_profile::io`: JSON config and report.
//! - `hough_profile::raster` (feature `image`): `image`-crate adapters.

pub use hough_profile_core as core;

pub use hough_profile_core::{
    analyze, clamp_peaks, AnalysisParams, AngleSampling, AngularProfile, BinarizeParams,
    GrayImage, GrayImageView, HoughError, LineDetectionParams, ProfileKind, ReductionMode,
};

pub mod io;
pub mod session;

#[cfg(feature = "image")]
pub mod raster;

pub use session::{AnalysisFrame, AnalysisSession, DisplayScale, NORMALIZED_AXIS_MAX};
