//! Core numeric pipeline for line-orientation profiles.
//!
//! A raster goes through three stages:
//! 1. [`binarize`] splits pixels into foreground/background by a fixed threshold.
//! 2. [`build_accumulator`] casts one (rho, theta) vote per foreground pixel
//!    and theta bucket, with rho measured from the image center.
//! 3. [`reduce_to_profile`] collapses the accumulator along rho into one
//!    energy value per theta bucket.
//!
//! [`analyze`] runs all three. Everything here is pure and stateless; the
//! running display maximum and the cached canvas live in the `hough-profile`
//! facade crate.
//!
//! ```
//! use hough_profile_core::{analyze, AnalysisParams, GrayImage};
//!
//! let mut img = GrayImage::filled(100, 100, 0);
//! for x in 10..=90 {
//!     img.set(x, 50, 255);
//! }
//! let profile = analyze(&img.view(), &AnalysisParams::default()).unwrap();
//! assert_eq!(profile.argmax(), Some(90));
//! ```

mod accumulator;
mod binarize;
mod clamp;
mod error;
mod image;
mod logger;
mod peaks;
mod pipeline;
mod profile;
mod rotate;
mod sampling;

pub use accumulator::{build_accumulator, Accumulator};
pub use binarize::{binarize, BinarizeParams, BinaryGrid, MIDTONE_THRESHOLD, STROKE_THRESHOLD};
pub use clamp::{clamp_peaks, DEFAULT_CLAMP_FACTOR};
pub use error::HoughError;
pub use image::{GrayImage, GrayImageView};
pub use peaks::{detect_lines, HoughLine, LineDetectionParams};
pub use pipeline::{analyze, AnalysisParams};
pub use profile::{reduce_to_profile, AngularProfile, ProfileKind, ReductionMode};
pub use rotate::{rotate_about_center, rotation_about_center};
pub use sampling::AngleSampling;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_logging, Verbosity};
