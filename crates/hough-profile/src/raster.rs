//! Adapters between `image` buffers and the pipeline's raster types.

use crate::{GrayImage, GrayImageView, HoughError};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum RasterLoadError {
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
    #[error(transparent)]
    Raster(#[from] HoughError),
}

/// Decode an image file and convert it to 8-bit luma.
pub fn load_raster(path: impl AsRef<Path>) -> Result<GrayImage, RasterLoadError> {
    let img = ::image::open(path)?.to_luma8();
    let raster = raster_from_luma(img);
    raster.view().validate()?;
    Ok(raster)
}

/// Borrow an `image::GrayImage` as a pipeline view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

pub fn raster_from_luma(img: ::image::GrayImage) -> GrayImage {
    let (width, height) = (img.width() as usize, img.height() as usize);
    GrayImage {
        width,
        height,
        data: img.into_raw(),
    }
}

/// Convert a pipeline raster back into an `image` buffer, e.g. to save it.
pub fn raster_to_luma(raster: &GrayImage) -> Option<::image::GrayImage> {
    ::image::GrayImage::from_raw(
        u32::try_from(raster.width).ok()?,
        u32::try_from(raster.height).ok()?,
        raster.data.clone(),
    )
}

/// Build a raster from a raw grayscale buffer.
pub fn raster_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<GrayImage, HoughError> {
    let raster = GrayImage {
        width: width as usize,
        height: height as usize,
        data: pixels.to_vec(),
    };
    raster.view().validate()?;
    Ok(raster)
}

/// Build a raster from a raw RGBA8 buffer, as read back from a drawing canvas.
pub fn raster_from_rgba_u8(
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<GrayImage, HoughError> {
    GrayImage::from_rgba(width as usize, height as usize, rgba)
}
