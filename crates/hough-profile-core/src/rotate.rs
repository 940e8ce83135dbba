//! Canvas rotation about the image center.
//!
//! Produces the rotated rasters the pipeline is fed after a rotation input;
//! the pipeline itself never rotates anything.

use crate::{GrayImage, GrayImageView};
use nalgebra::{Matrix3, Vector3};

/// Affine map rotating pixel coordinates by `angle_deg` about `(W/2, H/2)`.
///
/// Image coordinates have y pointing down, so positive angles turn the
/// content clockwise on screen.
pub fn rotation_about_center(width: usize, height: usize, angle_deg: f64) -> Matrix3<f64> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let (s, c) = angle_deg.to_radians().sin_cos();

    let to_center = Matrix3::new(
        1.0, 0.0, -cx, //
        0.0, 1.0, -cy, //
        0.0, 0.0, 1.0,
    );
    let rot = Matrix3::new(
        c, -s, 0.0, //
        s, c, 0.0, //
        0.0, 0.0, 1.0,
    );
    let back = Matrix3::new(
        1.0, 0.0, cx, //
        0.0, 1.0, cy, //
        0.0, 0.0, 1.0,
    );
    back * rot * to_center
}

/// Rotate `src` by `angle_deg` with nearest-neighbour sampling.
///
/// Each destination pixel center is mapped back into the source; pixels that
/// land outside it are filled with `background`.
pub fn rotate_about_center(src: &GrayImageView<'_>, angle_deg: f64, background: u8) -> GrayImage {
    let (w, h) = (src.width, src.height);
    let src_from_dst = rotation_about_center(w, h, -angle_deg);
    let mut out = vec![background; w * h];

    for y in 0..h {
        for x in 0..w {
            let p = src_from_dst * Vector3::new(x as f64 + 0.5, y as f64 + 0.5, 1.0);
            let sx = p[0].floor() as i64;
            let sy = p[1].floor() as i64;
            if let Some(v) = src.get(sx, sy) {
                out[y * w + x] = v;
            }
        }
    }

    GrayImage {
        width: w,
        height: h,
        data: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GrayImage {
        let mut img = GrayImage::filled(6, 4, 0);
        img.set(0, 0, 10);
        img.set(5, 0, 20);
        img.set(2, 3, 30);
        img
    }

    #[test]
    fn zero_and_full_turn_are_identity() {
        let img = sample();
        assert_eq!(rotate_about_center(&img.view(), 0.0, 0), img);
        assert_eq!(rotate_about_center(&img.view(), 360.0, 0), img);
    }

    #[test]
    fn half_turn_mirrors_both_axes() {
        let img = sample();
        let out = rotate_about_center(&img.view(), 180.0, 0);
        assert_eq!(out.get(5, 3), Some(10));
        assert_eq!(out.get(0, 3), Some(20));
        assert_eq!(out.get(3, 0), Some(30));
    }

    #[test]
    fn quarter_turn_is_clockwise() {
        let mut img = GrayImage::filled(4, 4, 0);
        img.set(3, 0, 200); // top-right
        let out = rotate_about_center(&img.view(), 90.0, 0);
        assert_eq!(out.get(3, 3), Some(200)); // bottom-right
        assert_eq!(out.data.iter().filter(|&&v| v > 0).count(), 1);
    }

    #[test]
    fn uncovered_pixels_take_background() {
        let img = GrayImage::filled(20, 10, 255);
        let out = rotate_about_center(&img.view(), 90.0, 7);
        // the 10-pixel-tall source cannot cover the left and right ends
        assert_eq!(out.get(0, 5), Some(7));
        assert_eq!(out.get(19, 5), Some(7));
        assert_eq!(out.get(10, 5), Some(255));
    }
}
