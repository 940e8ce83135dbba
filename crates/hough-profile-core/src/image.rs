use crate::HoughError;

/// Borrowed 8-bit grayscale raster.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned 8-bit grayscale raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl<'a> GrayImageView<'a> {
    /// Check that the raster has a non-zero area and a matching buffer.
    pub fn validate(&self) -> Result<(), HoughError> {
        if self.width == 0 || self.height == 0 {
            return Err(HoughError::EmptyRaster {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .ok_or(HoughError::EmptyRaster {
                width: self.width,
                height: self.height,
            })?;
        if self.data.len() != expected {
            return Err(HoughError::BufferLength {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    /// Intensity at `(x, y)`, or `None` outside the raster.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.data.get(y as usize * self.width + x as usize).copied()
    }
}

impl GrayImage {
    /// Uniform canvas, e.g. the blank black drawing surface.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Convert an RGBA8 buffer to luma with BT.601 weights (alpha is ignored).
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Result<Self, HoughError> {
        if width == 0 || height == 0 {
            return Err(HoughError::EmptyRaster { width, height });
        }
        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(HoughError::BufferLength {
                expected,
                got: rgba.len(),
            });
        }

        let data = rgba
            .chunks_exact(4)
            .map(|px| {
                let y = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                y.round().clamp(0.0, 255.0) as u8
            })
            .collect();

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Write one pixel; coordinates outside the raster are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.view().get(x as i64, y as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_area_and_short_buffers() {
        let empty = GrayImageView {
            width: 0,
            height: 4,
            data: &[],
        };
        assert_eq!(
            empty.validate(),
            Err(HoughError::EmptyRaster {
                width: 0,
                height: 4
            })
        );

        let data = [0u8; 5];
        let short = GrayImageView {
            width: 2,
            height: 3,
            data: &data,
        };
        assert_eq!(
            short.validate(),
            Err(HoughError::BufferLength {
                expected: 6,
                got: 5
            })
        );
    }

    #[test]
    fn rgba_white_stroke_becomes_bright_luma() {
        let rgba = [0, 0, 0, 255, 255, 255, 255, 255, 255, 0, 0, 255];
        let img = GrayImage::from_rgba(3, 1, &rgba).expect("valid rgba");
        assert_eq!(img.data, vec![0, 255, 76]);
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let img = GrayImage::filled(3, 2, 7);
        let view = img.view();
        assert_eq!(view.get(2, 1), Some(7));
        assert_eq!(view.get(3, 0), None);
        assert_eq!(view.get(-1, 0), None);
    }
}
