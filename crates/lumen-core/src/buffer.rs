use image::RgbaImage;
use ndarray::{Array3, ArrayViewMut3};

use crate::consts::CHANNELS;
use crate::error::{LumenError, Result};

/// An RGBA8 image: the unit every filter reads and writes.
///
/// Samples are stored as an `(height, width, 4)` array in standard layout,
/// so the flat sample slice is row-major R,G,B,A.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Fully transparent black buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        check_dimensions(width, height)?;
        let data = Array3::from_shape_fn((height as usize, width as usize, CHANNELS), |(_, _, c)| {
            rgba[c]
        });
        Ok(Self { data })
    }

    /// Wrap raw row-major RGBA samples. Fails unless `samples.len() == w*h*4`.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * CHANNELS;
        if samples.len() != expected {
            return Err(LumenError::BufferSize {
                expected,
                actual: samples.len(),
            });
        }
        let data = Array3::from_shape_vec((height as usize, width as usize, CHANNELS), samples)
            .map_err(|_| LumenError::InvalidDimensions { width, height })?;
        Ok(Self { data })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self>
    where
        F: Fn(u32, u32) -> [u8; 4],
    {
        check_dimensions(width, height)?;
        let mut data = Array3::<u8>::zeros((height as usize, width as usize, CHANNELS));
        for y in 0..height as usize {
            for x in 0..width as usize {
                let px = f(x as u32, y as u32);
                for c in 0..CHANNELS {
                    data[[y, x, c]] = px[c];
                }
            }
        }
        Ok(Self { data })
    }

    pub(crate) fn from_array(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, CHANNELS);
        Self { data }
    }

    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    pub fn pixel_count(&self) -> usize {
        let (h, w, _) = self.data.dim();
        h * w
    }

    /// Row-major RGBA samples.
    pub fn samples(&self) -> &[u8] {
        self.data
            .as_slice()
            .expect("pixel buffer is always in standard layout")
    }

    pub fn into_samples(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            self.data.into_raw_vec_and_offset().0
        } else {
            self.data.iter().copied().collect()
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let (x, y) = (x as usize, y as usize);
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let (x, y) = (x as usize, y as usize);
        for (c, v) in rgba.into_iter().enumerate() {
            self.data[[y, x, c]] = v;
        }
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// Mutable view of the samples. The shape cannot be changed through it.
    pub fn data_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.data.view_mut()
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width(), self.height(), self.samples().to_vec())
            .expect("buffer size matches dimensions")
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = LumenError;

    fn try_from(img: RgbaImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Self::from_raw(w, h, img.into_raw())
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(LumenError::InvalidDimensions { width, height });
    }
    Ok(())
}
