use crate::ImageError;
use ocular_base::Tensor;

/// Pixel layout of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// A captured or decoded image, tagged with the rotation needed to bring
/// it upright.
///
/// Pixels are HWC `[height, width, channels]`. `rotation_degrees` follows
/// the camera convention: rotate the buffer clockwise by this amount to
/// display it upright. Frames are ephemeral; the preprocessor consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Tensor<u8>,
    format: PixelFormat,
    rotation_degrees: u32,
}

impl Frame {
    /// Wraps a pixel tensor, validating that its channel dimension matches
    /// the declared format.
    pub fn new(
        pixels: Tensor<u8>,
        format: PixelFormat,
        rotation_degrees: u32,
    ) -> Result<Self, ImageError> {
        if pixels.shape.len() != 3 {
            return Err(ImageError::UnsupportedFormat(format!(
                "expected HWC pixel tensor, got shape {:?}",
                pixels.shape
            )));
        }
        if pixels.shape[2] != format.channels() {
            return Err(ImageError::UnsupportedFormat(format!(
                "{:?} needs {} channels, tensor has {}",
                format,
                format.channels(),
                pixels.shape[2]
            )));
        }
        Ok(Self {
            pixels,
            format,
            rotation_degrees,
        })
    }

    pub fn height(&self) -> usize {
        self.pixels.shape[0]
    }

    pub fn width(&self) -> usize {
        self.pixels.shape[1]
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn rotation_degrees(&self) -> u32 {
        self.rotation_degrees
    }

    pub fn pixels(&self) -> &Tensor<u8> {
        &self.pixels
    }

    /// Consumes the frame into an RGB8 pixel tensor, dropping the alpha
    /// channel if present.
    pub fn into_rgb(self) -> Result<Tensor<u8>, ImageError> {
        match self.format {
            PixelFormat::Rgb8 => Ok(self.pixels),
            PixelFormat::Rgba8 => {
                let h = self.pixels.shape[0];
                let w = self.pixels.shape[1];
                let rgb = rgba_to_rgb(&self.pixels.data);
                Ok(Tensor::new(vec![h, w, 3], rgb)?)
            }
        }
    }
}

/// Drops the alpha byte from packed RGBA data.
pub fn rgba_to_rgb(data: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(data.len() / 4 * 3);
    for px in data.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}
