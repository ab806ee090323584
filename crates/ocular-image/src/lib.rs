//! Image decoding for the ocular pipeline.
//!
//! Wraps the `image` crate to decode picked or captured image files into
//! RGB8 `Frame`s in HWC layout `[height, width, 3]`.

pub mod error;
pub mod frame;

pub use error::ImageError;
pub use frame::{rgba_to_rgb, Frame, PixelFormat};

use ocular_base::Tensor;

/// Decodes an image from raw bytes into an RGB8 frame.
///
/// The format is auto-detected by the `image` crate; any source pixel type
/// is converted to 8-bit RGB, which is what the model input path expects.
/// Decoded frames carry rotation 0 — files, unlike live camera buffers,
/// are already upright.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is
/// unsupported.
pub fn decode_image(data: &[u8]) -> Result<Frame, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = Tensor::new(
        vec![height as usize, width as usize, 3],
        rgb.into_raw(),
    )?;
    Frame::new(pixels, PixelFormat::Rgb8, 0)
}

/// Reads and decodes an image file.
///
/// # Errors
///
/// Returns `ImageError::Io` if the file cannot be read, or a decode error
/// from `decode_image`.
pub fn load_image(path: impl AsRef<std::path::Path>) -> Result<Frame, ImageError> {
    let data = std::fs::read(path.as_ref())?;
    decode_image(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates_image::{ImageBuffer, Rgb};

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([x as u8, y as u8, 128u8])
        });
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            crates_image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_to_rgb_frame() {
        let frame = decode_image(&encode_png(4, 2)).unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.format(), PixelFormat::Rgb8);
        assert_eq!(frame.rotation_degrees(), 0);
        // pixel (x=1, y=1) encodes its own coordinates
        let px = &frame.pixels().data[(1 * 4 + 1) * 3..(1 * 4 + 1) * 3 + 3];
        assert_eq!(px, &[1, 1, 128]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_image(&[0u8, 1, 2, 3]);
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn test_load_image_missing_file() {
        let result = load_image("/nonexistent/path.png");
        assert!(matches!(result, Err(ImageError::Io(_))));
    }
}
