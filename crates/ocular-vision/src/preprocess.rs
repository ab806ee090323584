use crate::VisionError;
use log::warn;
use ocular_base::Tensor;
use ocular_image::Frame;

/// Converts a raw frame into a model input tensor.
///
/// Orientation is normalized first: the pixel buffer is rotated clockwise
/// by the frame's rotation tag (0/90/180/270; any other value is treated as
/// 0 and logged). The upright image is then bilinear-resized to
/// `input_size x input_size` and rescaled to NCHW f32 `[1, 3, S, S]` in
/// `[0, 1]`.
///
/// Consumes the frame; the raw buffer is released here.
pub fn preprocess(frame: Frame, input_size: usize) -> Result<Tensor<f32>, VisionError> {
    if input_size == 0 {
        return Err(VisionError::Config(
            "input size must be non-zero".to_string(),
        ));
    }

    let rotation = frame.rotation_degrees();
    let rgb = frame.into_rgb()?;
    let upright = rotate_upright(rgb, rotation)?;
    resize_normalize(&upright, input_size)
}

/// Rotates an HWC pixel tensor clockwise to bring it upright.
fn rotate_upright(pixels: Tensor<u8>, rotation_degrees: u32) -> Result<Tensor<u8>, VisionError> {
    match rotation_degrees {
        0 => Ok(pixels),
        90 => quarter_turn_cw(&pixels),
        180 => half_turn(&pixels),
        270 => {
            let once = quarter_turn_cw(&pixels)?;
            half_turn(&once)
        }
        other => {
            warn!("unexpected rotation {other} degrees, treating as 0");
            Ok(pixels)
        }
    }
}

fn quarter_turn_cw(t: &Tensor<u8>) -> Result<Tensor<u8>, VisionError> {
    let (h, w, c) = (t.shape[0], t.shape[1], t.shape[2]);
    let mut out = vec![0u8; t.data.len()];

    // Source pixel (r, x) lands at (x, h - 1 - r); output is w rows of h columns.
    for y in 0..w {
        for x in 0..h {
            let src = ((h - 1 - x) * w + y) * c;
            let dst = (y * h + x) * c;
            out[dst..dst + c].copy_from_slice(&t.data[src..src + c]);
        }
    }

    Ok(Tensor::new(vec![w, h, c], out)?)
}

fn half_turn(t: &Tensor<u8>) -> Result<Tensor<u8>, VisionError> {
    let (h, w, c) = (t.shape[0], t.shape[1], t.shape[2]);
    let mut out = vec![0u8; t.data.len()];

    for y in 0..h {
        for x in 0..w {
            let src = ((h - 1 - y) * w + (w - 1 - x)) * c;
            let dst = (y * w + x) * c;
            out[dst..dst + c].copy_from_slice(&t.data[src..src + c]);
        }
    }

    Ok(Tensor::new(vec![h, w, c], out)?)
}

/// Bilinear-resizes HWC u8 RGB to `[1, 3, size, size]` f32 in `[0, 1]`.
fn resize_normalize(t: &Tensor<u8>, size: usize) -> Result<Tensor<f32>, VisionError> {
    if t.shape.len() != 3 || t.shape[2] != 3 {
        return Err(VisionError::Shape {
            expected: "[H, W, 3]".to_string(),
            got: format!("{:?}", t.shape),
        });
    }
    let (h, w) = (t.shape[0], t.shape[1]);
    if h == 0 || w == 0 {
        return Err(VisionError::Shape {
            expected: "non-zero dimensions".to_string(),
            got: format!("{h}x{w}"),
        });
    }

    let mut out = vec![0.0f32; 3 * size * size];
    let scale_y = h as f32 / size as f32;
    let scale_x = w as f32 / size as f32;

    for oy in 0..size {
        let sy = ((oy as f32 + 0.5) * scale_y - 0.5).max(0.0);
        let y0 = (sy.floor() as usize).min(h - 1);
        let y1 = (y0 + 1).min(h - 1);
        let fy = sy - y0 as f32;

        for ox in 0..size {
            let sx = ((ox as f32 + 0.5) * scale_x - 0.5).max(0.0);
            let x0 = (sx.floor() as usize).min(w - 1);
            let x1 = (x0 + 1).min(w - 1);
            let fx = sx - x0 as f32;

            for ch in 0..3 {
                let p00 = t.data[(y0 * w + x0) * 3 + ch] as f32;
                let p01 = t.data[(y0 * w + x1) * 3 + ch] as f32;
                let p10 = t.data[(y1 * w + x0) * 3 + ch] as f32;
                let p11 = t.data[(y1 * w + x1) * 3 + ch] as f32;

                let top = p00 + (p01 - p00) * fx;
                let bottom = p10 + (p11 - p10) * fx;
                let value = top + (bottom - top) * fy;

                out[ch * size * size + oy * size + ox] = value / 255.0;
            }
        }
    }

    Ok(Tensor::new(vec![1, 3, size, size], out)?)
}
