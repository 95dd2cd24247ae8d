use crate::error::{EcoSortError, EcoSortResult};
use crate::image_preprocessor::input_spec::{InputSpec, ResizeMode, TensorLayout};
use image::{imageops, DynamicImage, RgbImage};
use tract_onnx::prelude::*;

pub struct PreprocessedImage {
    /// The decoded source, kept for previews and reports.
    pub image: DynamicImage,
    pub tensor: Tensor,
}

/// The only place input bytes are sniffed and decoded.
pub fn decode_image(bytes: &[u8]) -> EcoSortResult<DynamicImage> {
    if bytes.is_empty() {
        return Err(EcoSortError::invalid_image("no image data"));
    }

    let image = image::load_from_memory(bytes)?;

    if image.width() == 0 || image.height() == 0 {
        return Err(EcoSortError::invalid_image(format!(
            "image has zero size ({}x{})",
            image.width(),
            image.height()
        )));
    }

    Ok(image)
}

pub fn resize_image(image: &DynamicImage, width: u32, height: u32, mode: ResizeMode) -> RgbImage {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    match mode {
        ResizeMode::Stretch => rgb
            .resize_exact(width, height, imageops::FilterType::CatmullRom)
            .to_rgb8(),
        ResizeMode::Letterbox => {
            let (w, h) = (rgb.width() as f32, rgb.height() as f32);
            let scale = (width as f32 / w).min(height as f32 / h);
            let new_w = ((w * scale).round() as u32).clamp(1, width);
            let new_h = ((h * scale).round() as u32).clamp(1, height);

            let scaled = rgb
                .resize_exact(new_w, new_h, imageops::FilterType::CatmullRom)
                .to_rgb8();

            let mut padded = RgbImage::new(width, height);
            let x_offset = (width - new_w) / 2;
            let y_offset = (height - new_h) / 2;
            imageops::overlay(&mut padded, &scaled, x_offset as i64, y_offset as i64);

            padded
        }
    }
}

pub fn image_to_tensor(image: &DynamicImage, spec: &InputSpec) -> Tensor {
    let rgb = resize_image(image, spec.width, spec.height, spec.resize);
    let (w, h) = (spec.width as usize, spec.height as usize);
    let normalization = spec.normalization;

    match spec.layout {
        TensorLayout::Nhwc => tract_ndarray::Array4::from_shape_fn((1, h, w, 3), |(_, y, x, c)| {
            normalization.apply(c, rgb.get_pixel(x as u32, y as u32)[c])
        })
        .into_tensor(),
        TensorLayout::Nchw => tract_ndarray::Array4::from_shape_fn((1, 3, h, w), |(_, c, y, x)| {
            normalization.apply(c, rgb.get_pixel(x as u32, y as u32)[c])
        })
        .into_tensor(),
    }
}

pub fn preprocess(bytes: &[u8], spec: &InputSpec) -> EcoSortResult<PreprocessedImage> {
    let image = decode_image(bytes)?;
    let tensor = image_to_tensor(&image, spec);
    Ok(PreprocessedImage { image, tensor })
}
