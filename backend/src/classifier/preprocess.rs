use image::imageops::{self, FilterType};
use ndarray::Array4;

use super::{ImageTensor, InferenceError};

/// Side length of the square network input.
pub const INPUT_SIZE: u32 = 224;

/// Decodes an uploaded image into a `1 x 224 x 224 x 3` batch of raw RGB
/// values in `0.0..=255.0`. Scaling is left to the network.
pub fn preprocess(image: &[u8]) -> Result<ImageTensor, InferenceError> {
    let decoded = image::load_from_memory(image)
        .map_err(|e| InferenceError::Preprocessing(e.to_string()))?;

    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);

    let side = INPUT_SIZE as usize;
    let values: Vec<f32> = resized.into_raw().into_iter().map(f32::from).collect();
    Array4::from_shape_vec((1, side, side, 3), values)
        .map_err(|e| InferenceError::Preprocessing(e.to_string()))
}
