use image::{DynamicImage, GenericImageView, GrayImage};
use imageproc::{
    contrast::{otsu_level, threshold},
    filter::gaussian_blur_f32,
};
use log::debug;
use logging_timer::time;
use serde::{Deserialize, Serialize};

use crate::{error::GradingError, image_utils::intensity_range, types::BinaryImage};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreprocessOptions {
    /// Standard deviation of the smoothing kernel. Values `<= 0` skip smoothing.
    pub blur_sigma: f32,

    /// Smoothed images whose intensity range is narrower than this are treated
    /// as blank paper instead of being split in two by Otsu.
    pub min_contrast: u8,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            // matches a 5x5 kernel
            blur_sigma: 1.1,
            min_contrast: 32,
        }
    }
}

/// Output of [`preprocess`].
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Smoothed grayscale image.
    pub gray: GrayImage,
    /// Otsu-thresholded image with ink as foreground.
    pub binary: BinaryImage,
    /// Threshold level that separated ink from paper, if the image had enough
    /// contrast to pick one.
    pub level: Option<u8>,
}

/// Converts an image to grayscale, smooths it, and binarizes it with an
/// automatically selected threshold so that dark marks become foreground.
#[time]
pub fn preprocess(
    image: &DynamicImage,
    options: &PreprocessOptions,
) -> Result<Preprocessed, GradingError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(GradingError::ImageDecode(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    let gray = image.to_luma8();
    let gray = if options.blur_sigma > 0.0 {
        gaussian_blur_f32(&gray, options.blur_sigma)
    } else {
        gray
    };

    let (binary, level) = binarize(&gray, options.min_contrast);
    debug!(
        "preprocessed {}x{} image, threshold level {:?}",
        width, height, level
    );

    Ok(Preprocessed {
        gray,
        binary,
        level,
    })
}

/// Otsu thresholding with inverted polarity: pixels at or below the level are
/// ink. Low-contrast images produce an all-background result.
fn binarize(gray: &GrayImage, min_contrast: u8) -> (BinaryImage, Option<u8>) {
    let has_contrast = intensity_range(gray)
        .map(|(min, max)| max - min >= min_contrast)
        .unwrap_or(false);
    if !has_contrast {
        return (BinaryImage::blank(gray.width(), gray.height()), None);
    }

    let level = otsu_level(gray);
    let mut paper = threshold(gray, level);
    image::imageops::invert(&mut paper);
    (BinaryImage::from_gray(&paper), Some(level))
}
