use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgb};
use logging_timer::time;

use crate::error::GradingError;

pub const WHITE: Luma<u8> = Luma([u8::MAX]);
pub const BLACK: Luma<u8> = Luma([u8::MIN]);

pub const WHITE_RGB: Rgb<u8> = Rgb([255, 255, 255]);
pub const GRAY: Rgb<u8> = Rgb([160, 160, 160]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 200, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const ORANGE: Rgb<u8> = Rgb([255, 165, 0]);
pub const PURPLE: Rgb<u8> = Rgb([128, 0, 128]);
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
pub const PINK: Rgb<u8> = Rgb([255, 0, 255]);

pub const RAINBOW: [Rgb<u8>; 6] = [RED, ORANGE, GREEN, CYAN, BLUE, PURPLE];

/// Decodes raw bytes of any supported format into an image. The format is
/// sniffed from the bytes themselves, not from a file name.
#[time]
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, GradingError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| GradingError::ImageDecode(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(GradingError::ImageDecode(format!(
            "image has no pixels ({}x{})",
            img.width(),
            img.height()
        )));
    }

    Ok(img)
}

/// Determines the number of pixels in an image that match the given luma.
pub fn count_pixels(img: &GrayImage, luma: &Luma<u8>) -> u32 {
    img.pixels().filter(|p| *p == luma).count() as u32
}

/// Smallest and largest intensity in the image, or `None` if it is empty.
pub fn intensity_range(img: &GrayImage) -> Option<(u8, u8)> {
    img.pixels().fold(None, |range, pixel| {
        let value = pixel.0[0];
        match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::ImageOutputFormat;

    use super::*;

    #[test]
    fn decodes_png_bytes() {
        let img = GrayImage::from_pixel(4, 3, WHITE);
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(img)
            .write_to(&mut bytes, ImageOutputFormat::Png)
            .expect("encode png");

        let decoded = decode_image(bytes.get_ref()).expect("decodes");
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn rejects_non_image_bytes() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(GradingError::ImageDecode(_))));
    }

    #[test]
    fn rejects_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(GradingError::ImageDecode(_))));
    }

    #[test]
    fn counts_and_ranges() {
        let mut img = GrayImage::from_pixel(3, 3, WHITE);
        img.put_pixel(0, 0, BLACK);
        img.put_pixel(2, 2, Luma([90]));
        assert_eq!(count_pixels(&img, &WHITE), 7);
        assert_eq!(count_pixels(&img, &BLACK), 1);
        assert_eq!(intensity_range(&img), Some((0, 255)));
        assert_eq!(intensity_range(&GrayImage::new(0, 0)), None);
    }
}
