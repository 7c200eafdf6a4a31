use imageproc::contours::{find_contours, BorderType};
use log::debug;
use logging_timer::time;

use crate::types::{BinaryImage, Shape};

/// Finds the outermost boundary of every foreground region. Holes, and
/// regions nested inside holes, are not reported.
#[time]
pub fn find_shapes(binary: &BinaryImage) -> Vec<Shape> {
    let contours = find_contours::<i32>(binary.as_gray());
    let shapes = contours
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .filter_map(|contour| Shape::from_points(contour.points))
        .collect::<Vec<Shape>>();

    debug!("found {} outer shapes", shapes.len());
    shapes
}

#[cfg(test)]
mod tests {
    use image::GrayImage;
    use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

    use super::*;
    use crate::types::{BACKGROUND, MARKED};

    fn binary_with(rects: &[Rect]) -> BinaryImage {
        let mut img = GrayImage::from_pixel(100, 60, BACKGROUND);
        for rect in rects {
            draw_filled_rect_mut(&mut img, *rect, MARKED);
        }
        BinaryImage::from_gray(&img)
    }

    #[test]
    fn empty_image_has_no_shapes() {
        assert!(find_shapes(&BinaryImage::blank(30, 30)).is_empty());
    }

    #[test]
    fn each_region_is_one_shape() {
        let binary = binary_with(&[
            Rect::at(5, 5).of_size(10, 10),
            Rect::at(40, 20).of_size(30, 12),
        ]);
        let mut shapes = find_shapes(&binary);
        shapes.sort_by_key(|s| s.bounds.left());

        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].bounds, Rect::at(5, 5).of_size(10, 10));
        assert_eq!(shapes[1].bounds, Rect::at(40, 20).of_size(30, 12));
    }

    #[test]
    fn ring_yields_only_its_outer_boundary() {
        let mut img = GrayImage::from_pixel(60, 60, BACKGROUND);
        draw_filled_rect_mut(&mut img, Rect::at(10, 10).of_size(30, 30), MARKED);
        draw_filled_rect_mut(&mut img, Rect::at(15, 15).of_size(20, 20), BACKGROUND);
        // a speck inside the hole is nested and ignored
        draw_filled_rect_mut(&mut img, Rect::at(24, 24).of_size(2, 2), MARKED);

        let shapes = find_shapes(&BinaryImage::from_gray(&img));
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].bounds, Rect::at(10, 10).of_size(30, 30));
    }
}
