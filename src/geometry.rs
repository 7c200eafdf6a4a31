use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use imageproc::rect::Rect;

/// Smallest rect containing every point, or `None` for an empty slice.
pub fn bounding_rect(points: &[Point<i32>]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    Some(Rect::at(min_x, min_y).of_size((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32))
}

pub fn center_of_rect(rect: &Rect) -> Point<f32> {
    Point::new(
        rect.left() as f32 + rect.width() as f32 / 2.0,
        rect.top() as f32 + rect.height() as f32 / 2.0,
    )
}

/// Width divided by height.
pub fn aspect_ratio(rect: &Rect) -> f32 {
    rect.width() as f32 / rect.height() as f32
}

/// Rasterizes the polygon traced by `points` into a mask covering `bounds`,
/// boundary included. Enclosed pixels are set to `value`.
///
/// `points` must lie inside `bounds`. A repeated closing point is ignored.
pub fn polygon_mask(points: &[Point<i32>], bounds: &Rect, value: Luma<u8>) -> GrayImage {
    let mut mask = GrayImage::new(bounds.width(), bounds.height());
    let mut outline = points
        .iter()
        .map(|p| Point::new(p.x - bounds.left(), p.y - bounds.top()))
        .collect::<Vec<Point<i32>>>();
    while outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }

    match outline.as_slice() {
        [] => {}
        [only] => mask.put_pixel(only.x as u32, only.y as u32, value),
        _ => draw_polygon_mut(&mut mask, &outline, value),
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_rect_is_inclusive() {
        let rect = bounding_rect(&[Point::new(3, 4), Point::new(5, 9), Point::new(4, 6)])
            .expect("points");
        assert_eq!(rect.left(), 3);
        assert_eq!(rect.top(), 4);
        assert_eq!(rect.width(), 3);
        assert_eq!(rect.height(), 6);

        let single = bounding_rect(&[Point::new(7, 7)]).expect("point");
        assert_eq!((single.width(), single.height()), (1, 1));
    }

    #[test]
    fn center_and_aspect_ratio() {
        let rect = Rect::at(10, 10).of_size(30, 20);
        assert_eq!(center_of_rect(&rect), Point::new(25.0, 20.0));
        assert_eq!(aspect_ratio(&rect), 1.5);
    }

    fn marked(mask: &GrayImage) -> usize {
        mask.pixels().filter(|p| p.0[0] == u8::MAX).count()
    }

    #[test]
    fn polygon_mask_fills_a_diamond() {
        // corners at (2,0), (4,2), (2,4), (0,2)
        let points = vec![
            Point::new(2, 0),
            Point::new(3, 1),
            Point::new(4, 2),
            Point::new(3, 3),
            Point::new(2, 4),
            Point::new(1, 3),
            Point::new(0, 2),
            Point::new(1, 1),
        ];
        let bounds = bounding_rect(&points).expect("points");
        let mask = polygon_mask(&points, &bounds, Luma([u8::MAX]));
        assert_eq!(mask.dimensions(), (5, 5));
        assert_eq!(marked(&mask), 13);
        assert_eq!(mask.get_pixel(2, 2).0[0], u8::MAX);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn polygon_mask_leaves_concave_openings_empty() {
        // a "U": 4 px arms, 4 px base, 30x30 box, open at the top
        let points = vec![
            Point::new(10, 10),
            Point::new(13, 10),
            Point::new(13, 36),
            Point::new(36, 36),
            Point::new(36, 10),
            Point::new(39, 10),
            Point::new(39, 39),
            Point::new(10, 39),
        ];
        let bounds = bounding_rect(&points).expect("points");
        let mask = polygon_mask(&points, &bounds, Luma([u8::MAX]));
        assert_eq!(mask.dimensions(), (30, 30));
        assert_eq!(marked(&mask), 4 * 26 * 2 + 30 * 4);
        // inside the opening
        assert_eq!(mask.get_pixel(15, 10).0[0], 0);
        assert_eq!(mask.get_pixel(15, 25).0[0], 0);
    }

    #[test]
    fn polygon_mask_handles_degenerate_outlines() {
        let bounds = Rect::at(5, 5).of_size(1, 1);
        let single = polygon_mask(&[Point::new(5, 5)], &bounds, Luma([u8::MAX]));
        assert_eq!(marked(&single), 1);

        // closing point repeats the first
        let points = vec![
            Point::new(0, 0),
            Point::new(3, 0),
            Point::new(3, 3),
            Point::new(0, 3),
            Point::new(0, 0),
        ];
        let bounds = bounding_rect(&points).expect("points");
        assert_eq!(marked(&polygon_mask(&points, &bounds, Luma([u8::MAX]))), 16);
    }
}
