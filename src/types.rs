use image::{GrayImage, Luma};
use imageproc::{point::Point, rect::Rect};
use serde::{Deserialize, Serialize};

use crate::geometry::{aspect_ratio, center_of_rect, polygon_mask};

/// Number of answer options printed on every question row.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Luma value of a marked (ink) pixel in a [`BinaryImage`].
pub const MARKED: Luma<u8> = Luma([u8::MAX]);

/// Luma value of a background (paper) pixel in a [`BinaryImage`].
pub const BACKGROUND: Luma<u8> = Luma([u8::MIN]);

/// A thresholded image in which ink is [`MARKED`] and paper is [`BACKGROUND`].
///
/// The wrapped image never contains any other value.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryImage(GrayImage);

impl BinaryImage {
    /// Wraps a grayscale image, treating any non-zero pixel as marked.
    pub fn from_gray(img: &GrayImage) -> Self {
        let mut out = GrayImage::new(img.width(), img.height());
        for (x, y, pixel) in img.enumerate_pixels() {
            if pixel.0[0] != u8::MIN {
                out.put_pixel(x, y, MARKED);
            }
        }
        Self(out)
    }

    /// A binary image of the given size with no marked pixels.
    pub fn blank(width: u32, height: u32) -> Self {
        Self(GrayImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Whether the pixel at `(x, y)` is ink. Coordinates outside the image are
    /// never marked.
    pub fn is_marked(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return false;
        }
        *self.0.get_pixel(x as u32, y as u32) == MARKED
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.0
    }
}

/// A connected foreground region found in a [`BinaryImage`].
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Boundary points in tracing order.
    pub points: Vec<Point<i32>>,
    /// Inclusive bounding box of `points`. Width and height are at least 1.
    pub bounds: Rect,
    /// Center of `bounds`.
    pub centroid: Point<f32>,
}

impl Shape {
    /// Builds a shape from its boundary, or `None` if the boundary is empty.
    pub fn from_points(points: Vec<Point<i32>>) -> Option<Self> {
        let bounds = crate::geometry::bounding_rect(&points)?;
        Some(Self {
            centroid: center_of_rect(&bounds),
            points,
            bounds,
        })
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Bounding-box area in pixels.
    pub fn area(&self) -> u32 {
        self.bounds.width() * self.bounds.height()
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(&self.bounds)
    }

    /// The region enclosed by the boundary as a mask over [`Shape::bounds`]:
    /// enclosed pixels are [`MARKED`], everything else is [`BACKGROUND`].
    pub fn region_mask(&self) -> GrayImage {
        polygon_mask(&self.points, &self.bounds, MARKED)
    }
}

/// A shape that passed the bubble filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub shape: Shape,
}

impl Bubble {
    pub fn centroid(&self) -> Point<f32> {
        self.shape.centroid
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bounds
    }
}

/// One question row: exactly [`OPTIONS_PER_QUESTION`] bubbles, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// 1-based position in the top-to-bottom ordering.
    pub number: usize,
    pub options: [Bubble; OPTIONS_PER_QUESTION],
}

/// Outcome of grading one sheet against an answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradingResult {
    pub correct_count: usize,
    pub total_questions: usize,
}
