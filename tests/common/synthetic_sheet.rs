#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_filled_rect_mut},
    rect::Rect,
};

pub const PAPER: Rgb<u8> = Rgb([250, 250, 250]);
pub const INK: Rgb<u8> = Rgb([25, 25, 25]);

/// Layout of a generated answer sheet: one row per question, four bubbles per
/// row, evenly spaced.
#[derive(Debug, Clone, Copy)]
pub struct SheetLayout {
    pub spacing: i32,
    pub radius: i32,
    pub ring: i32,
    pub paper: Rgb<u8>,
    pub ink: Rgb<u8>,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            spacing: 60,
            radius: 15,
            ring: 3,
            paper: PAPER,
            ink: INK,
        }
    }
}

impl SheetLayout {
    pub fn size(&self, questions: usize) -> (u32, u32) {
        (
            (self.spacing * 5) as u32,
            (self.spacing * (questions as i32 + 1)) as u32,
        )
    }

    pub fn center(&self, question: usize, option: usize) -> (i32, i32) {
        (
            self.spacing * (option as i32 + 1),
            self.spacing * (question as i32 + 1),
        )
    }

    pub fn blank(&self, questions: usize) -> RgbImage {
        let (width, height) = self.size(questions);
        RgbImage::from_pixel(width, height, self.paper)
    }

    pub fn draw_empty_bubble(&self, canvas: &mut RgbImage, question: usize, option: usize) {
        let center = self.center(question, option);
        draw_filled_circle_mut(canvas, center, self.radius, self.ink);
        draw_filled_circle_mut(canvas, center, self.radius - self.ring, self.paper);
    }

    pub fn draw_marked_bubble(&self, canvas: &mut RgbImage, question: usize, option: usize) {
        draw_filled_circle_mut(canvas, self.center(question, option), self.radius, self.ink);
    }

    /// Draws a sheet where `marked[q]` (1-based) is the filled option of
    /// question `q`. A `0` leaves the row blank.
    pub fn draw(&self, marked: &[u8]) -> RgbImage {
        let mut canvas = self.blank(marked.len());
        for (question, &answer) in marked.iter().enumerate() {
            for option in 0..4 {
                if answer as usize == option + 1 {
                    self.draw_marked_bubble(&mut canvas, question, option);
                } else {
                    self.draw_empty_bubble(&mut canvas, question, option);
                }
            }
        }
        canvas
    }

    /// A thin horizontal rule above the first row, like a printed header line.
    pub fn draw_header_rule(&self, canvas: &mut RgbImage) {
        let width = canvas.width() as i32;
        draw_filled_rect_mut(
            canvas,
            Rect::at(self.spacing / 2, self.spacing / 4).of_size((width - self.spacing) as u32, 4),
            self.ink,
        );
    }
}

pub fn sheet(marked: &[u8]) -> RgbImage {
    SheetLayout::default().draw(marked)
}

pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    encode(img, ImageOutputFormat::Png)
}

pub fn jpeg_bytes(img: &RgbImage) -> Vec<u8> {
    encode(img, ImageOutputFormat::Jpeg(95))
}

fn encode(img: &RgbImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut bytes, format)
        .expect("encode test image");
    bytes.into_inner()
}
