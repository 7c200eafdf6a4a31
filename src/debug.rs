use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageResult, RgbImage};
use imageproc::{
    drawing::{draw_cross_mut, draw_filled_rect_mut, draw_hollow_rect_mut},
    rect::Rect,
};
use logging_timer::time;

use crate::{
    answer_key::AnswerKey,
    fill::ScoredQuestion,
    grade::GradedSheet,
    image_utils::{BLUE, GRAY, GREEN, PINK, RAINBOW, RED},
    types::Shape,
};

/// Creates a path for a debug image.
pub fn debug_image_path(base: &Path, label: &str) -> PathBuf {
    let mut result = PathBuf::from(base);
    result.set_file_name(format!(
        "{}_debug_{}.png",
        base.file_stem()
            .unwrap_or_default()
            .to_string_lossy(),
        label
    ));
    result
}

fn canvas_from(img: &GrayImage) -> RgbImage {
    DynamicImage::ImageLuma8(img.clone()).into_rgb8()
}

/// Grows a rect by `by` pixels on every side.
fn outset(rect: Rect, by: i32) -> Rect {
    Rect::at(rect.left() - by, rect.top() - by)
        .of_size(rect.width() + 2 * by as u32, rect.height() + 2 * by as u32)
}

/// Draws the bounding rect of every shape found by contour tracing.
pub fn draw_shapes_debug_image_mut(canvas: &mut RgbImage, shapes: &[Shape]) {
    for (i, shape) in shapes.iter().enumerate() {
        draw_filled_rect_mut(canvas, shape.bounds, RAINBOW[i % RAINBOW.len()]);
    }
}

/// Outlines every bubble: the selected option green when it matches the key,
/// red when it does not, the expected option blue, and the rest gray. A cross
/// marks each bubble's centroid.
pub fn draw_graded_questions_debug_image_mut(
    canvas: &mut RgbImage,
    questions: &[ScoredQuestion],
    answer_key: &AnswerKey,
) {
    for (question, expected) in questions.iter().zip(answer_key.answers()) {
        for (i, scored) in question.options.iter().enumerate() {
            let option = (i + 1) as u8;
            let bounds = scored.bubble.bounds();

            let color = match (question.selected == Some(option), option == *expected) {
                (true, true) => GREEN,
                (true, false) => RED,
                (false, true) => BLUE,
                (false, false) => GRAY,
            };
            draw_hollow_rect_mut(canvas, bounds, color);
            draw_hollow_rect_mut(canvas, outset(bounds, 1), color);

            let centroid = scored.bubble.centroid();
            draw_cross_mut(
                canvas,
                PINK,
                centroid.x.round() as i32,
                centroid.y.round() as i32,
            );
        }
    }
}

/// Writes the binary image, the traced shapes, and the graded bubbles next to
/// `input_path`. Returns the paths written.
#[time]
pub fn write_debug_images(
    input_path: &Path,
    sheet: &GradedSheet,
    answer_key: &AnswerKey,
) -> ImageResult<Vec<PathBuf>> {
    let binary_path = debug_image_path(input_path, "binary");
    sheet.binary.as_gray().save(&binary_path)?;

    let shapes_path = debug_image_path(input_path, "shapes");
    let mut shapes_canvas = canvas_from(&sheet.gray);
    draw_shapes_debug_image_mut(&mut shapes_canvas, &sheet.shapes);
    shapes_canvas.save(&shapes_path)?;

    let graded_path = debug_image_path(input_path, "graded");
    let mut graded_canvas = canvas_from(&sheet.gray);
    draw_graded_questions_debug_image_mut(&mut graded_canvas, &sheet.questions, answer_key);
    graded_canvas.save(&graded_path)?;

    Ok(vec![binary_path, shapes_path, graded_path])
}
