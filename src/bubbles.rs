use log::debug;
use logging_timer::time;
use serde::{Deserialize, Serialize};

use crate::{
    error::GradingError,
    types::{Bubble, Shape, OPTIONS_PER_QUESTION},
};

/// Size and shape bounds a contour must satisfy to count as a bubble. The
/// aspect-ratio band and `min_side` are inclusive; the area must exceed
/// `min_area`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BubbleFilterOptions {
    pub min_aspect_ratio: f32,
    pub max_aspect_ratio: f32,
    /// Minimum bounding-box width and height in pixels.
    pub min_side: u32,
    /// Bounding-box area in pixels that a bubble must exceed.
    pub min_area: u32,
}

impl Default for BubbleFilterOptions {
    fn default() -> Self {
        Self {
            min_aspect_ratio: 0.9,
            max_aspect_ratio: 1.2,
            min_side: 20,
            // a 20x20 box still passes
            min_area: 399,
        }
    }
}

impl BubbleFilterOptions {
    /// Determines whether a shape could be a bubble based on its bounding box.
    pub fn accepts(&self, shape: &Shape) -> bool {
        let aspect_ratio = shape.aspect_ratio();
        shape.width() >= self.min_side
            && shape.height() >= self.min_side
            && shape.area() > self.min_area
            && aspect_ratio >= self.min_aspect_ratio
            && aspect_ratio <= self.max_aspect_ratio
    }
}

/// Keeps the bubble-like shapes. Fails if there are none, or if they cannot
/// be split evenly into questions.
#[time]
pub fn filter_bubbles(
    shapes: &[Shape],
    options: &BubbleFilterOptions,
) -> Result<Vec<Bubble>, GradingError> {
    let bubbles = shapes
        .iter()
        .filter(|shape| options.accepts(shape))
        .map(|shape| Bubble {
            shape: shape.clone(),
        })
        .collect::<Vec<Bubble>>();

    debug!(
        "{} of {} shapes look like bubbles",
        bubbles.len(),
        shapes.len()
    );

    if bubbles.is_empty() {
        return Err(GradingError::NoBubblesDetected);
    }

    if bubbles.len() % OPTIONS_PER_QUESTION != 0 {
        return Err(GradingError::BubbleCountMismatch {
            count: bubbles.len(),
        });
    }

    Ok(bubbles)
}
