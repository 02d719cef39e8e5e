mod draw;
mod plan;
mod style;
#[cfg(test)]
mod tests;

pub use draw::OverlayPainter;
pub use plan::{plan_overlay, OverlayLayout, OverlayPlan};
pub use style::{OverlayElement, Shape, Stroke, StrokeStyle, BLACK, BLUE, RED, WHITE};
