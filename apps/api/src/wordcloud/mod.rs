// Word-frequency visualization: counts → packed layout → raster.
// Layout is measured against a static glyph-width table so it needs no font
// file; rasterization is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod frequency;
pub mod layout;
pub mod render;

pub use layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
pub use render::WordcloudRenderer;

use crate::errors::AppError;

/// The visualization seam consumed by the screening runner. Carried in
/// `AppState` as `Arc<dyn Visualizer>`; the production backend is
/// `WordcloudRenderer`, tests substitute doubles.
pub trait Visualizer: Send + Sync {
    /// Renders a word-frequency image for `text` as an encoded PNG.
    fn render(&self, text: &str) -> Result<Vec<u8>, AppError>;
}
