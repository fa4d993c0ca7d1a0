//! Rasterizes a laid-out word cloud to a PNG.

use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::errors::AppError;
use crate::wordcloud::frequency::word_frequencies;
use crate::wordcloud::layout::{layout_words, PlacedWord, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::wordcloud::Visualizer;

/// Word colors, cycled in placement order (matplotlib tab10).
const PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

/// Renders word clouds with a TTF loaded once at startup.
pub struct WordcloudRenderer {
    font: Font<'static>,
}

impl WordcloudRenderer {
    pub fn from_font_path(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read word cloud font '{}'", path.display()))?;
        let font = Font::try_from_vec(data)
            .with_context(|| format!("'{}' is not a usable TTF font", path.display()))?;
        Ok(Self { font })
    }

    fn draw_word(&self, canvas: &mut RgbaImage, word: &PlacedWord, color: [u8; 3]) {
        let scale = Scale::uniform(word.font_px);
        let ascent = self.font.v_metrics(scale).ascent;
        let origin = point(word.x as f32, word.y as f32 + ascent);

        for glyph in self.font.layout(&word.text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if coverage > 0.0
                    && px >= 0
                    && py >= 0
                    && (px as u32) < canvas.width()
                    && (py as u32) < canvas.height()
                {
                    let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                    for channel in 0..3 {
                        let blended = pixel.0[channel] as f32 * (1.0 - coverage)
                            + color[channel] as f32 * coverage;
                        pixel.0[channel] = blended as u8;
                    }
                }
            });
        }
    }
}

impl Visualizer for WordcloudRenderer {
    /// Computes frequencies, lays words out on the 800×400 canvas, and
    /// returns the encoded PNG.
    fn render(&self, text: &str) -> Result<Vec<u8>, AppError> {
        let freqs = word_frequencies(text);
        if freqs.is_empty() {
            return Err(AppError::Render(
                "text contains no drawable words".to_string(),
            ));
        }

        let placed = layout_words(&freqs);
        let mut canvas =
            RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba([255, 255, 255, 255]));
        for (i, word) in placed.iter().enumerate() {
            self.draw_word(&mut canvas, word, PALETTE[i % PALETTE.len()]);
        }

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| AppError::Render(e.to_string()))?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

    #[test]
    fn test_missing_font_file_is_an_error() {
        let err = WordcloudRenderer::from_font_path(Path::new("/nonexistent/font.ttf"));
        assert!(err.is_err());
    }

    #[test]
    fn test_render_produces_png() {
        let path = Path::new(SYSTEM_FONT);
        if !path.exists() {
            return; // no system font in this environment
        }
        let renderer = WordcloudRenderer::from_font_path(path).unwrap();
        let png = renderer
            .render("rust rust rust engineering distributed systems latency")
            .unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn test_render_rejects_stopword_only_text() {
        let path = Path::new(SYSTEM_FONT);
        if !path.exists() {
            return;
        }
        let renderer = WordcloudRenderer::from_font_path(path).unwrap();
        let err = renderer.render("the and of to").unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
