//! Word-cloud layout: area-proportional font scaling and spiral packing.
//!
//! Measurement uses a static per-character advance-width table (em units,
//! ASCII with an average fallback) so layout runs without loading a font.
//! The rasterizer draws with a real TTF; the 25% line-height box plus
//! padding absorbs the residual metric error.

use crate::wordcloud::frequency::WordCount;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 400;

const MIN_FONT_PX: f32 = 12.0;
const MAX_FONT_PX: f32 = 96.0;
/// Cap on words attempted; later (rarer) words usually fail to fit anyway.
const MAX_WORDS: usize = 200;
/// Spiral search budget per word. A word that finds no free spot is omitted.
const MAX_SPIRAL_STEPS: usize = 2000;
const LINE_HEIGHT: f32 = 1.25;
const PADDING_PX: f32 = 2.0;

/// A word with its final position (top-left, canvas coordinates) and size.
/// Invariant: the box `[x, x+width] × [y, y+height]` lies inside the canvas.
#[derive(Debug, Clone)]
pub struct PlacedWord {
    pub text: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub font_px: f32,
}

/// ASCII advance widths in em units for a humanist sans-serif face.
/// Index = (char as usize) - 32, covering 0x20 (space) through 0x7E (~).
#[rustfmt::skip]
static CHAR_WIDTHS_EM: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0     1     2     3     4     5     6     7     8     9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A     B     C     D     E     F     G     H     I     J     K     L     M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a     b     c     d     e     f     g     h     i     j     k     l     m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n     o     p     q     r     s     t     u     v     w     x     y     z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

/// Fallback width for non-ASCII characters.
const AVERAGE_CHAR_WIDTH_EM: f32 = 0.52;

/// Measures the rendered width of a string in em units.
fn measure_em(s: &str) -> f32 {
    s.chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                CHAR_WIDTHS_EM[code - 32]
            } else {
                AVERAGE_CHAR_WIDTH_EM
            }
        })
        .sum()
}

/// Pixel width of a string at the given font size.
pub fn measure_px(s: &str, font_px: f32) -> f32 {
    measure_em(s) * font_px
}

/// Lays out words on the canvas, most frequent first.
///
/// Font size scales with the square root of relative frequency so word AREA
/// is proportional to frequency. Positions are searched along an archimedean
/// spiral from the canvas center; words that find no free position within
/// the search budget are omitted.
pub fn layout_words(freqs: &[WordCount]) -> Vec<PlacedWord> {
    let Some(max_count) = freqs.first().map(|w| w.count) else {
        return Vec::new();
    };

    let mut placed: Vec<PlacedWord> = Vec::new();
    for wc in freqs.iter().take(MAX_WORDS) {
        let rel = wc.count as f32 / max_count as f32;
        let mut font_px = MIN_FONT_PX + (MAX_FONT_PX - MIN_FONT_PX) * rel.sqrt();

        // Shrink a word that would overflow the canvas on its own.
        let mut width = measure_px(&wc.word, font_px);
        let max_width = CANVAS_WIDTH as f32 * 0.95;
        if width > max_width {
            font_px *= max_width / width;
            width = measure_px(&wc.word, font_px);
        }
        let height = font_px * LINE_HEIGHT;

        if let Some((x, y)) = find_position(width, height, &placed) {
            placed.push(PlacedWord {
                text: wc.word.clone(),
                x,
                y,
                width: width.ceil() as u32,
                height: height.ceil() as u32,
                font_px,
            });
        }
    }
    placed
}

/// Walks an archimedean spiral from the canvas center (stretched to the 2:1
/// canvas) until the word's box fits without overlap, or the budget runs out.
fn find_position(width: f32, height: f32, placed: &[PlacedWord]) -> Option<(u32, u32)> {
    let cx = CANVAS_WIDTH as f32 / 2.0;
    let cy = CANVAS_HEIGHT as f32 / 2.0;
    let w = width.ceil();
    let h = height.ceil();

    for step in 0..MAX_SPIRAL_STEPS {
        let theta = step as f32 * 0.35;
        let radius = 1.0 + 0.9 * theta;
        let x = (cx + radius * theta.cos() * 1.6 - w / 2.0).round();
        let y = (cy + radius * theta.sin() * 0.8 - h / 2.0).round();

        if x < 0.0 || y < 0.0 || x + w > CANVAS_WIDTH as f32 || y + h > CANVAS_HEIGHT as f32 {
            continue;
        }
        if !collides(x, y, w, h, placed) {
            return Some((x as u32, y as u32));
        }
    }
    None
}

fn collides(x: f32, y: f32, w: f32, h: f32, placed: &[PlacedWord]) -> bool {
    placed.iter().any(|p| {
        let px = p.x as f32 - PADDING_PX;
        let py = p.y as f32 - PADDING_PX;
        let pw = p.width as f32 + 2.0 * PADDING_PX;
        let ph = p.height as f32 + 2.0 * PADDING_PX;
        x < px + pw && px < x + w && y < py + ph && py < y + h
    })
}
