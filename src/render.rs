//! Frame buffer and card compositing.
//!
//! Everything here is deterministic and side-effect free except the final
//! hand-off: a [`Frame`] is a 25×25 binary grid, the builder functions
//! compose borders, checkerboard fill, and glyph blits into complete frames,
//! and [`CardRenderer`] presents each finished frame to a [`DisplaySink`] as
//! one atomic call.
//!
//! Coordinates are `(x, y)` with the origin at the top-left and both axes in
//! `0..25`. Drawing outside that range is silently clipped, never an error —
//! the display has no more pixels to give.

use crate::Color;
use crate::card::Card;
use crate::font::{self, Mask};
use image::{Rgb, RgbImage};
use std::fmt;

/// Edge length of the display, in pixels.
pub const GRID: usize = 25;

/// Outline of the full card.
const CARD: Rect = Rect::new(4, 4, 20, 20);
/// Thin outline used mid-flip, when the card is seen edge-on.
const CARD_EDGE: Rect = Rect::new(9, 4, 15, 20);
/// Rank glyph center on the card face.
const RANK_CENTER: (i32, i32) = (12, 10);
/// Suit glyph center on the card face, below the rank.
const SUIT_CENTER: (i32, i32) = (12, 14);

// ── Frame ────────────────────────────────────────────────────────────

/// One displayable image: a 25×25 grid of on/off pixels.
///
/// Frames start all-off, are composed by one builder call, get handed to the
/// sink, and are then discarded — nothing retains frame history.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    // Row-major: cells[y][x].
    cells: [[bool; GRID]; GRID],
}

impl Frame {
    /// An all-off frame.
    pub fn new() -> Self {
        Self {
            cells: [[false; GRID]; GRID],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.cells[y][x] = on;
    }

    /// Like [`set`](Self::set), but with signed coordinates: anything outside
    /// the grid is dropped silently.
    pub fn put(&mut self, x: i32, y: i32, on: bool) {
        let range = 0..GRID as i32;
        if range.contains(&x) && range.contains(&y) {
            self.cells[y as usize][x as usize] = on;
        }
    }

    /// Number of lit pixels.
    pub fn lit(&self) -> usize {
        self.cells.iter().flatten().filter(|&&on| on).count()
    }

    /// Set the perimeter pixels of `rect` on.
    pub fn draw_border(&mut self, rect: Rect) {
        for x in rect.left..=rect.right {
            self.set(x, rect.top, true);
            self.set(x, rect.bottom, true);
        }
        for y in rect.top..=rect.bottom {
            self.set(rect.left, y, true);
            self.set(rect.right, y, true);
        }
    }

    /// Checkerboard the strict interior of `rect`: a pixel turns on iff
    /// `x + y` is even. Pixels with odd parity keep their prior value.
    pub fn fill_checkerboard(&mut self, rect: Rect) {
        for y in rect.top + 1..rect.bottom {
            for x in rect.left + 1..rect.right {
                if (x + y) % 2 == 0 {
                    self.set(x, y, true);
                }
            }
        }
    }

    /// Copy a glyph mask into the frame, centered at `(center_x, center_y)`.
    ///
    /// The top-left lands at `center - size/2` (integer floor). Every mask
    /// cell — on or off — overwrites the frame at its target coordinate;
    /// cells falling outside the grid are clipped. Symbols missing from the
    /// font draw nothing.
    pub fn blit_glyph(&mut self, symbol: &str, center_x: i32, center_y: i32) {
        let Some(mask) = font::lookup(symbol) else {
            return;
        };
        self.blit_mask(mask, center_x, center_y);
    }

    fn blit_mask(&mut self, mask: &Mask, center_x: i32, center_y: i32) {
        let start_x = center_x - (font::GLYPH_WIDTH as i32) / 2;
        let start_y = center_y - (font::GLYPH_HEIGHT as i32) / 2;
        for (row, cells) in mask.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                self.put(start_x + col as i32, start_y + row as i32, cell == 1);
            }
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the grid as rows of `#`/`.` so test failures are readable.
impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frame({GRID}x{GRID})")?;
        for row in &self.cells {
            for &on in row {
                write!(f, "{}", if on { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── Rect ─────────────────────────────────────────────────────────────

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Rect {
    pub const fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

// ── Frame builders ───────────────────────────────────────────────────

/// Card back: full outline with a checkerboard weave inside.
pub fn back_frame() -> Frame {
    let mut frame = Frame::new();
    frame.draw_border(CARD);
    frame.fill_checkerboard(CARD);
    frame
}

/// The card seen edge-on mid-flip: a thin outline, still weave-filled.
pub fn back_half_frame() -> Frame {
    let mut frame = Frame::new();
    frame.draw_border(CARD_EDGE);
    frame.fill_checkerboard(CARD_EDGE);
    frame
}

/// Card face: outline plus the rank glyph over the suit glyph.
///
/// Rank first, suit second. Both glyphs are five rows tall, so the suit's
/// top row overwrites the rank's bottom row on row 12.
pub fn face_frame(card: Card) -> Frame {
    let mut frame = Frame::new();
    frame.draw_border(CARD);
    frame.blit_glyph(card.rank.symbol(), RANK_CENTER.0, RANK_CENTER.1);
    frame.blit_glyph(card.suit.symbol(), SUIT_CENTER.0, SUIT_CENTER.1);
    frame
}

/// The flip's fully-collapsed midpoint: nothing lit.
pub fn blank_frame() -> Frame {
    Frame::new()
}

// ── Display sink ─────────────────────────────────────────────────────

/// Where finished frames go.
///
/// `present` is synchronous and non-failing from the renderer's point of
/// view; whatever can go wrong downstream (a disconnected panel, a dead
/// thread) is the sink's concern and must not leak back into animation
/// timing.
pub trait DisplaySink: Send {
    fn present(&mut self, frame: &Frame);
}

/// Composes frames and hands them to the display sink.
///
/// The sink is optional: until one is attached, render calls are silent
/// no-ops — a gap in visible output, not an error.
pub struct CardRenderer {
    sink: Option<Box<dyn DisplaySink>>,
}

impl CardRenderer {
    pub fn new(sink: Box<dyn DisplaySink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// A renderer with no display attached yet.
    pub fn detached() -> Self {
        Self { sink: None }
    }

    pub fn attach(&mut self, sink: Box<dyn DisplaySink>) {
        self.sink = Some(sink);
    }

    fn present(&mut self, frame: &Frame) {
        if let Some(sink) = &mut self.sink {
            sink.present(frame);
        }
    }

    pub fn render_back(&mut self) {
        let frame = back_frame();
        self.present(&frame);
    }

    pub fn render_back_half(&mut self) {
        let frame = back_half_frame();
        self.present(&frame);
    }

    pub fn render_face(&mut self, card: Card) {
        let frame = face_frame(card);
        self.present(&frame);
    }

    pub fn render_blank(&mut self) {
        let frame = blank_frame();
        self.present(&frame);
    }
}

// ── Pixel conversion ─────────────────────────────────────────────────

/// Expand a binary frame into an RGB image: on → `foreground`,
/// off → `background`. This is the representation display sinks draw from.
pub fn frame_to_image(frame: &Frame, foreground: Color, background: Color) -> RgbImage {
    RgbImage::from_fn(GRID as u32, GRID as u32, |x, y| {
        let c = if frame.get(x as usize, y as usize) {
            foreground
        } else {
            background
        };
        Rgb([c.r, c.g, c.b])
    })
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    fn on_card_border(x: usize, y: usize) -> bool {
        let edge_x = (x == 4 || x == 20) && (4..=20).contains(&y);
        let edge_y = (y == 4 || y == 20) && (4..=20).contains(&x);
        edge_x || edge_y
    }

    // ── Frame primitives ───────────────────────────────────────────

    #[test]
    fn new_frame_is_all_off() {
        assert_eq!(Frame::new().lit(), 0);
    }

    #[test]
    fn put_clips_out_of_range_coordinates() {
        let mut frame = Frame::new();
        frame.put(-1, 0, true);
        frame.put(0, -1, true);
        frame.put(25, 0, true);
        frame.put(0, 25, true);
        assert_eq!(frame.lit(), 0);
        frame.put(24, 24, true);
        assert!(frame.get(24, 24));
    }

    #[rstest]
    #[case(Rect::new(4, 4, 20, 20))]
    #[case(Rect::new(9, 4, 15, 20))]
    #[case(Rect::new(0, 0, 24, 24))]
    fn checkerboard_follows_parity_and_touches_nothing_else(#[case] rect: Rect) {
        let mut frame = Frame::new();
        frame.fill_checkerboard(rect);
        for y in 0..GRID {
            for x in 0..GRID {
                let interior = x > rect.left && x < rect.right && y > rect.top && y < rect.bottom;
                let expected = interior && (x + y) % 2 == 0;
                assert_eq!(frame.get(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn checkerboard_leaves_prior_pixels_alone() {
        let mut frame = Frame::new();
        frame.set(6, 5, true); // odd parity, inside the interior
        frame.set(1, 1, true); // outside the rect
        frame.fill_checkerboard(Rect::new(4, 4, 20, 20));
        assert!(frame.get(6, 5));
        assert!(frame.get(1, 1));
    }

    // ── Glyph blitting ─────────────────────────────────────────────

    #[test]
    fn blit_centers_the_ace_mask() {
        let mut frame = Frame::new();
        frame.blit_glyph("A", 12, 10);
        // 3×5 mask centered at (12,10): columns 11..=13, rows 8..=12.
        assert!(frame.get(12, 8), "apex");
        assert!(!frame.get(11, 8));
        assert!(!frame.get(13, 8));
        assert!(frame.get(11, 9), "top of left leg");
        assert!(frame.get(13, 9), "top of right leg");
        assert!(!frame.get(12, 9), "hollow between the legs");
        assert!(frame.get(11, 12));
        assert!(frame.get(13, 12));
        assert!(!frame.get(0, 0));
        assert_eq!(frame.lit(), 10);
    }

    #[test]
    fn blit_unknown_symbol_is_a_no_op() {
        let mut frame = back_frame();
        let before = frame.clone();
        frame.blit_glyph("x", 12, 10);
        assert_eq!(frame, before);
    }

    #[test]
    fn blit_overwrites_with_off_cells_too() {
        let mut frame = Frame::new();
        for y in 0..GRID {
            for x in 0..GRID {
                frame.set(x, y, true);
            }
        }
        frame.blit_glyph("A", 12, 10);
        // Off cells of the mask clear previously lit pixels.
        assert!(!frame.get(11, 8));
        assert!(!frame.get(12, 9));
        // Pixels outside the mask footprint are untouched.
        assert!(frame.get(0, 0));
        assert!(frame.get(10, 8));
    }

    #[test]
    fn blit_clips_at_the_top_left_corner() {
        let mut frame = Frame::new();
        frame.blit_glyph("A", 0, 0);
        // Top-left lands at (-1,-2); only mask columns 1..3 of rows 2..5
        // stay in range, leaving four lit pixels.
        assert_eq!(frame.lit(), 4);
        assert!(frame.get(0, 0));
        assert!(frame.get(1, 0));
        assert!(frame.get(1, 1));
        assert!(frame.get(1, 2));
    }

    #[test]
    fn blit_clips_at_the_bottom_right_corner() {
        let mut frame = Frame::new();
        frame.blit_glyph("A", 24, 24);
        // Top-left lands at (23,22): columns 23..=24, rows 22..=24 survive.
        for y in 0..GRID {
            for x in 0..GRID {
                if frame.get(x, y) {
                    assert!(x >= 23 && y >= 22, "pixel ({x},{y}) escaped the corner");
                }
            }
        }
        assert!(frame.get(24, 22), "apex column survives");
    }

    // ── Frame builders ─────────────────────────────────────────────

    #[test]
    fn back_frame_matches_the_reference_pattern() {
        let frame = back_frame();
        for y in 0..GRID {
            for x in 0..GRID {
                let interior = (5..=19).contains(&x) && (5..=19).contains(&y);
                let expected = on_card_border(x, y) || (interior && (x + y) % 2 == 0);
                assert_eq!(frame.get(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn back_frame_is_deterministic() {
        assert_eq!(back_frame(), back_frame());
    }

    #[test]
    fn back_half_frame_matches_the_reference_pattern() {
        let frame = back_half_frame();
        for y in 0..GRID {
            for x in 0..GRID {
                let edge_x = (x == 9 || x == 15) && (4..=20).contains(&y);
                let edge_y = (y == 4 || y == 20) && (9..=15).contains(&x);
                let interior = (10..=14).contains(&x) && (5..=19).contains(&y);
                let expected = edge_x || edge_y || (interior && (x + y) % 2 == 0);
                assert_eq!(frame.get(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn blank_frame_is_all_off() {
        assert_eq!(blank_frame().lit(), 0);
    }

    #[test]
    fn face_frame_has_border_and_no_checkerboard() {
        let frame = face_frame(Card::new(Rank::Ace, Suit::Spades));
        for y in 0..GRID {
            for x in 0..GRID {
                if on_card_border(x, y) {
                    assert!(frame.get(x, y), "border pixel ({x},{y})");
                }
            }
        }
        // A checkerboarded face would light half the interior; a face with
        // two 5×3 glyphs lights far less.
        assert!(frame.lit() < 100);
    }

    #[test]
    fn face_frame_places_rank_above_suit() {
        let frame = face_frame(Card::new(Rank::Ace, Suit::Spades));
        let ace = font::lookup("A").unwrap();
        let spade = font::lookup("♠").unwrap();
        // Rank rows 8..=11 are the ace's rows 0..=3 (row 12 goes to the suit).
        for row in 0..4 {
            for col in 0..3 {
                assert_eq!(
                    frame.get(11 + col, 8 + row),
                    ace[row][col] == 1,
                    "rank pixel col {col} row {row}"
                );
            }
        }
        // Suit rows 12..=16 are the spade mask, drawn last.
        for row in 0..5 {
            for col in 0..3 {
                assert_eq!(
                    frame.get(11 + col, 12 + row),
                    spade[row][col] == 1,
                    "suit pixel col {col} row {row}"
                );
            }
        }
    }

    #[test]
    fn face_frame_row_12_belongs_to_the_suit() {
        // The ace's bottom row is [1,0,1]; the spade's top row [0,1,0] is
        // drawn over it.
        let frame = face_frame(Card::new(Rank::Ace, Suit::Spades));
        assert!(!frame.get(11, 12));
        assert!(frame.get(12, 12));
        assert!(!frame.get(13, 12));
    }

    #[rstest]
    #[case(Rank::Ace, Suit::Spades)]
    #[case(Rank::Ten, Suit::Hearts)]
    #[case(Rank::Queen, Suit::Diamonds)]
    #[case(Rank::Seven, Suit::Clubs)]
    fn face_frame_never_draws_outside_the_card(#[case] rank: Rank, #[case] suit: Suit) {
        let frame = face_frame(Card::new(rank, suit));
        for y in 0..GRID {
            for x in 0..GRID {
                if frame.get(x, y) {
                    assert!(
                        (4..=20).contains(&x) && (4..=20).contains(&y),
                        "pixel ({x},{y}) outside the card"
                    );
                }
            }
        }
    }

    // ── CardRenderer ───────────────────────────────────────────────

    #[derive(Clone, Default)]
    struct RecordingSink {
        frames: Arc<Mutex<Vec<Frame>>>,
    }

    impl DisplaySink for RecordingSink {
        fn present(&mut self, frame: &Frame) {
            self.frames.lock().unwrap().push(frame.clone());
        }
    }

    #[test]
    fn renderer_presents_each_named_frame() {
        let sink = RecordingSink::default();
        let frames = sink.frames.clone();
        let mut renderer = CardRenderer::new(Box::new(sink));

        renderer.render_back();
        renderer.render_back_half();
        renderer.render_face(Card::new(Rank::King, Suit::Clubs));
        renderer.render_blank();

        let presented = frames.lock().unwrap();
        assert_eq!(presented.len(), 4);
        assert_eq!(presented[0], back_frame());
        assert_eq!(presented[1], back_half_frame());
        assert_eq!(presented[2], face_frame(Card::new(Rank::King, Suit::Clubs)));
        assert_eq!(presented[3], blank_frame());
    }

    #[test]
    fn detached_renderer_renders_into_the_void() {
        let mut renderer = CardRenderer::detached();
        renderer.render_back();
        renderer.render_face(Card::new(Rank::Two, Suit::Hearts));

        // Attaching a sink starts delivery from that point on.
        let sink = RecordingSink::default();
        let frames = sink.frames.clone();
        renderer.attach(Box::new(sink));
        renderer.render_back();
        assert_eq!(frames.lock().unwrap().len(), 1);
    }

    // ── Pixel conversion ───────────────────────────────────────────

    #[test]
    fn frame_to_image_maps_on_to_foreground() {
        let frame = back_frame();
        let img = frame_to_image(&frame, Color::WHITE, Color::BLACK);
        assert_eq!(img.dimensions(), (25, 25));
        assert_eq!(img.get_pixel(4, 4), &Rgb([255, 255, 255])); // border corner
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn frame_to_image_respects_custom_colors() {
        let mut frame = Frame::new();
        frame.set(3, 7, true);
        let img = frame_to_image(&frame, Color::new(200, 30, 10), Color::new(1, 2, 3));
        assert_eq!(img.get_pixel(3, 7), &Rgb([200, 30, 10]));
        assert_eq!(img.get_pixel(7, 3), &Rgb([1, 2, 3]));
    }
}
