//! Mini bitmap font for card ranks and suits.
//!
//! Every glyph is a 5×3 binary mask — about as small as a legible character
//! gets. The table covers the 13 ranks ("10" is drawn as a "T" to fit the
//! 3-pixel width) and the 4 suit symbols. It is pure data: no I/O, no
//! mutation, and lookups of unknown symbols simply return `None` so the
//! renderer can skip them.

/// Glyph mask: `MASK[row][col]`, 1 = pixel on. Row 0 is the top of the glyph.
pub type Mask = [[u8; GLYPH_WIDTH]; GLYPH_HEIGHT];

/// Width of every glyph in the table, in pixels.
pub const GLYPH_WIDTH: usize = 3;
/// Height of every glyph in the table, in pixels.
pub const GLYPH_HEIGHT: usize = 5;

#[rustfmt::skip]
static ACE: Mask = [
    [0, 1, 0],
    [1, 0, 1],
    [1, 1, 1],
    [1, 0, 1],
    [1, 0, 1],
];

#[rustfmt::skip]
static TWO: Mask = [
    [1, 1, 0],
    [0, 0, 1],
    [0, 1, 0],
    [1, 0, 0],
    [1, 1, 1],
];

#[rustfmt::skip]
static THREE: Mask = [
    [1, 1, 0],
    [0, 0, 1],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
];

#[rustfmt::skip]
static FOUR: Mask = [
    [1, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 0, 1],
    [0, 0, 1],
];

#[rustfmt::skip]
static FIVE: Mask = [
    [1, 1, 1],
    [1, 0, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
];

#[rustfmt::skip]
static SIX: Mask = [
    [0, 1, 1],
    [1, 0, 0],
    [1, 1, 0],
    [1, 0, 1],
    [0, 1, 0],
];

#[rustfmt::skip]
static SEVEN: Mask = [
    [1, 1, 1],
    [0, 0, 1],
    [0, 1, 0],
    [0, 1, 0],
    [0, 1, 0],
];

#[rustfmt::skip]
static EIGHT: Mask = [
    [0, 1, 0],
    [1, 0, 1],
    [0, 1, 0],
    [1, 0, 1],
    [0, 1, 0],
];

#[rustfmt::skip]
static NINE: Mask = [
    [0, 1, 0],
    [1, 0, 1],
    [0, 1, 1],
    [0, 0, 1],
    [1, 1, 0],
];

// Ten is drawn as a "T" — a real "10" doesn't fit in 3 columns.
#[rustfmt::skip]
static TEN: Mask = [
    [1, 1, 1],
    [0, 1, 0],
    [0, 1, 0],
    [0, 1, 0],
    [0, 1, 0],
];

#[rustfmt::skip]
static JACK: Mask = [
    [0, 1, 1],
    [0, 0, 1],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 0],
];

#[rustfmt::skip]
static QUEEN: Mask = [
    [0, 1, 0],
    [1, 0, 1],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
];

#[rustfmt::skip]
static KING: Mask = [
    [1, 0, 1],
    [1, 0, 1],
    [1, 1, 0],
    [1, 0, 1],
    [1, 0, 1],
];

#[rustfmt::skip]
static SPADE: Mask = [
    [0, 1, 0],
    [1, 1, 1],
    [0, 1, 0],
    [1, 1, 1],
    [0, 1, 0],
];

#[rustfmt::skip]
static HEART: Mask = [
    [1, 0, 1],
    [1, 1, 1],
    [1, 1, 1],
    [0, 1, 0],
    [0, 0, 0],
];

#[rustfmt::skip]
static DIAMOND: Mask = [
    [0, 1, 0],
    [1, 1, 1],
    [1, 1, 1],
    [0, 1, 0],
    [0, 0, 0],
];

#[rustfmt::skip]
static CLUB: Mask = [
    [0, 1, 0],
    [1, 1, 1],
    [0, 1, 0],
    [1, 1, 1],
    [0, 1, 0],
];

/// Look up the pixel mask for a symbol.
///
/// Returns `None` for symbols outside the table — absence is not an error,
/// the caller just draws nothing.
pub fn lookup(symbol: &str) -> Option<&'static Mask> {
    Some(match symbol {
        "A" => &ACE,
        "2" => &TWO,
        "3" => &THREE,
        "4" => &FOUR,
        "5" => &FIVE,
        "6" => &SIX,
        "7" => &SEVEN,
        "8" => &EIGHT,
        "9" => &NINE,
        "10" => &TEN,
        "J" => &JACK,
        "Q" => &QUEEN,
        "K" => &KING,
        "♠" => &SPADE,
        "♥" => &HEART,
        "♦" => &DIAMOND,
        "♣" => &CLUB,
        _ => return None,
    })
}
