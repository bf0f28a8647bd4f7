//! Card spinner for a 25×25 LED matrix.
//!
//! A small demo service: a 25×25 frame buffer shows the back of a playing
//! card; each trigger plays a short "spin" animation and flips between the
//! card back and a freshly drawn random card face. Triggers arrive over a
//! tiny HTTP API, frames go out to the LED panel.
//!
//! Module map:
//! - [`font`] — hand-authored 5×3 glyph masks for ranks and suits
//! - [`card`] — rank/suit types and the random draw
//! - [`render`] — frame buffer, compositing primitives, frame builders
//! - [`spinner`] — the animation task (state toggle + timed sequence)
//! - [`server`] — axum HTTP adapter (trigger + status endpoints)
//! - [`matrix`] — hardware display sink (requires the `hardware` feature)
//!
//! This root module holds the pieces shared across those: panel
//! configuration, the color type used at the hardware boundary, matrix
//! initialization, and a Ctrl+C helper for the demo programs.

pub mod card;
pub mod font;
#[cfg(feature = "hardware")]
pub mod matrix;
pub mod render;
pub mod server;
pub mod spinner;

#[cfg(feature = "hardware")]
use rpi_led_matrix::{LedMatrix, LedMatrixOptions, LedRuntimeOptions};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ── Panel configuration ────────────────────────────────────────────

/// Configuration for the physical LED panel dimensions.
///
/// The card animation is a fixed 25×25 grid; the panel it is mounted on can
/// be larger, in which case the frame is centered (see [`PanelConfig::origin_for`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    pub rows: u32,
    pub cols: u32,
}

impl PanelConfig {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Top-left corner that centers a `size`×`size` frame on this panel.
    ///
    /// Panels smaller than the frame clamp to (0, 0) and the overhang is
    /// clipped at the canvas edge.
    pub fn origin_for(&self, size: u32) -> (i32, i32) {
        let x = (self.cols.saturating_sub(size) / 2) as i32;
        let y = (self.rows.saturating_sub(size) / 2) as i32;
        (x, y)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self { rows: 32, cols: 32 }
    }
}

// ── Color ──────────────────────────────────────────────────────────

/// Our own color type, decoupled from the hardware crate.
///
/// This lets us test frame conversion on any machine without needing
/// `rpi-led-matrix`. At the hardware boundary, we convert via `Into<LedColor>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Foreground for "on" pixels.
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Background for "off" pixels.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Apply brightness scaling (0-100) to this color.
    pub fn apply_brightness(self, brightness: u8) -> Self {
        if brightness >= 100 {
            return self;
        }
        Self {
            r: ((self.r as u16 * brightness as u16) / 100) as u8,
            g: ((self.g as u16 * brightness as u16) / 100) as u8,
            b: ((self.b as u16 * brightness as u16) / 100) as u8,
        }
    }
}

/// Convert our Color to the hardware crate's LedColor at the boundary.
#[cfg(feature = "hardware")]
impl From<Color> for rpi_led_matrix::LedColor {
    fn from(c: Color) -> Self {
        rpi_led_matrix::LedColor {
            red: c.r,
            green: c.g,
            blue: c.b,
        }
    }
}

// ── Matrix initialization ──────────────────────────────────────────

/// Create a matrix configured for our hardware:
/// Pi Zero 2 W + Adafruit Bonnet + configurable panel size.
///
/// # Rust concept: Result and the ? operator
/// This function returns `Result` because matrix initialization can fail
/// (e.g., if not running as root, or if GPIO is unavailable).
/// The caller uses `?` to propagate errors upward.
#[cfg(feature = "hardware")]
pub fn create_matrix(panel: PanelConfig) -> Result<LedMatrix, Box<dyn std::error::Error>> {
    let mut options = LedMatrixOptions::new();
    options.set_rows(panel.rows);
    options.set_cols(panel.cols);
    options.set_hardware_mapping("adafruit-hat");

    options.set_pwm_bits(8)?; // Full 8-bit color depth
    options.set_pwm_lsb_nanoseconds(130); // Stable timing (~143Hz refresh)

    let mut rt_options = LedRuntimeOptions::new();
    rt_options.set_gpio_slowdown(2); // Pi Zero 2 W requires slowdown=2

    let matrix = LedMatrix::new(Some(options), Some(rt_options))?;

    Ok(matrix)
}

/// Set up a Ctrl+C handler that sets `running` to false.
///
/// # Rust concept: Arc and AtomicBool
/// We need to share the `running` flag between the main loop and the
/// signal handler. `Arc` (Atomic Reference Counting) lets multiple owners
/// share data. `AtomicBool` is a thread-safe boolean — no mutex needed
/// for a single bool.
pub fn setup_signal_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone(); // Clone the Arc, not the bool — both point to same data

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    running
}

/// Check if the main loop should keep running.
pub fn is_running(running: &AtomicBool) -> bool {
    running.load(Ordering::SeqCst)
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // ── PanelConfig tests ──────────────────────────────────────────

    #[test]
    fn panel_config_default_is_32x32() {
        let panel = PanelConfig::default();
        assert_eq!(panel.rows, 32);
        assert_eq!(panel.cols, 32);
    }

    #[rstest]
    #[case(32, 32, 25, (3, 3))]
    #[case(64, 64, 25, (19, 19))]
    #[case(25, 25, 25, (0, 0))]
    #[case(32, 64, 25, (19, 3))]
    fn test_origin_centers_frame(
        #[case] rows: u32,
        #[case] cols: u32,
        #[case] size: u32,
        #[case] expected: (i32, i32),
    ) {
        assert_eq!(PanelConfig::new(rows, cols).origin_for(size), expected);
    }

    #[test]
    fn origin_clamps_when_panel_smaller_than_frame() {
        let panel = PanelConfig::new(20, 20);
        assert_eq!(panel.origin_for(25), (0, 0));
    }

    // ── Color tests ────────────────────────────────────────────────

    #[test]
    fn color_new() {
        let c = Color::new(10, 20, 30);
        assert_eq!(c.r, 10);
        assert_eq!(c.g, 20);
        assert_eq!(c.b, 30);
    }

    #[test]
    fn apply_brightness_100_is_identity() {
        let c = Color::new(100, 200, 50);
        assert_eq!(c.apply_brightness(100), c);
    }

    #[test]
    fn apply_brightness_above_100_is_identity() {
        let c = Color::new(100, 200, 50);
        assert_eq!(c.apply_brightness(255), c);
    }

    #[test]
    fn apply_brightness_0_is_black() {
        assert_eq!(Color::WHITE.apply_brightness(0), Color::BLACK);
    }

    #[test]
    fn apply_brightness_50_halves() {
        let c = Color::new(200, 100, 50);
        assert_eq!(c.apply_brightness(50), Color::new(100, 50, 25));
    }
}
