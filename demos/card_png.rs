//! # Card PNG Demo
//!
//! Draws a random card face and writes it to `card.png`, upscaled so the
//! pixels are visible. Needs no LED hardware — useful for eyeballing the
//! glyph font on a dev machine.
//!
//! ## Run it
//! ```sh
//! cargo run --example card_png --no-default-features
//! ```

use card_spinner_rs::Color;
use card_spinner_rs::card::Card;
use card_spinner_rs::render::{face_frame, frame_to_image};
use image::imageops::{self, FilterType};

fn main() {
    let card = Card::random(&mut rand::thread_rng());
    let frame = face_frame(card);
    let img = frame_to_image(&frame, Color::WHITE, Color::BLACK);

    // 25×25 is a speck on a modern screen; blow it up 8× with no smoothing.
    let big = imageops::resize(&img, 200, 200, FilterType::Nearest);
    big.save("card.png").expect("Failed to write card.png");

    println!("Rendered {card} to card.png");
}
