//! # Spin Loop Demo
//!
//! Flips the card every few seconds without the HTTP server — handy for
//! checking the panel wiring and the animation timing by eye.
//!
//! ## Run it
//! ```sh
//! cargo build --release --example spin_loop
//! sudo ./target/release/examples/spin_loop
//! ```

#[cfg(not(feature = "hardware"))]
fn main() {
    eprintln!("This demo requires the 'hardware' feature.");
}

#[cfg(feature = "hardware")]
fn main() {
    demo_main();
}

#[cfg(feature = "hardware")]
#[tokio::main(flavor = "current_thread")]
async fn demo_main() {
    use card_spinner_rs::matrix::MatrixSink;
    use card_spinner_rs::render::CardRenderer;
    use card_spinner_rs::spinner::{self, SpinnerStatus};
    use card_spinner_rs::{Color, PanelConfig, is_running, setup_signal_handler};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    let panel = PanelConfig::default();
    let running = setup_signal_handler();

    let (sink, _matrix_handle) = MatrixSink::spawn(panel, Color::WHITE.apply_brightness(75));
    let status = Arc::new(Mutex::new(SpinnerStatus::new()));
    let handle = spinner::start(CardRenderer::new(Box::new(sink)), status.clone());

    while is_running(&running) {
        handle.trigger();
        tokio::time::sleep(Duration::from_secs(3)).await;
        let s = status.lock().unwrap();
        match (&s.rank, &s.suit) {
            (Some(rank), Some(suit)) => println!("Showing {rank}{suit}"),
            _ => println!("Showing card back"),
        }
    }

    handle.shutdown();
    println!("\nShutting down cleanly.");
}
