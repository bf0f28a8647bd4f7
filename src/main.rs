//! Card Spinner HTTP Server
//!
//! Runs a web server on the Pi that flips a playing card on the LED matrix.
//! Any device on the LAN can trigger the spin animation or read the current
//! card via simple HTTP requests.
//!
//! ## Architecture
//! - **Matrix thread** (std::thread): owns the LED matrix, draws frames
//! - **Animation task** (tokio): owns the card state, plays the spin
//! - **HTTP server** (tokio/axum): accepts triggers, forwards via channel
//!
//! ## Usage
//! ```sh
//! sudo ./target/release/card-spinner-rs --port 8080 --brightness 75
//! ```

#[cfg(not(feature = "hardware"))]
fn main() {
    eprintln!("This binary requires the 'hardware' feature (rpi-led-matrix).");
    eprintln!("Build with: cargo build --release");
    eprintln!("Tests can run without it: cargo test --no-default-features");
    std::process::exit(1);
}

#[cfg(feature = "hardware")]
fn main() {
    hardware_main();
}

#[cfg(feature = "hardware")]
#[tokio::main(flavor = "current_thread")]
async fn hardware_main() {
    use card_spinner_rs::matrix::MatrixSink;
    use card_spinner_rs::render::CardRenderer;
    use card_spinner_rs::server::{self, AppState};
    use card_spinner_rs::spinner::{self, SpinnerStatus};
    use card_spinner_rs::{Color, PanelConfig};
    use clap::Parser;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    /// Card Spinner HTTP Server
    #[derive(Parser)]
    #[command(name = "card-spinner-rs")]
    #[command(about = "HTTP-triggered card spin animation for an LED matrix")]
    #[command(version)]
    struct Args {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Number of rows on the LED panel
        #[arg(long, default_value = "32")]
        rows: u32,

        /// Number of columns on the LED panel
        #[arg(long, default_value = "32")]
        cols: u32,

        /// LED brightness (0-100), applied to the foreground color
        #[arg(long, default_value = "75")]
        brightness: u8,
    }

    // Initialize tracing subscriber for request logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_ansi(false) // Disable ANSI color codes for systemd/journald
        .compact()
        .init();

    let args = Args::parse();
    let panel = PanelConfig::new(args.rows, args.cols);
    let foreground = Color::WHITE.apply_brightness(args.brightness.min(100));

    tracing::info!("Card Spinner HTTP Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Panel: {}x{}", panel.cols, panel.rows);
    tracing::info!("Brightness: {}", args.brightness.min(100));
    tracing::info!("Port: {}", args.port);

    // Matrix thread first: the animation's sink feeds it through a channel.
    let (sink, matrix_handle) = MatrixSink::spawn(panel, foreground);

    // Shared status — animation task writes, HTTP handlers read.
    let status = Arc::new(Mutex::new(SpinnerStatus::new()));

    // Spawn the animation task; it renders the card back immediately.
    let handle = spinner::start(CardRenderer::new(Box::new(sink)), status.clone());

    let app_state = AppState {
        command_tx: handle.sender(),
        status,
    };

    let app = server::create_router(app_state);

    let addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("API Documentation: http://localhost:{}/docs", args.port);
    tracing::info!("Try: curl -X POST http://localhost:{}/api/v1/trigger", args.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Teardown: abort any in-flight spin, then let the matrix thread drain.
    handle.shutdown();
    drop(matrix_handle);
}

#[cfg(feature = "hardware")]
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
