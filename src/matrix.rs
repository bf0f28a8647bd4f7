//! Hardware display sink: a dedicated thread owning the LED matrix.
//!
//! The `rpi-led-matrix` C library is not thread-safe, so the matrix handle
//! lives on a single `std::thread` created here. The animation task never
//! sees the hardware: its [`DisplaySink`] is a channel sender, and this
//! thread consumes frames in FIFO order, draws them through the shared
//! pixel conversion, and double-buffers with `swap()`.
//!
//! Failure stays on this side of the channel. If the matrix can't be
//! initialized (not root, GPIO busy), the thread logs and exits; the
//! animation keeps running and its sends simply go nowhere.

use crate::render::{DisplaySink, Frame, GRID, frame_to_image};
use crate::{Color, PanelConfig, create_matrix};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

/// Sink half: cheap to move into the animation task, feeds the matrix
/// thread.
pub struct MatrixSink {
    tx: Sender<Frame>,
}

impl MatrixSink {
    /// Spawn the matrix thread and return the sink that feeds it, plus the
    /// thread handle. The thread exits when every sink clone is dropped.
    pub fn spawn(panel: PanelConfig, foreground: Color) -> (Self, thread::JoinHandle<()>) {
        let (tx, rx) = channel();
        let handle = thread::spawn(move || matrix_loop(rx, panel, foreground));
        (Self { tx }, handle)
    }
}

impl DisplaySink for MatrixSink {
    fn present(&mut self, frame: &Frame) {
        // A dead matrix thread is a visible outage, not an animation error.
        let _ = self.tx.send(frame.clone());
    }
}

/// Matrix thread body: initialize the hardware, then draw every received
/// frame until the channel closes.
fn matrix_loop(rx: Receiver<Frame>, panel: PanelConfig, foreground: Color) {
    let matrix = match create_matrix(panel) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!("Failed to initialize LED matrix: {}", e);
            return;
        }
    };

    let mut canvas = matrix.offscreen_canvas();
    let (origin_x, origin_y) = panel.origin_for(GRID as u32);

    tracing::info!("Matrix thread started, waiting for frames...");

    while let Ok(frame) = rx.recv() {
        let img = frame_to_image(&frame, foreground, Color::BLACK);
        canvas.clear();
        for (x, y, pixel) in img.enumerate_pixels() {
            let c = Color::new(pixel[0], pixel[1], pixel[2]);
            canvas.set(origin_x + x as i32, origin_y + y as i32, &c.into());
        }
        canvas = matrix.swap(canvas);
    }

    tracing::info!("Matrix thread: channel closed, shutting down.");
}
