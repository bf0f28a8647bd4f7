//! Animation task: the spin sequence and the back/face toggle.
//!
//! One tokio task owns the whole animation — the state toggle, the RNG, and
//! the renderer. Trigger entry points (HTTP handlers, gestures, whatever the
//! host wires up) never touch any of that directly; they hand off through a
//! bounded command channel and return immediately.
//!
//! ## Trigger policy
//! A trigger that arrives while a spin is already running is ignored: after
//! each completed spin the task drains the commands that piled up mid-spin.
//! One tap, one flip.
//!
//! ## Cancellation
//! [`SpinnerHandle::shutdown`] aborts the task, which cancels any pending
//! 80ms delay at its await point and presents nothing further.

use crate::card::Card;
use crate::render::CardRenderer;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Number of [steady, half, blank] repetitions per spin.
pub const SPIN_REPETITIONS: usize = 3;
/// Delay between animation steps.
pub const SPIN_STEP: Duration = Duration::from_millis(80);

// ── State ────────────────────────────────────────────────────────────

/// What the display is settled on between spins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    /// Showing the card back.
    Back,
    /// Showing the face of this card.
    Face(Card),
}

/// Commands accepted by the animation task.
#[derive(Clone, Copy, Debug)]
pub enum SpinnerCommand {
    /// Spin, then toggle between back and face. Both trigger entry points
    /// (primary action and flip gesture) map to this.
    Flip,
}

// ── Shared status ────────────────────────────────────────────────────

/// Reported state for the status endpoint.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpinnerState {
    ShowingBack,
    Spinning,
    ShowingFace,
}

/// Snapshot the HTTP server can read: the animation task writes it at every
/// state change, handlers clone it out from behind an `Arc<Mutex<_>>`.
#[derive(Clone, Serialize, utoipa::ToSchema)]
pub struct SpinnerStatus {
    /// Current animation state
    pub state: SpinnerState,
    /// Rank symbol of the revealed card (if a face is showing)
    pub rank: Option<String>,
    /// Suit symbol of the revealed card (if a face is showing)
    pub suit: Option<String>,
    /// Completed flips since startup
    pub flips: u64,
    /// Server version
    pub version: String,
}

impl SpinnerStatus {
    pub fn new() -> Self {
        Self {
            state: SpinnerState::ShowingBack,
            rank: None,
            suit: None,
            flips: 0,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn set_back(&mut self) {
        self.state = SpinnerState::ShowingBack;
        self.rank = None;
        self.suit = None;
    }

    fn set_spinning(&mut self) {
        self.state = SpinnerState::Spinning;
    }

    fn set_face(&mut self, card: Card) {
        self.state = SpinnerState::ShowingFace;
        self.rank = Some(card.rank.symbol().to_string());
        self.suit = Some(card.suit.symbol().to_string());
    }
}

impl Default for SpinnerStatus {
    fn default() -> Self {
        Self::new()
    }
}

// ── Sequencer ────────────────────────────────────────────────────────

/// The animation sequencer. Owns the renderer, the RNG, and the state
/// toggle; only ever driven from one task.
pub struct CardSpinner<R: Rng> {
    renderer: CardRenderer,
    rng: R,
    state: CardState,
    status: Arc<Mutex<SpinnerStatus>>,
}

impl<R: Rng> CardSpinner<R> {
    pub fn new(renderer: CardRenderer, rng: R, status: Arc<Mutex<SpinnerStatus>>) -> Self {
        Self {
            renderer,
            rng,
            state: CardState::Back,
            status,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Render the steady frame for the current state, with no spin. Called
    /// once at task startup so the display isn't dark until the first
    /// trigger.
    pub fn show_current(&mut self) {
        match self.state {
            CardState::Back => self.renderer.render_back(),
            CardState::Face(card) => self.renderer.render_face(card),
        }
    }

    /// One full trigger cycle: three [steady, half, blank] repetitions, then
    /// a single state transition — reveal a fresh random card when coming
    /// from the back, or flip back over when a face was showing.
    pub async fn flip(&mut self) {
        self.status.lock().unwrap().set_spinning();

        for _ in 0..SPIN_REPETITIONS {
            self.show_current();
            sleep(SPIN_STEP).await;
            self.renderer.render_back_half();
            sleep(SPIN_STEP).await;
            self.renderer.render_blank();
            sleep(SPIN_STEP).await;
        }

        self.state = match self.state {
            CardState::Back => {
                let card = Card::random(&mut self.rng);
                tracing::info!("Revealing {card}");
                self.renderer.render_face(card);
                self.status.lock().unwrap().set_face(card);
                CardState::Face(card)
            }
            CardState::Face(_) => {
                tracing::info!("Flipping back to card back");
                self.renderer.render_back();
                self.status.lock().unwrap().set_back();
                CardState::Back
            }
        };
        self.status.lock().unwrap().flips += 1;
    }

    async fn run(mut self, mut rx: mpsc::Receiver<SpinnerCommand>) {
        self.show_current();
        while let Some(SpinnerCommand::Flip) = rx.recv().await {
            self.flip().await;
            // Triggers that arrived mid-spin are stale taps; drop them.
            while rx.try_recv().is_ok() {}
        }
        tracing::info!("Spinner task: channel closed, shutting down.");
    }
}

// ── Handle ───────────────────────────────────────────────────────────

/// Owning handle for the animation task: trigger entry points for the host,
/// plus cancellation.
pub struct SpinnerHandle {
    tx: mpsc::Sender<SpinnerCommand>,
    task: JoinHandle<()>,
}

impl SpinnerHandle {
    /// Primary action trigger. Returns `false` only if the task is gone;
    /// a trigger ignored because a spin is running still counts as handled.
    pub fn trigger(&self) -> bool {
        match self.tx.try_send(SpinnerCommand::Flip) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Flip gesture trigger — same transition as [`trigger`](Self::trigger).
    pub fn flip_gesture(&self) -> bool {
        self.trigger()
    }

    /// A sender for host adapters that only need to deliver commands.
    pub fn sender(&self) -> mpsc::Sender<SpinnerCommand> {
        self.tx.clone()
    }

    /// Cancel the animation task. Any in-flight spin stops at its next
    /// delay; no further frames are presented.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

/// Spawn the animation task with an entropy-seeded RNG. Must be called from
/// within a tokio runtime. The initial back frame is rendered immediately.
pub fn start(renderer: CardRenderer, status: Arc<Mutex<SpinnerStatus>>) -> SpinnerHandle {
    start_with_rng(renderer, StdRng::from_entropy(), status)
}

/// Spawn the animation task with a caller-supplied RNG (tests seed this to
/// pin the revealed card).
pub fn start_with_rng<R>(
    renderer: CardRenderer,
    rng: R,
    status: Arc<Mutex<SpinnerStatus>>,
) -> SpinnerHandle
where
    R: Rng + Send + 'static,
{
    let (tx, rx) = mpsc::channel(4);
    let spinner = CardSpinner::new(renderer, rng, status);
    let task = tokio::spawn(spinner.run(rx));
    SpinnerHandle { tx, task }
}

// ── Tests ────────────────────────────────────────────────────────────
