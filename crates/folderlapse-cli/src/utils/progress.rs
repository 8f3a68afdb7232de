use folderlapse::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct SpinnerState {
    pb: ProgressBar,
    phase: String,
}

/// Shows provisioning phases as a spinner on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<SpinnerState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(target);
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(SpinnerState {
                pb,
                phase: String::new(),
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress spinner mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    guard.pb.reset();
                    guard.pb.set_style(Self::spinner_style());
                    guard
                        .pb
                        .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    guard.pb.set_message(name.to_string());
                    guard.phase = name.to_string();
                }
                Progress::PhaseFinish => {
                    guard.pb.disable_steady_tick();
                    let done = format!("✓ {}", guard.phase);
                    guard.pb.finish_with_message(done);
                }
                Progress::Message(msg) => {
                    guard.pb.suspend(|| eprintln!("  {}", msg));
                }
            }
        })
    }

    /// Removes the spinner line so a child process can own the terminal.
    pub fn clear(&self) {
        if let Ok(guard) = self.state.lock() {
            guard.pb.disable_steady_tick();
            guard.pb.finish_and_clear();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
