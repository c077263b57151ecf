use eprsim::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders engine [`Progress`] events as a single indicatif bar on stderr.
///
/// Synthesis reports one step per radical and perturbation one step per draw, so the
/// same bar serves both commands.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    phase: Arc<Mutex<&'static str>>,
}

impl CliProgressHandler {
    /// A handler drawing to stderr, or drawing nothing when `visible` is false.
    pub fn new(visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            phase: Arc::new(Mutex::new("")),
        }
    }

    /// A callback that draws engine events on this handler's bar.
    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        let phase = self.phase.clone();

        Box::new(move |progress: Progress| {
            let (Ok(pb), Ok(mut phase)) = (pb.lock(), phase.lock()) else {
                warn!("Progress state mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    *phase = name;
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(name);
                }
                Progress::PhaseFinish => {
                    pb.disable_steady_tick();
                    pb.finish_with_message(format!("✓ {} done", *phase));
                }
                Progress::TaskStart { total_steps } => {
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total_steps);
                    pb.set_position(0);
                    pb.set_style(bar_style());
                    pb.set_message(*phase);
                }
                Progress::TaskIncrement => pb.inc(1),
                Progress::TaskFinish => {
                    let total = pb.length().unwrap_or(0);
                    if pb.position() < total {
                        pb.set_position(total);
                    }
                }
                Progress::Message(msg) => {
                    if pb.is_finished() {
                        pb.set_message(msg);
                    } else {
                        pb.println(format!("  {}", msg));
                    }
                }
            }
        })
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|e| {
        warn!("Invalid spinner template: {}", e);
        ProgressStyle::default_spinner()
    })
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<14} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|e| {
            warn!("Invalid progress bar template: {}", e);
            ProgressStyle::default_bar()
        })
        .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new(false);
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn synthesis_events_drive_the_bar() {
        let handler = CliProgressHandler::new(false);
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Synthesis" });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Synthesis");
            assert!(!pb.is_finished());
        }

        callback(Progress::TaskStart { total_steps: 3 });
        callback(Progress::TaskIncrement);
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 1);
        }

        callback(Progress::TaskFinish);
        assert_eq!(handler.pb.lock().unwrap().position(), 3);

        callback(Progress::PhaseFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.message(), "✓ Synthesis done");
        }
    }

    #[test]
    fn messages_after_finish_replace_the_status() {
        let handler = CliProgressHandler::new(false);
        let callback = handler.get_callback();
        callback(Progress::Message("Wrote 4 draws".to_string()));
        assert_eq!(handler.pb.lock().unwrap().message(), "Wrote 4 draws");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new(false);
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Perturbation",
            });
            callback(Progress::TaskStart { total_steps: 2 });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Perturbation done");
    }
}
