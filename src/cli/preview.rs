//! `preview` command: play the typewriter in the terminal.
//!
//! The typewriter runs against an in-memory page and a [`VirtualClock`]. A
//! tokio timer sleeps until the clock's next deadline, then runs the due
//! step, and the target element's text is redrawn on a single line.

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use owo_colors::OwoColorize;
use retrofolio::PageConfig;
use retrofolio::behavior::{Typewriter, TypewriterState};
use retrofolio::dom::{Dom, MemoryDom};
use retrofolio::logger::LiveLine;
use retrofolio::schedule::{Scheduler, VirtualClock};

use super::PreviewArgs;

/// Longest uninterrupted sleep, so Ctrl+C is noticed promptly.
const POLL: Duration = Duration::from_millis(100);

/// Counts completed texts from consecutive typewriter states.
#[derive(Debug, Default)]
struct Progress {
    texts_done: u64,
}

impl Progress {
    /// A text is done when deleting flips back to typing.
    fn observe(&mut self, was_deleting: bool, state: &TypewriterState) {
        if was_deleting && !state.is_deleting() {
            self.texts_done += 1;
        }
    }

    fn cycles_done(&self, texts: usize) -> u64 {
        self.texts_done / texts.max(1) as u64
    }
}

pub fn run_preview(args: &PreviewArgs, config: &PageConfig) -> Result<()> {
    if !(args.speed.is_finite() && args.speed > 0.0) {
        bail!("--speed must be a positive number, got {}", args.speed);
    }
    let texts = if args.texts.is_empty() {
        config.typewriter.texts.clone()
    } else {
        args.texts.clone()
    };

    let dom = Rc::new(MemoryDom::new());
    let body = dom.body().context("in-memory page has no body")?;
    let target = dom.add(&body, "span", &[("id", config.typewriter.element.as_str())]);
    let clock = Rc::new(VirtualClock::new());

    let state = TypewriterState::new(texts)?;
    let text_count = state.texts().len();
    let typewriter = Typewriter::new(&dom, clock.clone(), target, state, config.typewriter.timing());

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))
        .map_err(|e| anyhow!("failed to set Ctrl+C handler: {}", e))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start timer runtime")?;

    retrofolio::log!("preview"; "{} texts, Ctrl+C to stop", text_count);
    let mut line = LiveLine::new();
    let mut progress = Progress::default();

    let result = runtime.block_on(async {
        typewriter.start();
        loop {
            if let Some(frame) = typewriter.last_frame() {
                line.show(&format!("{} {}{}", ">".dimmed(), frame.visible, "█".green()));
            }
            if args.cycles > 0 && progress.cycles_done(text_count) >= u64::from(args.cycles) {
                break;
            }
            let Some(deadline) = clock.next_deadline() else {
                break;
            };

            let wait = scaled(deadline.saturating_sub(clock.now()), args.speed)?;
            if !sleep_unless_stopped(wait, &stop).await {
                break;
            }

            let was_deleting = typewriter.state().is_deleting();
            clock.run_next();
            progress.observe(was_deleting, &typewriter.state());
        }
        Ok::<_, anyhow::Error>(())
    });

    typewriter.stop();
    line.finish();
    retrofolio::debug!("preview"; "{} texts typed", progress.texts_done);
    result
}

/// Real time to wait for `wait` of page time at playback `speed`.
fn scaled(wait: Duration, speed: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(wait.as_secs_f64() / speed)
        .with_context(|| format!("--speed {speed} stretches a {wait:?} wait out of range"))
}

/// Sleep for `total`, waking every [`POLL`] to check `stop`.
///
/// Returns `false` when stopped.
async fn sleep_unless_stopped(total: Duration, stop: &AtomicBool) -> bool {
    let mut left = total;
    while !left.is_zero() {
        if stop.load(Ordering::SeqCst) {
            return false;
        }
        let chunk = left.min(POLL);
        tokio::time::sleep(chunk).await;
        left -= chunk;
    }
    !stop.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrofolio::behavior::typewriter::Timing;

    #[test]
    fn test_progress_counts_completed_texts() {
        let timing = Timing::default();
        let mut state = TypewriterState::new(vec!["ab".to_owned(), "c".to_owned()]).unwrap();
        let mut progress = Progress::default();

        // "ab": 2 typing, 1 flip, 2 deleting. "c": 1 typing, 1 flip, 1 deleting.
        for _ in 0..8 {
            let was_deleting = state.is_deleting();
            state.step(&timing);
            progress.observe(was_deleting, &state);
        }
        assert_eq!(progress.texts_done, 2);
        assert_eq!(progress.cycles_done(2), 1);
    }

    #[test]
    fn test_scaled_wait() {
        let wait = Duration::from_millis(100);
        assert_eq!(scaled(wait, 2.0).unwrap(), Duration::from_millis(50));
        assert_eq!(scaled(wait, 0.5).unwrap(), Duration::from_millis(200));
        assert!(scaled(wait, 1e-30).is_err());
    }

    #[tokio::test]
    async fn test_sleep_stops_early() {
        let stop = AtomicBool::new(true);
        assert!(!sleep_unless_stopped(Duration::from_secs(5), &stop).await);

        let stop = AtomicBool::new(false);
        assert!(sleep_unless_stopped(Duration::from_millis(1), &stop).await);
    }
}
