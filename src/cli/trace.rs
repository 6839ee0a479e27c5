//! `trace` command: print typewriter steps without waiting for them.

use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use retrofolio::PageConfig;
use retrofolio::behavior::TypewriterState;
use retrofolio::behavior::typewriter::Timing;

/// State right after one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub step: usize,
    /// When the step ran, counted from the first step.
    pub at: Duration,
    pub text_index: usize,
    pub char_index: usize,
    pub deleting: bool,
    pub visible: String,
}

/// Run `steps` steps from a fresh state.
pub fn trace_rows(mut state: TypewriterState, timing: &Timing, steps: usize) -> Vec<TraceRow> {
    let mut at = Duration::ZERO;
    (1..=steps)
        .map(|step| {
            let frame = state.step(timing);
            let row = TraceRow {
                step,
                at,
                text_index: state.text_index(),
                char_index: state.char_index(),
                deleting: state.is_deleting(),
                visible: frame.visible,
            };
            at += frame.delay;
            row
        })
        .collect()
}

pub fn run_trace(steps: usize, config: &PageConfig) -> Result<()> {
    let state = TypewriterState::new(config.typewriter.texts.clone())?;
    let rows = trace_rows(state, &config.typewriter.timing(), steps);

    println!(
        "{}",
        format!("{:>5} {:>9}  {:>4} {:>4}  {:<6}  visible", "step", "at", "text", "char", "mode")
            .dimmed()
    );
    for row in rows {
        let mode = if row.deleting { "delete" } else { "type" };
        println!(
            "{:>5} {:>7}ms  {:>4} {:>4}  {:<6}  {}{}",
            row.step,
            row.at.as_millis(),
            row.text_index,
            row.char_index,
            mode,
            row.visible,
            "█".green()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_trace_two_texts() {
        let timing = Timing {
            type_speed: ms(10),
            delete_speed: ms(5),
            pause: ms(100),
            next_word: ms(50),
        };
        let state = TypewriterState::new(vec!["AB".to_owned(), "C".to_owned()]).unwrap();
        let rows = trace_rows(state, &timing, 6);

        let visible: Vec<_> = rows.iter().map(|r| r.visible.as_str()).collect();
        assert_eq!(visible, ["A", "AB", "AB", "A", "", "C"]);

        let at: Vec<_> = rows.iter().map(|r| r.at).collect();
        assert_eq!(at, [ms(0), ms(10), ms(110), ms(115), ms(120), ms(170)]);

        assert!(rows[2].deleting);
        assert_eq!(rows[4].text_index, 1);
        assert!(!rows[4].deleting);
    }

    #[test]
    fn test_zero_steps() {
        let state = TypewriterState::new(vec!["x".to_owned()]).unwrap();
        assert!(trace_rows(state, &Timing::default(), 0).is_empty());
    }
}
