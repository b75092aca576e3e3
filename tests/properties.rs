//! Property tests for the renderer's ordering and height guarantees.

mod common;

use common::CaptureTerminal;
use footlight::{LiveScreen, ScreenConfig, WidthMode};
use proptest::prelude::*;
use std::time::Duration;

const WIDTH: u16 = 50;

fn start(terminal: &CaptureTerminal) -> LiveScreen {
    LiveScreen::start_with(
        ScreenConfig {
            name: None,
            refresh_every: Duration::from_secs(3600),
            terminal_width: WidthMode::Fixed(WIDTH),
        },
        terminal.clone(),
    )
    .expect("screen should start")
}

proptest! {
    /// Bytes submitted in one tick with no blocks pass through verbatim,
    /// concatenated in submission order.
    #[test]
    fn writes_concatenate_in_submission_order(chunks in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let terminal = CaptureTerminal::new(WIDTH);
        let screen = start(&terminal);
        for chunk in &chunks {
            screen.put_chars(chunk.as_bytes().to_vec());
        }
        screen.render_now();
        prop_assert_eq!(terminal.take(), chunks.concat());
        screen.stop();
    }

    /// With blocks painted below, submitted text still appears above them in
    /// submission order across ticks.
    #[test]
    fn writes_stay_ordered_across_ticks(lines in prop::collection::vec("[a-z]{1,8}", 2..5)) {
        let terminal = CaptureTerminal::new(WIDTH);
        let screen = start(&terminal);
        screen.add_block("status", "running");
        screen.render_now();

        for line in &lines {
            screen.put_chars(format!("{line}\n"));
            screen.render_now();
        }
        let painted = terminal.take();
        let mut from = 0;
        for line in &lines {
            let at = painted[from..].find(line.as_str());
            prop_assert!(at.is_some(), "{line} missing or out of order");
            from += at.unwrap() + line.len();
        }
        screen.stop();
    }

    /// Re-submitting the same state produces the same bytes as submitting it
    /// once: coalescing is idempotent.
    #[test]
    fn coalescing_is_idempotent(state in "[a-z]{1,20}", repeats in 1usize..4) {
        let run = |times: usize| {
            let terminal = CaptureTerminal::new(WIDTH);
            let screen = start(&terminal);
            screen.add_block("a", "initial");
            screen.render_now();
            terminal.take();
            for _ in 0..times {
                screen.update("a", state.clone());
            }
            screen.render_now();
            let painted = terminal.take();
            screen.stop();
            painted
        };
        prop_assert_eq!(run(repeats), run(1));
    }

    /// A repaint always covers max(new, old) rows, so shrinking content
    /// still erases its stale tail.
    #[test]
    fn repaint_height_is_monotonic(first in 1usize..5, second in 1usize..5) {
        let content = |rows: usize| {
            (0..rows).map(|i| format!("row{i}")).collect::<Vec<_>>().join("\n")
        };
        let terminal = CaptureTerminal::new(WIDTH);
        let screen = start(&terminal);
        screen.add_block("a", content(first));
        screen.render_now();
        terminal.take();

        screen.update("a", content(second));
        screen.render_now();
        let painted = terminal.take();
        let rows = painted.matches('\n').count();
        prop_assert_eq!(rows, first.max(second));
        screen.stop();
    }
}
