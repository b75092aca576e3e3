//! Demo: per-task progress blocks with a log stream above them.
//!
//! Run with: `cargo run --example progress_demo`

use footlight::{LiveScreen, ScreenConfig, Style, StyledText};
use std::io::Write;
use std::time::Duration;

fn progress_line(task: &str, done: u32) -> StyledText {
    let bar = "#".repeat((done / 10) as usize);
    StyledText::concat(vec![
        StyledText::styled(format!("{task:<10}"), Style::new().bold()),
        StyledText::plain(format!(" [{bar:<10}] {done}%")),
    ])
}

fn main() {
    let screen = match LiveScreen::start(ScreenConfig::default()) {
        Ok(screen) => screen,
        Err(err) => {
            eprintln!("falling back to plain output: {err}");
            return;
        }
    };

    screen.add_block_with("download", 0u32, |done| progress_line("download", *done));
    screen.add_block_with("compile", 0u32, |done| progress_line("compile", *done));

    let mut log = screen.writer();
    for step in 0..=10u32 {
        screen.update("download", step * 10);
        if step >= 3 {
            screen.update("compile", (step - 3) * 100 / 7);
        }
        writeln!(log, "step {step}: still busy").unwrap();
        std::thread::sleep(Duration::from_millis(200));
    }
    log.flush().unwrap();

    screen.stop();
    println!("done");
}
