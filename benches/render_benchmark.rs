//! Full-tick benchmark: update a screenful of blocks and paint them.
//!
//! Target: a tick over a few dozen dirty blocks should stay well under the
//! 100 ms refresh interval; this keeps an eye on the reconciliation cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use footlight::{LiveScreen, ScreenConfig, Terminal, WidthMode};
use std::io;
use std::time::Duration;

/// A terminal that swallows output; the benchmark measures reconciliation
/// and payload assembly, not device speed.
struct NullTerminal;

impl Terminal for NullTerminal {
    fn columns(&self) -> Option<u16> {
        Some(120)
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        black_box(bytes);
        Ok(())
    }
}

fn start_screen(blocks: usize) -> LiveScreen {
    let screen = LiveScreen::start_with(
        ScreenConfig {
            name: Some("bench".to_string()),
            refresh_every: Duration::from_secs(3600),
            terminal_width: WidthMode::Fixed(120),
        },
        NullTerminal,
    )
    .expect("screen should start");
    for i in 0..blocks {
        screen.add_block(format!("task-{i}"), format!("task {i}: queued"));
    }
    screen.render_now();
    screen
}

fn tick_all_blocks_dirty(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_all_dirty");
    for blocks in [4usize, 16, 64] {
        let screen = start_screen(blocks);
        let mut step = 0u64;
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, &blocks| {
            b.iter(|| {
                step += 1;
                for i in 0..blocks {
                    screen.update(format!("task-{i}"), format!("task {i}: step {step}"));
                }
                screen.render_now();
            });
        });
        screen.stop();
    }
    group.finish();
}

fn tick_single_dirty_block(c: &mut Criterion) {
    let screen = start_screen(64);
    let mut step = 0u64;
    c.bench_function("tick_64_blocks_one_dirty", |b| {
        b.iter(|| {
            step += 1;
            screen.update("task-32", format!("task 32: step {step}"));
            screen.render_now();
        });
    });
    screen.stop();
}

fn tick_interleaved_writes(c: &mut Criterion) {
    let screen = start_screen(8);
    c.bench_function("tick_8_blocks_with_log_line", |b| {
        b.iter(|| {
            screen.put_chars(b"compiled another file just fine\n".to_vec());
            screen.render_now();
        });
    });
    screen.stop();
}

criterion_group!(
    benches,
    tick_all_blocks_dirty,
    tick_single_dirty_block,
    tick_interleaved_writes
);
criterion_main!(benches);
