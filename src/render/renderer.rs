//! The differential renderer: one tick in, one composite byte string out.
//!
//! A tick reconciles the in-memory block model against what the terminal
//! currently shows, using only cursor-relative motion. It runs three phases
//! whose outputs are concatenated into a single payload:
//!
//! 1. **Above-writes**: queued bytes overwrite the top of the block region
//!    (the blocks get repainted right after), so streaming text scrolls away
//!    above the sticky blocks.
//! 2. **Repaints**: blocks with new state, plus everything invalidated by an
//!    above-write or by an earlier block growing taller, are overdrawn as
//!    fixed-height rectangles.
//! 3. **New blocks**: freshly registered blocks append at the bottom, where
//!    the cursor already sits.
//!
//! Every padded line and block row is newline-terminated, so each phase ends
//! with the cursor in column 0 on the row the next phase paints. After the
//! full payload is written, the cursor rests on the line after the last
//! block.

use super::boxed;
use super::output::OutputBuffer;
use crate::block::ScreenState;
use crate::protocol::ReplySink;
use crate::style::{ansi, StyledText};

/// Result of one tick: the composite payload and the write acknowledgements
/// to deliver once it has reached the terminal.
pub(crate) struct TickOutput {
    pub(crate) bytes: Vec<u8>,
    pub(crate) replies: Vec<ReplySink>,
}

/// Split styled content into terminal rows no wider than `width`.
///
/// Returns the rendered rows and the row count. Empty content is one empty
/// row of height 1.
fn render_rows(content: &StyledText, width: usize) -> (Vec<String>, usize) {
    let rows: Vec<String> = content
        .chunk_every(width)
        .iter()
        .map(StyledText::to_ansi)
        .collect();
    let height = rows.len();
    (rows, height)
}

/// Run one full tick against `state`, producing the composite payload.
///
/// Mutates the model exactly as the paint it describes: pending states are
/// consumed, pending blocks move to rendered, paint caches update, the write
/// queue drains.
pub(crate) fn render_tick(state: &mut ScreenState, width: usize) -> TickOutput {
    let width = width.max(1);
    let mut out = OutputBuffer::new();
    let mut replies = Vec::new();

    let wrote_above = flush_above(state, width, &mut out, &mut replies);
    // Only a verbatim (no-cursor-motion) above-write can leave the payload
    // mid-line; padded output and block rows are newline-terminated.
    let mut need_separator = wrote_above && !out.ends_with_newline();

    repaint_blocks(state, width, wrote_above, &mut out, &mut need_separator);
    paint_new(state, width, &mut out, &mut need_separator);

    state.store.pending_states.clear();

    TickOutput {
        bytes: out.into_bytes(),
        replies,
    }
}

/// Phase 1: drain the write queue above the block region.
///
/// The cursor moves up over the rendered blocks (one extra row after the
/// first above-write, to land on the line the previous write's trailing
/// newline opened) and the queued bytes are emitted padded to the terminal
/// width, erasing the block rows they overwrite. With nothing rendered yet
/// the bytes pass through verbatim.
fn flush_above(
    state: &mut ScreenState,
    width: usize,
    out: &mut OutputBuffer,
    replies: &mut Vec<ReplySink>,
) -> bool {
    if state.queue.is_empty() {
        return false;
    }
    let (bytes, mut sinks) = state.queue.drain();
    let blocks_height = state.store.rendered_height();
    let up = if state.above_paint_done {
        blocks_height + 1
    } else {
        blocks_height
    };
    if up == 0 {
        out.write_raw(&bytes);
    } else {
        out.cursor_up(up);
        out.write_raw(&ansi::pad_to_width(&bytes, width));
    }
    state.above_paint_done = true;
    replies.append(&mut sinks);
    true
}

/// Phase 2: overdraw invalidated rendered blocks.
///
/// Walks the rendered list top to bottom. Untouched runs are skipped with a
/// `cursor_down`; each emitted block covers `max(new, old)` rows so a
/// shrinking block erases its stale tail. A block that grew forces every
/// later block to repaint at its pushed-down offset.
fn repaint_blocks(
    state: &mut ScreenState,
    width: usize,
    force_all: bool,
    out: &mut OutputBuffer,
    need_separator: &mut bool,
) {
    let ids: Vec<String> = state.store.rendered.clone();
    if ids.is_empty() {
        return;
    }
    let height_before = state.store.rendered_height();

    let mut body = OutputBuffer::new();
    let mut pending_offset = 0usize;
    let mut force = force_all;
    let mut emitted_any = false;

    for id in &ids {
        let changed = state.store.pending_states.contains_key(id);
        if !(force || changed) {
            if let Some(block) = state.store.blocks.get(id) {
                pending_offset += block.last_height;
            }
            continue;
        }
        if let Some(new_state) = state.store.pending_states.remove(id) {
            if let Some(block) = state.store.blocks.get_mut(id) {
                block.state = new_state;
            }
        }
        let Some(block) = state.store.blocks.get_mut(id) else {
            continue;
        };
        let content = block.render_current();
        let (rows, new_height) = render_rows(&content, width);
        let old_height = block.last_height;
        let box_height = new_height.max(old_height);

        body.cursor_down(pending_offset);
        pending_offset = 0;
        for row in boxed::fit(rows, width, box_height) {
            body.write_str(&row);
            body.newline();
        }

        block.last_content = Some(content);
        block.last_height = box_height;
        if new_height > old_height {
            force = true;
        }
        emitted_any = true;
    }

    if !emitted_any {
        return;
    }
    if *need_separator {
        out.newline();
        *need_separator = false;
    }
    if !force_all {
        // After an above-write the cursor already sits at the top of the
        // block region.
        out.cursor_up(height_before);
    }
    out.write_raw(&body.into_bytes());
    out.cursor_down(pending_offset);
}

/// Phase 3: paint newly registered blocks at the bottom.
fn paint_new(
    state: &mut ScreenState,
    width: usize,
    out: &mut OutputBuffer,
    need_separator: &mut bool,
) {
    let ids: Vec<String> = std::mem::take(&mut state.store.pending);
    for id in ids {
        if let Some(new_state) = state.store.pending_states.remove(&id) {
            if let Some(block) = state.store.blocks.get_mut(&id) {
                block.state = new_state;
            }
        }
        let Some(block) = state.store.blocks.get_mut(&id) else {
            continue;
        };
        let content = block.render_current();
        let (rows, height) = render_rows(&content, width);

        if *need_separator {
            out.newline();
            *need_separator = false;
        }
        for row in rows {
            out.write_str(&row);
            out.newline();
        }

        block.last_content = Some(content);
        block.last_height = height;
        state.store.rendered.push(id);
    }
}
