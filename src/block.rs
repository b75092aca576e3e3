//! Block store and write buffer: the model the renderer reconciles against.
//!
//! The actor is the sole mutator of everything in this module; no internal
//! synchronization exists or is needed.

use crate::protocol::ReplySink;
use crate::style::StyledText;
use std::any::Any;
use std::collections::HashMap;

/// Type-erased block state. Typed registration wraps the user's render
/// function with the matching downcast.
pub(crate) type BoxState = Box<dyn Any + Send>;

/// A block's render function: pure `state -> styled data`.
pub(crate) type RenderFn = Box<dyn Fn(&(dyn Any + Send)) -> StyledText + Send>;

/// One sticky block: identity is the map key in [`BlockStore`].
pub(crate) struct Block {
    /// Last state seen (initial state until the first update is applied).
    pub(crate) state: BoxState,
    /// Pure render function.
    pub(crate) render: RenderFn,
    /// Styled data last painted, cached between ticks.
    pub(crate) last_content: Option<StyledText>,
    /// Rows the last paint occupied; at least 1 once the block is rendered.
    pub(crate) last_height: usize,
}

impl Block {
    /// Render through the block's function using its current state.
    pub(crate) fn render_current(&self) -> StyledText {
        (self.render)(&*self.state)
    }
}

/// Holds block identities, states, render functions, and paint caches.
#[derive(Default)]
pub(crate) struct BlockStore {
    /// All known blocks by id.
    pub(crate) blocks: HashMap<String, Block>,
    /// Ids painted at least once, in on-screen top-to-bottom order.
    pub(crate) rendered: Vec<String>,
    /// Ids registered but not yet painted, in registration order.
    pub(crate) pending: Vec<String>,
    /// New states recorded since the last tick, coalesced per id.
    pub(crate) pending_states: HashMap<String, BoxState>,
}

impl BlockStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// True when no block is known at all.
    pub(crate) fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Register a block. The id lands in the pending list and is painted at
    /// the bottom on the next tick. Ids are expected to be unique; a
    /// duplicate shadows the original.
    pub(crate) fn register(&mut self, id: String, state: BoxState, render: RenderFn) {
        debug_assert!(
            !self.blocks.contains_key(&id),
            "duplicate block id {id:?}"
        );
        self.blocks.insert(
            id.clone(),
            Block {
                state,
                render,
                last_content: None,
                last_height: 0,
            },
        );
        self.pending.push(id);
    }

    /// Record a new state for `id`, replacing any state recorded since the
    /// last tick. Unknown ids are ignored.
    pub(crate) fn set_state(&mut self, id: &str, state: BoxState) {
        if self.blocks.contains_key(id) {
            self.pending_states.insert(id.to_string(), state);
        }
    }

    /// Total rows currently occupied by the rendered blocks.
    pub(crate) fn rendered_height(&self) -> usize {
        self.rendered
            .iter()
            .filter_map(|id| self.blocks.get(id))
            .map(|block| block.last_height)
            .sum()
    }
}

/// Queued above-writes between ticks: byte chunks in submission order, each
/// with the address awaiting the painted acknowledgement.
#[derive(Default)]
pub(crate) struct WriteQueue {
    entries: Vec<(Vec<u8>, ReplySink)>,
}

impl WriteQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, bytes: Vec<u8>, reply: ReplySink) {
        self.entries.push((bytes, reply));
    }

    /// Drain the queue: all bytes concatenated in FIFO order, plus the reply
    /// sinks in the same order.
    pub(crate) fn drain(&mut self) -> (Vec<u8>, Vec<ReplySink>) {
        let mut bytes = Vec::new();
        let mut replies = Vec::with_capacity(self.entries.len());
        for (chunk, reply) in self.entries.drain(..) {
            bytes.extend_from_slice(&chunk);
            replies.push(reply);
        }
        (bytes, replies)
    }
}

/// Everything the tick renderer reconciles: blocks, queued writes, and the
/// one-row cursor-accounting flag.
pub(crate) struct ScreenState {
    pub(crate) store: BlockStore,
    pub(crate) queue: WriteQueue,
    /// True once any above-write has been painted. The next above-write
    /// moves up one extra row to land on the line its predecessor's trailing
    /// newline opened.
    pub(crate) above_paint_done: bool,
}

impl ScreenState {
    pub(crate) fn new() -> Self {
        Self {
            store: BlockStore::new(),
            queue: WriteQueue::new(),
            above_paint_done: false,
        }
    }

    /// Forget everything: blocks detach, caches and queued writes drop, the
    /// next registration starts a fresh terminal region.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn identity_render() -> RenderFn {
        Box::new(|state| {
            state
                .downcast_ref::<StyledText>()
                .cloned()
                .unwrap_or_else(|| StyledText::plain(""))
        })
    }

    #[test]
    fn test_register_goes_pending() {
        let mut store = BlockStore::new();
        store.register(
            "a".to_string(),
            Box::new(StyledText::plain("A")),
            identity_render(),
        );
        assert_eq!(store.pending, vec!["a"]);
        assert!(store.rendered.is_empty());
        assert!(!store.is_empty());
    }

    #[test]
    fn test_set_state_unknown_id_ignored() {
        let mut store = BlockStore::new();
        store.set_state("ghost", Box::new(StyledText::plain("x")));
        assert!(store.pending_states.is_empty());
    }

    #[test]
    fn test_set_state_coalesces() {
        let mut store = BlockStore::new();
        store.register(
            "a".to_string(),
            Box::new(StyledText::plain("A")),
            identity_render(),
        );
        store.set_state("a", Box::new(StyledText::plain("1")));
        store.set_state("a", Box::new(StyledText::plain("2")));
        assert_eq!(store.pending_states.len(), 1);
        let state = store.pending_states.get("a").unwrap();
        assert_eq!(
            state.downcast_ref::<StyledText>(),
            Some(&StyledText::plain("2"))
        );
    }

    #[test]
    fn test_queue_drains_fifo() {
        let (tx, _rx) = unbounded();
        let mut queue = WriteQueue::new();
        queue.push(
            b"one".to_vec(),
            ReplySink {
                reply_to: tx.clone(),
                token: 1,
            },
        );
        queue.push(
            b"two".to_vec(),
            ReplySink {
                reply_to: tx,
                token: 2,
            },
        );
        let (bytes, replies) = queue.drain();
        assert_eq!(bytes, b"onetwo");
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].token, 1);
        assert!(queue.is_empty());
    }
}
