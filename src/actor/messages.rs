//! Mailbox message types for the screen actor.

use crate::block::{BoxState, RenderFn};
use crate::protocol::IoRequest;
use crossbeam_channel::Sender;

/// Everything a handle can ask of the actor.
///
/// Block commands are fire-and-forget; lifecycle requests carry a reply
/// channel the actor answers after the work is done.
pub(crate) enum Request {
    /// Register a new block (painted at the bottom on the next tick).
    AddBlock {
        /// Caller-supplied unique id.
        id: String,
        /// Initial state.
        state: BoxState,
        /// Render function.
        render: RenderFn,
    },
    /// Record a new state for a block; unknown ids are dropped silently.
    Update {
        /// Target block id.
        id: String,
        /// Replacement state.
        state: BoxState,
    },
    /// Immediate tick, then detach all blocks and reset engine state.
    Flush {
        /// Acked once the reset is complete.
        reply: Sender<()>,
    },
    /// Final tick, then exit the actor.
    Stop {
        /// Acked right before the actor exits.
        reply: Sender<()>,
    },
    /// Immediate tick without waiting for the timer. Debug aid and test
    /// synchronization point.
    RenderNow {
        /// Acked once the tick has been written.
        reply: Sender<()>,
    },
    /// A request over the I/O-device protocol.
    Io(IoRequest),
}
