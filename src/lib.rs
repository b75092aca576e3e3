//! # Footlight
//!
//! A flicker-free live-screen engine for terminals: named sticky blocks at
//! the bottom of the screen, streaming text above them, no tearing.
//!
//! Footlight is the kind of component build tools and deployment scripts use
//! to show per-task progress while a logger keeps printing unrelated lines.
//!
//! ## Core Concepts
//!
//! - **Sticky blocks**: named, re-renderable regions pinned at the bottom
//! - **Above-writes**: arbitrary bytes that always land above the blocks
//! - **Differential repaints**: only changed blocks are overdrawn, as whole
//!   rectangles, with cursor-relative motion
//! - **Actor model**: one thread owns the terminal; handles are thin senders
//! - **Throttled ticks**: redraws are paced (100 ms by default) so update
//!   rate never drives render cost
//!
//! ## Example
//!
//! ```rust,ignore
//! use footlight::{LiveScreen, ScreenConfig};
//!
//! let screen = LiveScreen::start(ScreenConfig::default())?;
//! screen.add_block("build", "building...");
//! screen.update("build", "building... 42%");
//! screen.put_chars("compiled src/main.rs\n");
//! screen.stop();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
mod block;
pub mod error;
pub mod protocol;
pub mod render;
pub mod style;
pub mod terminal;
mod writer;

// Re-exports for convenience
pub use actor::{LiveScreen, ScreenConfig};
pub use error::StartError;
pub use protocol::{ByteProducer, IoError, IoOp, IoReply, IoRequest};
pub use style::{Modifiers, Rgb, Style, StyledText};
pub use terminal::{StdoutTerminal, Terminal, WidthMode};
pub use writer::LiveWriter;
