//! The screen actor: one thread, one mailbox, one terminal.
//!
//! All public operations are messages into the actor's mailbox; the actor
//! serializes every state mutation and is the only code that writes to the
//! terminal. Redraws are paced by a deadline on the mailbox wait, so a tick
//! is armed exactly while there is work to paint.
//!
//! ```text
//! ┌───────────┐  add_block / update   ┌──────────────────┐
//! │  Handles  │ ────────────────────▶ │                  │
//! │ (cloned)  │  put_chars (deferred  │   Screen Actor   │──▶ Terminal
//! └───────────┘   ack after paint)    │  mailbox + tick  │
//!       ▲                             │                  │
//!       └──────── io replies ──────── └──────────────────┘
//! ```

mod engine;
mod messages;

pub use engine::{LiveScreen, ScreenConfig};
