//! Engine error types.

use thiserror::Error;

/// Why the engine declined to start.
///
/// Callers hitting [`StartError::NoTerminal`] should fall back to plain
/// writes; there is no live region to own.
#[derive(Debug, Error)]
pub enum StartError {
    /// The width source reported no terminal.
    #[error("no terminal available")]
    NoTerminal,
    /// The actor thread could not be spawned.
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),
}
