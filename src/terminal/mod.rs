//! The terminal seam: width probing and the single write per tick.
//!
//! The engine owns its terminal through this narrow trait so tests and
//! non-stdout devices can stand in. The real implementation probes columns
//! with crossterm and writes to a locked stdout.

use std::io::{self, Write};

/// Width configuration for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthMode {
    /// Ask the terminal for its column count on every tick.
    #[default]
    Auto,
    /// Use a fixed column count and never probe.
    Fixed(u16),
}

/// A write-only terminal device.
///
/// `columns` returning `None` means "no terminal here"; the engine refuses
/// to start against such a device.
pub trait Terminal: Send {
    /// Current column count, or `None` when the device is not a terminal.
    fn columns(&self) -> Option<u16>;

    /// Write one tick's composite payload in a single call.
    ///
    /// # Errors
    ///
    /// Propagates the underlying device error; the engine treats any error
    /// as fatal and shuts down.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// The process stdout as a [`Terminal`].
#[derive(Debug, Default)]
pub struct StdoutTerminal;

impl StdoutTerminal {
    /// Create a stdout terminal.
    pub const fn new() -> Self {
        Self
    }
}

impl Terminal for StdoutTerminal {
    fn columns(&self) -> Option<u16> {
        crossterm::terminal::size().ok().map(|(cols, _rows)| cols)
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }
}
