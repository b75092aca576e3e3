//! `LiveWriter`: the engine as a standard writer.
//!
//! Loggers and other byte producers rarely speak the device protocol
//! directly; they want an [`std::io::Write`]. This adapter submits each
//! `write` as a deferred above-write and turns `flush` into "wait until
//! everything I wrote has actually been painted".

use crate::actor::LiveScreen;
use crate::protocol::IoReply;
use crossbeam_channel::Receiver;
use std::io::{self, Write};

/// An [`io::Write`] over a [`LiveScreen`].
///
/// Bytes written here appear above the sticky block region, in submission
/// order, on the next tick. Each writer tracks its own in-flight writes;
/// clones of the underlying screen handle may be wrapped in as many writers
/// as needed.
pub struct LiveWriter {
    screen: LiveScreen,
    in_flight: Vec<Receiver<IoReply>>,
}

impl LiveWriter {
    pub(crate) fn new(screen: LiveScreen) -> Self {
        Self {
            screen,
            in_flight: Vec::new(),
        }
    }
}

impl Write for LiveWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.in_flight.push(self.screen.put_chars(buf.to_vec()));
        Ok(buf.len())
    }

    /// Block until every byte written through this writer has been painted.
    fn flush(&mut self) -> io::Result<()> {
        for pending in self.in_flight.drain(..) {
            match pending.recv() {
                Ok(IoReply { result: Ok(()), .. }) => {}
                Ok(IoReply {
                    result: Err(err), ..
                }) => return Err(io::Error::new(io::ErrorKind::InvalidInput, err)),
                Err(_) => return Err(io::ErrorKind::BrokenPipe.into()),
            }
        }
        Ok(())
    }
}
