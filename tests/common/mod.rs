//! Shared test support: a terminal that captures instead of painting.

use footlight::Terminal;
use std::io;
use std::sync::{Arc, Mutex};

/// A [`Terminal`] that records every write for later inspection.
#[derive(Clone)]
pub struct CaptureTerminal {
    data: Arc<Mutex<Vec<u8>>>,
    columns: Option<u16>,
}

impl CaptureTerminal {
    /// A capturing terminal reporting the given width.
    pub fn new(columns: u16) -> Self {
        Self {
            data: Arc::new(Mutex::new(Vec::new())),
            columns: Some(columns),
        }
    }

    /// A device that reports "no terminal here".
    #[allow(dead_code)]
    pub fn no_terminal() -> Self {
        Self {
            data: Arc::new(Mutex::new(Vec::new())),
            columns: None,
        }
    }

    /// Everything written so far, as a string.
    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        String::from_utf8(self.data.lock().unwrap().clone()).unwrap()
    }

    /// Drain and return everything written so far.
    #[allow(dead_code)]
    pub fn take(&self) -> String {
        String::from_utf8(std::mem::take(&mut *self.data.lock().unwrap())).unwrap()
    }
}

impl Terminal for CaptureTerminal {
    fn columns(&self) -> Option<u16> {
        self.columns
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.data.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }
}
