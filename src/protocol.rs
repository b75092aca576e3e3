//! The I/O-device protocol: the engine as a write-capable device.
//!
//! External writers (loggers, build output) talk to the engine through
//! [`IoOp`] requests and get [`IoReply`] answers. Writes are deferred: the
//! reply for a `put_chars` arrives only after the tick that actually paints
//! the bytes above the block region. Everything that would read from the
//! device answers immediately with [`IoError::NotSupported`].

use crossbeam_channel::Sender;
use thiserror::Error;

/// A producer evaluated by the engine to obtain the bytes to write.
///
/// This is the single deferred-producer form the device supports; the
/// engine runs it synchronously when the request is handled.
pub type ByteProducer = Box<dyn FnOnce() -> Vec<u8> + Send>;

/// Requests understood by the engine's I/O-device surface.
pub enum IoOp {
    /// Write bytes above the sticky block region.
    PutChars(Vec<u8>),
    /// Write the bytes returned by a producer, evaluated on receipt.
    PutCharsWith(ByteProducer),
    /// Read request (not supported).
    GetChars,
    /// Line read request (not supported).
    GetLine,
    /// Delimited read request (not supported).
    GetUntil,
    /// Password read request (not supported).
    GetPassword,
    /// Device option update (not supported).
    SetOpts,
    /// Device option query (not supported).
    GetOpts,
    /// Geometry query (not supported).
    GetGeometry,
    /// Batched request list (not supported).
    Requests,
    /// Anything the device does not recognize.
    Other(String),
}

impl std::fmt::Debug for IoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PutChars(bytes) => f.debug_tuple("PutChars").field(&bytes.len()).finish(),
            Self::PutCharsWith(_) => f.write_str("PutCharsWith(..)"),
            Self::GetChars => f.write_str("GetChars"),
            Self::GetLine => f.write_str("GetLine"),
            Self::GetUntil => f.write_str("GetUntil"),
            Self::GetPassword => f.write_str("GetPassword"),
            Self::SetOpts => f.write_str("SetOpts"),
            Self::GetOpts => f.write_str("GetOpts"),
            Self::GetGeometry => f.write_str("GetGeometry"),
            Self::Requests => f.write_str("Requests"),
            Self::Other(name) => f.debug_tuple("Other").field(name).finish(),
        }
    }
}

/// Errors answered over the device protocol.
///
/// These are replies, never panics or log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IoError {
    /// The operation is recognized but the device does not implement it.
    #[error("operation not supported")]
    NotSupported,
    /// The request was not recognized at all.
    #[error("bad request")]
    BadRequest,
}

/// Reply to an [`IoOp`], correlated by token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoReply {
    /// Token echoed from the request.
    pub token: u64,
    /// Outcome of the request.
    pub result: Result<(), IoError>,
}

/// An in-flight I/O request: the operation plus its reply address.
pub struct IoRequest {
    /// Where to send the [`IoReply`].
    pub reply_to: Sender<IoReply>,
    /// Token to echo in the reply.
    pub token: u64,
    /// The requested operation.
    pub op: IoOp,
}

/// Reply address held for a queued write until its bytes are painted.
pub(crate) struct ReplySink {
    pub(crate) reply_to: Sender<IoReply>,
    pub(crate) token: u64,
}

impl ReplySink {
    /// Send the deferred success reply. The receiver may be gone; that is
    /// its problem, not the engine's.
    pub(crate) fn ok(&self) {
        let _ = self.reply_to.send(IoReply {
            token: self.token,
            result: Ok(()),
        });
    }
}
