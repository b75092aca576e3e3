//! The screen actor and its public handle.
//!
//! One thread owns all mutable render state and the terminal. The
//! [`LiveScreen`] handle is a thin sender over the actor's mailbox; cloning
//! it is cheap and every clone talks to the same screen.
//!
//! The redraw timer is the mailbox itself: while work exists the actor waits
//! with a deadline (`recv_deadline`) and a timeout *is* the tick; with no
//! work it blocks indefinitely. That makes "a tick is armed iff there is
//! work" a property of the wait mode rather than a separate timer thread.

use super::messages::Request;
use crate::block::{RenderFn, ScreenState};
use crate::error::StartError;
use crate::protocol::{ByteProducer, IoError, IoOp, IoReply, IoRequest, ReplySink};
use crate::render::renderer;
use crate::style::StyledText;
use crate::terminal::{StdoutTerminal, Terminal, WidthMode};
use crate::writer::LiveWriter;
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Configuration for a live screen.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Optional identifier, used for the actor thread name.
    pub name: Option<String>,
    /// Time between redraws while work exists.
    pub refresh_every: Duration,
    /// Width source: probe the terminal each tick, or a fixed column count.
    pub terminal_width: WidthMode,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            name: None,
            refresh_every: Duration::from_millis(100),
            terminal_width: WidthMode::Auto,
        }
    }
}

/// Handle to a running live screen.
///
/// All methods are safe to call from any thread. Block commands
/// (`add_block`, `update`) and writes are fire-and-forget; `flush`, `stop`
/// and `render_now` wait for the actor. Dropping the last handle shuts the
/// screen down after one final paint.
#[derive(Clone)]
pub struct LiveScreen {
    tx: Sender<Request>,
    next_token: Arc<AtomicU64>,
    thread: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl LiveScreen {
    /// Start a live screen on stdout.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::NoTerminal`] when stdout is not a terminal
    /// (callers should fall back to plain writes), or a spawn error if the
    /// actor thread cannot be created.
    pub fn start(config: ScreenConfig) -> Result<Self, StartError> {
        Self::start_with(config, StdoutTerminal::new())
    }

    /// Start a live screen on a custom [`Terminal`] device.
    ///
    /// # Errors
    ///
    /// Same conditions as [`start`](Self::start), judged against the given
    /// device.
    pub fn start_with(
        config: ScreenConfig,
        terminal: impl Terminal + 'static,
    ) -> Result<Self, StartError> {
        let last_width = terminal.columns().ok_or(StartError::NoTerminal)?;

        let (tx, rx) = unbounded::<Request>();
        let thread_name = match &config.name {
            Some(name) => format!("footlight-{name}"),
            None => "footlight-screen".to_string(),
        };

        let actor = ScreenActor {
            refresh_every: config.refresh_every,
            width_mode: config.terminal_width,
            terminal: Box::new(terminal),
            state: ScreenState::new(),
            deadline: None,
            last_width,
        };

        let handle = std::thread::Builder::new()
            .name(thread_name)
            .spawn(move || actor.run(&rx))
            .map_err(StartError::Spawn)?;

        tracing::debug!(name = config.name.as_deref(), "live screen started");

        Ok(Self {
            tx,
            next_token: Arc::new(AtomicU64::new(0)),
            thread: Arc::new(Mutex::new(Some(handle))),
        })
    }

    /// Register a block whose state is its own styled content.
    ///
    /// The block paints at the bottom of the region on the next tick.
    /// Update it with `StyledText`, `String`, or `&'static str` states. Ids
    /// must be unique per screen; reusing one is a caller bug with
    /// unspecified display results.
    pub fn add_block(&self, id: impl Into<String>, initial: impl Into<StyledText>) {
        let id = id.into();
        let render = default_render(id.clone());
        let _ = self.tx.send(Request::AddBlock {
            id,
            state: Box::new(initial.into()),
            render,
        });
    }

    /// Register a block with a typed state and a render function.
    ///
    /// `render` must be pure. A later [`update`](Self::update) with a state
    /// of a different type panics the engine when the block next renders:
    /// that is a programmer error and fails loudly.
    pub fn add_block_with<S: Send + 'static>(
        &self,
        id: impl Into<String>,
        initial: S,
        render: impl Fn(&S) -> StyledText + Send + 'static,
    ) {
        let id = id.into();
        let for_panic = id.clone();
        let render: RenderFn = Box::new(move |state| {
            state.downcast_ref::<S>().map_or_else(
                || panic!("block {for_panic:?}: update state type does not match registration"),
                &render,
            )
        });
        let _ = self.tx.send(Request::AddBlock {
            id,
            state: Box::new(initial),
            render,
        });
    }

    /// Record a new state for a block.
    ///
    /// Fire-and-forget: unknown ids are silently ignored, and rapid updates
    /// to the same block coalesce so only the latest state is ever painted.
    /// An update never arms the redraw timer by itself; on a screen with no
    /// blocks and no queued writes it is dropped without effect.
    pub fn update<S: Send + 'static>(&self, id: impl Into<String>, state: S) {
        let _ = self.tx.send(Request::Update {
            id: id.into(),
            state: Box::new(state),
        });
    }

    /// Paint pending work now, then detach all blocks and reset the screen.
    ///
    /// Returns after the final paint. The screen stays usable; the next
    /// `add_block` starts a fresh region below everything written so far.
    pub fn flush(&self) {
        let (reply, ack) = bounded(1);
        if self.tx.send(Request::Flush { reply }).is_ok() {
            let _ = ack.recv();
        }
    }

    /// Paint pending work now, then shut the screen down.
    ///
    /// Returns after the final paint. Calls on any handle after this are
    /// no-ops.
    pub fn stop(&self) {
        let (reply, ack) = bounded(1);
        if self.tx.send(Request::Stop { reply }).is_ok() {
            let _ = ack.recv();
        }
        if let Ok(mut guard) = self.thread.lock() {
            if let Some(handle) = guard.take() {
                let _ = handle.join();
            }
        }
    }

    /// Run an immediate tick without waiting for the timer.
    ///
    /// Mainly a synchronization point for tests and debugging.
    pub fn render_now(&self) {
        let (reply, ack) = bounded(1);
        if self.tx.send(Request::RenderNow { reply }).is_ok() {
            let _ = ack.recv();
        }
    }

    /// Submit a request over the I/O-device protocol.
    ///
    /// The reply arrives on the returned channel: immediately for anything
    /// but a write, and after the bytes are painted for writes. If the
    /// screen is stopped the channel disconnects without a reply.
    pub fn io_request(&self, op: IoOp) -> Receiver<IoReply> {
        let (reply_to, rx) = bounded(1);
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let _ = self.tx.send(Request::Io(IoRequest {
            reply_to,
            token,
            op,
        }));
        rx
    }

    /// Write bytes above the sticky block region.
    ///
    /// The reply is deferred until the tick that paints the bytes.
    pub fn put_chars(&self, bytes: impl Into<Vec<u8>>) -> Receiver<IoReply> {
        self.io_request(IoOp::PutChars(bytes.into()))
    }

    /// Write the bytes produced by `producer` above the block region.
    ///
    /// The producer runs synchronously on the actor thread when the request
    /// is handled.
    pub fn put_chars_with(
        &self,
        producer: impl FnOnce() -> Vec<u8> + Send + 'static,
    ) -> Receiver<IoReply> {
        self.io_request(IoOp::PutCharsWith(Box::new(producer) as ByteProducer))
    }

    /// An [`std::io::Write`] adapter over [`put_chars`](Self::put_chars),
    /// for plugging loggers into the screen.
    pub fn writer(&self) -> LiveWriter {
        LiveWriter::new(self.clone())
    }
}

/// Default render for text-state blocks: the state is the content.
fn default_render(id: String) -> RenderFn {
    Box::new(move |state| {
        if let Some(text) = state.downcast_ref::<StyledText>() {
            text.clone()
        } else if let Some(text) = state.downcast_ref::<String>() {
            StyledText::plain(text.clone())
        } else if let Some(text) = state.downcast_ref::<&'static str>() {
            StyledText::plain(*text)
        } else {
            panic!("block {id:?}: state is not text; register with add_block_with")
        }
    })
}

/// The actor: sole owner of render state and the terminal.
struct ScreenActor {
    refresh_every: Duration,
    width_mode: WidthMode,
    terminal: Box<dyn Terminal>,
    state: ScreenState,
    /// When the armed tick fires; `None` means no tick is armed.
    deadline: Option<Instant>,
    /// Last successfully probed width, the fallback when a probe fails
    /// mid-run.
    last_width: u16,
}

impl ScreenActor {
    fn run(mut self, rx: &Receiver<Request>) {
        loop {
            let message = match self.deadline {
                Some(deadline) => match rx.recv_deadline(deadline) {
                    Ok(message) => Some(message),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                },
                None => match rx.recv() {
                    Ok(message) => Some(message),
                    Err(_) => break,
                },
            };

            match message {
                None => {
                    // The armed tick fired.
                    self.deadline = None;
                    if self.tick().is_err() {
                        return;
                    }
                    if !self.state.store.is_empty() {
                        self.arm();
                    }
                }
                Some(Request::AddBlock { id, state, render }) => {
                    // Arming here only when the screen is block-free keeps a
                    // single armed tick across a burst of registrations.
                    let arm = self.deadline.is_none() && self.state.store.is_empty();
                    self.state.store.register(id, state, render);
                    if arm {
                        self.arm();
                    }
                }
                Some(Request::Update { id, state }) => {
                    self.state.store.set_state(&id, state);
                }
                Some(Request::Flush { reply }) => {
                    let result = self.tick();
                    self.state.reset();
                    self.deadline = None;
                    let _ = reply.send(());
                    if result.is_err() {
                        return;
                    }
                }
                Some(Request::Stop { reply }) => {
                    let _ = self.tick();
                    let _ = reply.send(());
                    tracing::debug!("live screen stopped");
                    return;
                }
                Some(Request::RenderNow { reply }) => {
                    let result = self.tick();
                    if result.is_ok() && self.deadline.is_none() && !self.state.store.is_empty() {
                        self.arm();
                    }
                    let _ = reply.send(());
                    if result.is_err() {
                        return;
                    }
                }
                Some(Request::Io(request)) => self.handle_io(request),
            }
        }

        // Every handle is gone: one final paint so nothing pending is lost.
        let _ = self.tick();
        tracing::debug!("live screen stopped");
    }

    /// Arm the redraw timer one refresh interval out.
    fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.refresh_every);
    }

    /// Resolve the column count for this tick.
    fn current_width(&mut self) -> u16 {
        match self.width_mode {
            WidthMode::Fixed(width) => width,
            WidthMode::Auto => {
                if let Some(width) = self.terminal.columns() {
                    self.last_width = width;
                }
                self.last_width
            }
        }
    }

    /// Run one tick: reconcile, write the composite payload in a single
    /// call, then deliver deferred write acknowledgements.
    ///
    /// A write failure is fatal; the caller must exit without another tick.
    fn tick(&mut self) -> io::Result<()> {
        let width = self.current_width();
        let output = renderer::render_tick(&mut self.state, width as usize);
        if !output.bytes.is_empty() {
            if let Err(err) = self.terminal.write_all(&output.bytes) {
                tracing::error!(%err, "terminal write failed, shutting down");
                return Err(err);
            }
        }
        for reply in output.replies {
            reply.ok();
        }
        Ok(())
    }

    /// Answer an I/O-device request.
    ///
    /// Writes are queued for the next tick (arming one if needed); replies
    /// for them wait until the bytes are painted. Everything else answers
    /// immediately and touches no state.
    fn handle_io(&mut self, request: IoRequest) {
        let IoRequest { reply_to, token, op } = request;
        match op {
            IoOp::PutChars(bytes) => self.enqueue_write(bytes, reply_to, token),
            IoOp::PutCharsWith(producer) => {
                let bytes = producer();
                self.enqueue_write(bytes, reply_to, token);
            }
            IoOp::GetChars
            | IoOp::GetLine
            | IoOp::GetUntil
            | IoOp::GetPassword
            | IoOp::SetOpts
            | IoOp::GetOpts
            | IoOp::GetGeometry
            | IoOp::Requests => {
                let _ = reply_to.send(IoReply {
                    token,
                    result: Err(IoError::NotSupported),
                });
            }
            IoOp::Other(_) => {
                let _ = reply_to.send(IoReply {
                    token,
                    result: Err(IoError::BadRequest),
                });
            }
        }
    }

    fn enqueue_write(&mut self, bytes: Vec<u8>, reply_to: Sender<IoReply>, token: u64) {
        self.state.queue.push(bytes, ReplySink { reply_to, token });
        if self.deadline.is_none() {
            self.arm();
        }
    }
}
