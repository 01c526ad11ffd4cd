//! Record feed worker.
//!
//! A [`Feed`] owns two threads:
//!
//! - the **pump** blocks in `read(2)` on the input and forwards raw lines over a bounded
//!   channel. It can't be interrupted, so it is detached and exits on its own at EOF or
//!   once the channel closes.
//! - the **worker** (`tailchat-feed`) parses lines into records and hands them to a
//!   [`RecordSink`]. It wakes every [`STOP_POLL_INTERVAL`] to check the stop flag, which
//!   bounds how long [`Feed::disconnect`] waits for the join.
//!
//! Records reach the event loop through [`SessionSink`], which appends to the shared
//! [`Session`] and sends a [`FeedEvent`] when the visible content changed.

use super::lines::{LineRead, LineReader};
use crate::model::error::InputError;
use crate::model::Record;
use crate::parser::parse_record;
use crate::state::Session;
use chrono::Utc;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long a followed source sleeps at end-of-file before reading again.
pub const FOLLOW_INTERVAL: Duration = Duration::from_millis(100);

/// Upper bound on how long the worker goes without checking its stop flag.
pub const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Lines buffered between pump and worker before the pump blocks.
const PUMP_CHANNEL_CAPACITY: usize = 1024;

/// Why a feed stopped delivering records.
#[derive(Debug)]
pub enum FeedEnd {
    /// The source was read to the end.
    Eof,
    /// [`Feed::disconnect`] (or drop) stopped the worker.
    Disconnected,
    /// Reading the source failed.
    Failed(InputError),
}

/// Notification from the feed to the event loop.
#[derive(Debug)]
pub enum FeedEvent {
    /// One or more records arrived and the view should be redrawn.
    Arrived,
    /// No more records will arrive.
    Closed(FeedEnd),
}

/// Receiver of parsed records, called on the worker thread.
///
/// Any `FnMut(Record)` closure is a sink that ignores the end of the feed.
pub trait RecordSink: Send + 'static {
    /// A record was parsed.
    fn on_record(&mut self, record: Record);

    /// The feed stopped. Called exactly once, after the last `on_record`.
    fn on_closed(&mut self, end: FeedEnd) {
        let _ = end;
    }
}

impl<F> RecordSink for F
where
    F: FnMut(Record) + Send + 'static,
{
    fn on_record(&mut self, record: Record) {
        self(record)
    }
}

/// Sink that appends into a [`Session`] and notifies the event loop.
#[derive(Debug)]
pub struct SessionSink {
    session: Session,
    notify: Sender<FeedEvent>,
}

impl SessionSink {
    /// Create a sink and the receiver the event loop drains.
    pub fn new(session: Session) -> (Self, Receiver<FeedEvent>) {
        let (notify, events) = mpsc::channel();
        (Self { session, notify }, events)
    }
}

impl RecordSink for SessionSink {
    fn on_record(&mut self, record: Record) {
        if self.session.on_record(record) {
            // The loop may already be gone during shutdown.
            let _ = self.notify.send(FeedEvent::Arrived);
        }
    }

    fn on_closed(&mut self, end: FeedEnd) {
        let _ = self.notify.send(FeedEvent::Closed(end));
    }
}

/// Message from pump to worker.
enum Pumped {
    Line { number: usize, text: String },
    End(FeedEnd),
}

/// Handle to a running feed. Stops and joins the worker when disconnected or dropped.
#[derive(Debug)]
pub struct Feed {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Feed {
    /// Start reading `reader` on background threads, delivering records to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if a thread could not be spawned.
    pub fn spawn<R, S>(reader: LineReader<R>, sink: S) -> Result<Self, InputError>
    where
        R: BufRead + Send + 'static,
        S: RecordSink,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let (lines_tx, lines_rx) = mpsc::sync_channel(PUMP_CHANNEL_CAPACITY);

        let follow = reader.is_following();
        let pump_stop = Arc::clone(&stop);
        // Detached: dropping the handle lets the pump outlive the Feed while it is
        // stuck in a blocking read.
        thread::Builder::new()
            .name("tailchat-pump".into())
            .spawn(move || pump_lines(reader, lines_tx, pump_stop))?;

        let worker_stop = Arc::clone(&stop);
        let worker = thread::Builder::new()
            .name("tailchat-feed".into())
            .spawn(move || deliver_records(lines_rx, sink, worker_stop))?;

        info!(follow, "Feed started");
        Ok(Self {
            stop,
            worker: Some(worker),
        })
    }

    /// Stop delivering records and wait for the worker to exit.
    ///
    /// No `on_record` call happens after this returns.
    pub fn disconnect(mut self) {
        self.shutdown();
    }

    /// Whether the worker has exited (end of input, error, or disconnect).
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Feed worker panicked");
            }
            info!("Feed stopped");
        }
    }
}

impl Drop for Feed {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn pump_lines<R: BufRead>(
    mut reader: LineReader<R>,
    lines: SyncSender<Pumped>,
    stop: Arc<AtomicBool>,
) {
    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let message = match reader.next_line() {
            Ok(LineRead::Line { number, text }) => Pumped::Line { number, text },
            Ok(LineRead::Pending) => {
                thread::sleep(FOLLOW_INTERVAL);
                continue;
            }
            Ok(LineRead::Eof) => Pumped::End(FeedEnd::Eof),
            Err(e) => Pumped::End(FeedEnd::Failed(e.into())),
        };
        let last = matches!(message, Pumped::End(_));
        if lines.send(message).is_err() || last {
            return;
        }
    }
}

fn deliver_records<S: RecordSink>(lines: Receiver<Pumped>, mut sink: S, stop: Arc<AtomicBool>) {
    let end = loop {
        if stop.load(Ordering::Relaxed) {
            break FeedEnd::Disconnected;
        }
        match lines.recv_timeout(STOP_POLL_INTERVAL) {
            Ok(Pumped::Line { number, text }) => match parse_record(&text, number, Utc::now()) {
                Ok(Some(record)) => sink.on_record(record),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Skipping unparseable record"),
            },
            Ok(Pumped::End(end)) => break end,
            Err(RecvTimeoutError::Timeout) => {}
            // Pump exited without reporting an end; only possible if it panicked.
            Err(RecvTimeoutError::Disconnected) => break FeedEnd::Disconnected,
        }
    };

    match &end {
        FeedEnd::Eof => info!("Feed reached end of input"),
        FeedEnd::Disconnected => debug!("Feed disconnected"),
        FeedEnd::Failed(e) => warn!(error = %e, "Feed read failed"),
    }
    sink.on_closed(end);
}
