use std::fmt;
use std::sync::Arc;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use parking_lot::Mutex;

use hermoxide_types::Message;

use crate::error::{BridgeError, Result};

/// Thread-safe sink carrying protocol messages towards the client transport.
///
/// Handles are cheap to clone and share one underlying sink. Submissions are
/// serialized by a mutex, so messages sent in order by one agent reach the
/// transport in that order even while other threads are sending. The lock is
/// held only to hand a message over, never across transport I/O.
#[derive(Clone)]
pub struct OutboundChannel {
    sink: Arc<Mutex<Sink>>,
}

enum Sink {
    /// Forward each message to an embedder-supplied delivery callback.
    Callback(Box<dyn FnMut(Message) + Send>),
    /// Queue messages for a transport task draining the receiving end.
    Queue(UnboundedSender<Message>),
}

impl OutboundChannel {
    /// Channel delivering every message through `callback`.
    pub fn new<F>(callback: F) -> Self
    where
        F: FnMut(Message) + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Sink::Callback(Box::new(callback)))),
        }
    }

    /// Queue-backed channel; the transport drains the returned receiver.
    pub fn unbounded() -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded();
        (
            Self {
                sink: Arc::new(Mutex::new(Sink::Queue(tx))),
            },
            rx,
        )
    }

    /// Deliver `msg` to the transport, preserving submission order.
    pub fn send(&self, msg: impl Into<Message>) -> Result<()> {
        let msg = msg.into();
        tracing::debug!("submit outbound {msg:?}");
        let mut sink = self.sink.lock();
        match &mut *sink {
            Sink::Callback(deliver) => {
                deliver(msg);
                Ok(())
            }
            Sink::Queue(tx) => tx
                .unbounded_send(msg)
                .map_err(|_| BridgeError::ChannelClosed),
        }
    }
}

impl fmt::Debug for OutboundChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundChannel").finish_non_exhaustive()
    }
}
