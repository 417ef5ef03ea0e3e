use futures::channel::mpsc::UnboundedReceiver;

use hermoxide_types::{Message, Request};

use crate::agent::RuntimeDomainAgent;
use crate::channel::OutboundChannel;
use crate::dispatcher::Dispatcher;
use crate::error::Result;

/// One inspector client session.
///
/// Created when a client attaches and bound to one [`OutboundChannel`] for
/// its whole lifetime. Domain state starts out disabled and dies with the
/// session; nothing carries over to the next client.
pub struct InspectorSession {
    dispatcher: Dispatcher,
}

impl InspectorSession {
    /// Session delivering outbound messages through `channel`.
    pub fn new(channel: OutboundChannel) -> Self {
        let mut dispatcher = Dispatcher::new(channel.clone());
        dispatcher.register(RuntimeDomainAgent::new(channel));
        Self { dispatcher }
    }

    /// Session with a queue-backed channel; the transport drains the
    /// returned receiver.
    pub fn with_queue() -> (Self, UnboundedReceiver<Message>) {
        let (channel, rx) = OutboundChannel::unbounded();
        (Self::new(channel), rx)
    }

    /// Handle one parsed client request.
    pub fn handle(&self, req: &Request) {
        self.dispatcher.dispatch(req);
    }

    /// Decode a raw JSON command and handle it.
    ///
    /// Decoding failures are returned to the calling transport, which owns
    /// the parse-error reporting policy; nothing reaches the agents.
    pub fn handle_json(&self, raw: &str) -> Result<()> {
        let req: Request = serde_json::from_str(raw)?;
        self.handle(&req);
        Ok(())
    }
}
