//! Debugging bridge exposing a devtools-style protocol for an embedded
//! script engine.
//!
//! Parsed client [`Request`]s are routed by the [`Dispatcher`] to per-domain
//! agents, which answer through a synchronized [`OutboundChannel`]; the
//! transport on the other end serializes the resulting [`Message`]s and
//! ships them to the client.

pub use hermoxide_types::{
    CallId, Error, ErrorCode, Message, Method, Notification, Request, Response,
};

pub mod agent;
pub mod bindings;
pub mod channel;
pub mod dispatcher;
pub mod error;
pub mod session;

pub use crate::agent::{AgentContext, DomainAgent, RuntimeDomainAgent};
pub use crate::channel::OutboundChannel;
pub use crate::dispatcher::Dispatcher;
pub use crate::error::{BridgeError, Result};
pub use crate::session::InspectorSession;
