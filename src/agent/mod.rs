//! Domain agents and the capability they share for talking back to the
//! client.

use serde::Serialize;

use hermoxide_types::{CallId, ErrorCode, Method, Notification, Request, Response};

use crate::channel::OutboundChannel;

pub mod runtime;

pub use runtime::RuntimeDomainAgent;

/// One protocol domain: owns a slice of the method namespace and the state
/// behind it.
///
/// `handle_request` must produce exactly one [`Response`] for every request
/// handed to it, including requests naming a method the domain does not
/// know.
pub trait DomainAgent: Send + Sync {
    /// The domain prefix this agent owns, e.g. `Runtime`.
    fn domain(&self) -> &'static str;

    /// Handle one parsed request addressed to this domain.
    fn handle_request(&self, req: &Request);
}

/// Outbound capability shared by every concrete domain agent.
///
/// Holds the session's [`OutboundChannel`]; agents compose this rather than
/// inheriting behavior from each other.
#[derive(Clone, Debug)]
pub struct AgentContext {
    channel: OutboundChannel,
}

impl AgentContext {
    pub fn new(channel: OutboundChannel) -> Self {
        Self { channel }
    }

    /// Forward a response to the client unchanged.
    ///
    /// Delivery failure means the session transport is gone; it is logged
    /// and swallowed so handlers stay infallible.
    pub fn send_response_to_client(&self, resp: Response) {
        if let Err(err) = self.channel.send(resp) {
            tracing::warn!("failed to deliver response: {err}");
        }
    }

    /// Forward a notification to the client unchanged.
    pub fn send_notification_to_client(&self, note: Notification) {
        if let Err(err) = self.channel.send(note) {
            tracing::warn!("failed to deliver notification: {err}");
        }
    }

    /// Serialize a typed event payload and send it as a notification.
    pub fn send_event<T>(&self, event: &T)
    where
        T: Method + Serialize,
    {
        match Notification::from_event(event) {
            Ok(note) => self.send_notification_to_client(note),
            Err(err) => {
                tracing::error!("failed to serialize {} event: {err}", event.identifier())
            }
        }
    }

    /// Shared enablement gate.
    ///
    /// Returns `true` if the domain is enabled. Otherwise an
    /// `InvalidRequest` error response for `id` has already been sent on the
    /// caller's behalf, and the caller must not act on the request.
    pub fn check_enabled(&self, enabled: bool, domain: &str, id: CallId) -> bool {
        if !enabled {
            self.send_response_to_client(Response::error(
                id,
                ErrorCode::InvalidRequest,
                format!("{domain} domain not enabled"),
            ));
        }
        enabled
    }

    /// Reply with `MethodNotFound` for a method this domain does not know.
    pub(crate) fn method_not_found(&self, req: &Request) {
        self.send_response_to_client(Response::error(
            req.id,
            ErrorCode::MethodNotFound,
            format!("'{}' wasn't found", req.method),
        ));
    }
}
