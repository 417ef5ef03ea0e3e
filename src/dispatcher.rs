use fnv::FnvHashMap;

use hermoxide_types::{ErrorCode, Request, Response};

use crate::agent::DomainAgent;
use crate::channel::OutboundChannel;

/// Routes parsed client requests to the domain agent owning their method
/// namespace.
pub struct Dispatcher {
    /// Registered agents keyed by their domain prefix.
    agents: FnvHashMap<&'static str, Box<dyn DomainAgent>>,
    channel: OutboundChannel,
}

impl Dispatcher {
    pub fn new(channel: OutboundChannel) -> Self {
        Self {
            agents: Default::default(),
            channel,
        }
    }

    /// Register `agent` as the owner of its domain prefix.
    ///
    /// A later registration for the same domain replaces the earlier one.
    pub fn register(&mut self, agent: impl DomainAgent + 'static) {
        self.agents.insert(agent.domain(), Box::new(agent));
    }

    /// Route one request.
    ///
    /// Exactly one response is produced: by the owning agent, or by the
    /// dispatcher itself when no agent owns the method.
    pub fn dispatch(&self, req: &Request) {
        let agent = req
            .split_method()
            .and_then(|(domain, _)| self.agents.get(domain));
        match agent {
            Some(agent) => {
                tracing::debug!("dispatch {} to {} agent", req.method, agent.domain());
                agent.handle_request(req);
            }
            None => {
                tracing::debug!("no agent owns {}", req.method);
                let resp = Response::error(
                    req.id,
                    ErrorCode::MethodNotFound,
                    format!("'{}' wasn't found", req.method),
                );
                if let Err(err) = self.channel.send(resp) {
                    tracing::warn!("failed to deliver response: {err}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::channel::mpsc::UnboundedReceiver;

    use crate::agent::RuntimeDomainAgent;
    use hermoxide_types::{CallId, Message};

    fn dispatcher() -> (Dispatcher, UnboundedReceiver<Message>) {
        let (channel, rx) = OutboundChannel::unbounded();
        let mut dispatcher = Dispatcher::new(channel.clone());
        dispatcher.register(RuntimeDomainAgent::new(channel));
        (dispatcher, rx)
    }

    fn next_response(rx: &mut UnboundedReceiver<Message>) -> Response {
        match rx.try_next() {
            Ok(Some(Message::Response(resp))) => resp,
            other => panic!("expected response, got {other:?}"),
        }
    }

    #[test]
    fn routes_to_the_owning_agent() {
        let (dispatcher, mut rx) = dispatcher();
        dispatcher.dispatch(&Request::new(CallId::new(1), "Runtime.enable"));
        assert!(!next_response(&mut rx).is_error());
    }

    #[test]
    fn unknown_domain_is_method_not_found() {
        let (dispatcher, mut rx) = dispatcher();
        dispatcher.dispatch(&Request::new(CallId::new(2), "Debugger.enable"));
        let resp = next_response(&mut rx);
        assert_eq!(resp.id, CallId::new(2));
        assert_eq!(
            resp.error.map(|err| err.code),
            Some(ErrorCode::MethodNotFound)
        );
    }

    #[test]
    fn method_without_domain_prefix_is_method_not_found() {
        let (dispatcher, mut rx) = dispatcher();
        dispatcher.dispatch(&Request::new(CallId::new(3), "enable"));
        assert_eq!(
            next_response(&mut rx).error.map(|err| err.code),
            Some(ErrorCode::MethodNotFound)
        );
    }
}
