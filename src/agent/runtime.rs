use parking_lot::Mutex;

use hermoxide_types::runtime::{
    EventExecutionContextCreated, ExecutionContextDescription, ExecutionContextId,
};
use hermoxide_types::{ErrorCode, Request, Response};

use crate::agent::{AgentContext, DomainAgent};
use crate::channel::OutboundChannel;

/// The single execution context the embedded engine exposes.
pub const EXECUTION_CONTEXT_ID: ExecutionContextId = ExecutionContextId::new(1);

/// Engine-identifying label announced as the context name.
pub const EXECUTION_CONTEXT_NAME: &str = "hermes";

/// Agent for the `Runtime` domain: domain enablement and execution context
/// lifecycle.
#[derive(Debug)]
pub struct RuntimeDomainAgent {
    ctx: AgentContext,
    /// Guards the whole check-mutate-respond sequence of each handler, so
    /// concurrent commands observe enablement transitions atomically.
    enabled: Mutex<bool>,
}

impl RuntimeDomainAgent {
    pub fn new(channel: OutboundChannel) -> Self {
        Self {
            ctx: AgentContext::new(channel),
            enabled: Mutex::new(false),
        }
    }

    fn enable(&self, req: &Request) {
        let mut enabled = self.enabled.lock();
        if *enabled {
            // Can't enable twice without disabling
            self.ctx.send_response_to_client(Response::error(
                req.id,
                ErrorCode::InvalidRequest,
                "Runtime domain already enabled",
            ));
            return;
        }

        *enabled = true;
        self.ctx.send_response_to_client(Response::empty(req.id));

        // Announce the engine's single hard-coded execution context. The
        // success response above reaches the client first.
        self.ctx.send_event(&EventExecutionContextCreated {
            context: ExecutionContextDescription::new(EXECUTION_CONTEXT_ID, EXECUTION_CONTEXT_NAME),
        });
    }

    fn disable(&self, req: &Request) {
        let mut enabled = self.enabled.lock();
        if !self.ctx.check_enabled(*enabled, self.domain(), req.id) {
            return;
        }
        *enabled = false;
        self.ctx.send_response_to_client(Response::empty(req.id));
    }
}

impl DomainAgent for RuntimeDomainAgent {
    fn domain(&self) -> &'static str {
        "Runtime"
    }

    fn handle_request(&self, req: &Request) {
        match req.split_method().map(|(_, method)| method) {
            Some("enable") => self.enable(req),
            Some("disable") => self.disable(req),
            _ => self.ctx.method_not_found(req),
        }
    }
}
