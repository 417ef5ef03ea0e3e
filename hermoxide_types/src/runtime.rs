use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Method;

/// Id of an execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ExecutionContextId(u32);

impl ExecutionContextId {
    pub const IDENTIFIER: &'static str = "Runtime.ExecutionContextId";

    pub const fn new(id: u32) -> Self {
        ExecutionContextId(id)
    }

    pub const fn inner(self) -> u32 {
        self.0
    }
}

/// Description of an isolated evaluation scope inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContextDescription {
    /// Unique id of the execution context.
    pub id: ExecutionContextId,
    /// Human readable name describing the context.
    pub name: String,
}

impl ExecutionContextDescription {
    pub const IDENTIFIER: &'static str = "Runtime.ExecutionContextDescription";

    pub fn new(id: ExecutionContextId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Issued when a new execution context is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventExecutionContextCreated {
    /// The newly created execution context.
    pub context: ExecutionContextDescription,
}

impl EventExecutionContextCreated {
    pub const IDENTIFIER: &'static str = "Runtime.executionContextCreated";
}

impl Method for EventExecutionContextCreated {
    fn identifier(&self) -> Cow<'static, str> {
        Self::IDENTIFIER.into()
    }
}
