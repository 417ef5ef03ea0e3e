use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod runtime;

/// Identifier correlating a [`Request`] with its [`Response`].
///
/// Ids are chosen by the client and must be unique among the requests of a
/// session that are in flight at the same time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(usize);

impl CallId {
    pub const fn new(id: usize) -> Self {
        CallId(id)
    }

    pub const fn inner(self) -> usize {
        self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallId({})", self.0)
    }
}

/// A command sent by the inspector client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    /// Identifier echoed back in the matching [`Response`].
    pub id: CallId,
    pub method: Cow<'static, str>,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl Request {
    pub fn new(id: CallId, method: impl Into<Cow<'static, str>>) -> Self {
        Self {
            id,
            method: method.into(),
            params: serde_json::Value::Null,
        }
    }

    pub fn with_params(
        id: CallId,
        method: impl Into<Cow<'static, str>>,
        params: serde_json::Value,
    ) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    /// Tuple of (domain, method) split on the first `.`, or `None` if the
    /// identifier carries no domain prefix.
    pub fn split_method(&self) -> Option<(&str, &str)> {
        self.method.split_once('.')
    }
}

/// The method-identifier capability shared by commands and events.
pub trait Method {
    /// The whole string identifier for this method like: `Runtime.enable`
    fn identifier(&self) -> Cow<'static, str>;

    /// The name of the domain this method belongs to: `Runtime`
    fn domain_name(&self) -> Cow<'static, str> {
        self.split().0
    }

    /// The standalone identifier of the method inside the domain: `enable`
    fn method_name(&self) -> Cow<'static, str> {
        self.split().1
    }

    /// Tuple of (`domain_name`, `method_name`) : (`Runtime`, `enable`)
    ///
    /// An identifier without a `.` separator yields the whole identifier as
    /// the domain and an empty method name.
    fn split(&self) -> (Cow<'static, str>, Cow<'static, str>) {
        match self.identifier() {
            Cow::Borrowed(id) => match id.split_once('.') {
                Some((domain, method)) => (domain.into(), method.into()),
                None => (id.into(), "".into()),
            },
            Cow::Owned(id) => match id.split_once('.') {
                Some((domain, method)) => (
                    Cow::Owned(domain.to_string()),
                    Cow::Owned(method.to_string()),
                ),
                None => (Cow::Owned(id), "".into()),
            },
        }
    }
}

/// The answer to a [`Request`], correlated by id.
///
/// Exactly one of `result` and `error` is set; the unset field is omitted on
/// the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response {
    /// Identifier of the [`Request`] this response answers.
    pub id: CallId,
    /// The response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// The reason why the [`Request`] failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

impl Response {
    /// Successful response carrying a result payload.
    pub fn ok(id: CallId, result: serde_json::Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Successful response with an empty `{}` result.
    pub fn empty(id: CallId) -> Self {
        Self::ok(id, serde_json::Value::Object(Default::default()))
    }

    /// Error response.
    pub fn error(id: CallId, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(Error {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Protocol error categories with their well-known wire codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    /// Implementation-defined code outside the fixed categories.
    ServerError(i64),
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> i64 {
        match code {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::ServerError(code) => code,
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> ErrorCode {
        match code {
            -32700 => ErrorCode::ParseError,
            -32600 => ErrorCode::InvalidRequest,
            -32601 => ErrorCode::MethodNotFound,
            -32602 => ErrorCode::InvalidParams,
            -32603 => ErrorCode::InternalError,
            code => ErrorCode::ServerError(code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    /// Error code
    pub code: ErrorCode,
    /// Error Message
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", i64::from(self.code), self.message)
    }
}

impl std::error::Error for Error {}

/// An unsolicited message from the bridge, not correlated to any request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    /// Name of the method
    pub method: Cow<'static, str>,
    /// Json params
    #[serde(default)]
    pub params: serde_json::Value,
}

impl Notification {
    pub fn new(method: impl Into<Cow<'static, str>>, params: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Build a notification from a typed event payload.
    pub fn from_event<T>(event: &T) -> serde_json::Result<Self>
    where
        T: Method + Serialize,
    {
        Ok(Self {
            method: event.identifier(),
            params: serde_json::to_value(event)?,
        })
    }
}

impl Method for Notification {
    fn identifier(&self) -> Cow<'static, str> {
        self.method.clone()
    }
}

/// A message traveling towards the client transport.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum Message {
    Response(Response),
    Notification(Notification),
}

impl From<Response> for Message {
    fn from(resp: Response) -> Self {
        Message::Response(resp)
    }
}

impl From<Notification> for Message {
    fn from(note: Notification) -> Self {
        Message::Notification(note)
    }
}
