//! Caller-facing method-call surface.
//!
//! The host side of the app (the UI shell's method-dispatch channel) hands
//! this bridge a method name plus a JSON map of named arguments, and gets
//! back either a JSON result or a tagged error. The bridge owns the
//! [`RequestEngine`] and translates each recognized method into one
//! engine call with the right handler and request name.
//!
//! Recognized methods:
//!
//! | method           | arguments                  | result                          |
//! |------------------|----------------------------|---------------------------------|
//! | `setEndpoint`    | `host?`, `port?`           | null                            |
//! | `getScalar`      | `path`                     | decoded double                  |
//! | `discover`       | `visitedIds`               | `{responseId?, paths, isForwarder}` |
//! | `getLinkQuality` | `deviceId`                 | map of id to quality            |
//!
//! Anything else reports "not implemented" rather than an error code.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::RequestEngine;
use crate::error::NdnClientError;
use crate::face::Endpoint;
use crate::handler::{DiscoveryHandler, LinkQualityHandler, ScalarHandler};
use crate::name::Name;
use crate::packet::DEFAULT_INTEREST_LIFETIME;

/// Default forwarder TCP port, used when `setEndpoint` gives a host only.
pub const DEFAULT_FORWARDER_PORT: u16 = 6363;

/// Name prefix for discovery requests.
const DISCOVERY_PREFIX: &str = "/esp/discovery";

/// Name prefix for per-device requests.
const DEVICE_PREFIX: &str = "/esp/device";

/// A method invocation from the host: a name and named arguments.
#[derive(Debug, Clone)]
pub struct MethodCall {
    method: String,
    args: Map<String, Value>,
}

impl MethodCall {
    /// Create a call with no arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: Map::new(),
        }
    }

    /// Add a named argument.
    pub fn with_arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    /// The method name.
    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    fn str_arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }

    fn port_arg(&self, key: &str) -> Option<Option<u16>> {
        match self.args.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(value) => value.as_u64().and_then(|p| u16::try_from(p).ok()).map(Some),
        }
    }

    fn int_list_arg(&self, key: &str) -> Option<Vec<i64>> {
        self.args
            .get(key)?
            .as_array()?
            .iter()
            .map(Value::as_i64)
            .collect()
    }
}

/// The result of one method call.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutcome {
    /// The call succeeded with this JSON result.
    Success(Value),
    /// The call failed with a tagged error code and message.
    Error {
        /// One of `NDN_TIMEOUT`, `NDN_CONNECTION_ERROR`, `NDN_UNKNOWN`.
        code: &'static str,
        /// Short human-readable description.
        message: String,
    },
    /// The method name is not recognized.
    NotImplemented,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveryReply {
    response_id: Option<i64>,
    paths: Vec<String>,
    is_forwarder: bool,
}

/// Dispatches host method calls onto the request engine.
pub struct MethodBridge {
    engine: RequestEngine,
}

impl MethodBridge {
    /// Create a bridge around an engine.
    pub fn new(engine: RequestEngine) -> Self {
        Self { engine }
    }

    /// Handle one method call, always resolving to exactly one outcome.
    pub async fn handle(&mut self, call: &MethodCall) -> MethodOutcome {
        match call.method() {
            "setEndpoint" => self.set_endpoint(call),
            "getScalar" => self.get_scalar(call).await,
            "discover" => self.discover(call).await,
            "getLinkQuality" => self.get_link_quality(call).await,
            _ => MethodOutcome::NotImplemented,
        }
    }

    fn set_endpoint(&mut self, call: &MethodCall) -> MethodOutcome {
        let Some(port) = call.port_arg("port") else {
            return bad_argument("port");
        };

        let endpoint = match call.str_arg("host") {
            Some(host) => Some(Endpoint::new(
                host,
                port.unwrap_or(DEFAULT_FORWARDER_PORT),
            )),
            None => None,
        };

        self.engine.session_mut().reset(endpoint);
        MethodOutcome::Success(Value::Null)
    }

    async fn get_scalar(&mut self, call: &MethodCall) -> MethodOutcome {
        let Some(path) = call.str_arg("path") else {
            return bad_argument("path");
        };
        let name = Name::parse(path).append_timestamp().append_str("data");

        match self
            .engine
            .execute(name, ScalarHandler::new(), DEFAULT_INTEREST_LIFETIME, true)
            .await
        {
            Ok(handler) => match handler.value() {
                Some(value) => MethodOutcome::Success(Value::from(value)),
                None => MethodOutcome::Error {
                    code: "NDN_UNKNOWN",
                    message: "response carried no value".to_string(),
                },
            },
            Err(err) => failure(err),
        }
    }

    async fn discover(&mut self, call: &MethodCall) -> MethodOutcome {
        let Some(visited) = call.int_list_arg("visitedIds") else {
            return bad_argument("visitedIds");
        };

        let mut name = Name::parse(DISCOVERY_PREFIX);
        for id in visited {
            name = name.append_number(id);
        }
        let name = name.append_timestamp();

        match self
            .engine
            .execute(
                name,
                DiscoveryHandler::new(),
                DEFAULT_INTEREST_LIFETIME,
                true,
            )
            .await
        {
            Ok(handler) => {
                let reply = DiscoveryReply {
                    response_id: handler.response_id(),
                    paths: handler.paths().to_vec(),
                    is_forwarder: handler.is_forwarder(),
                };
                match serde_json::to_value(&reply) {
                    Ok(value) => MethodOutcome::Success(value),
                    Err(err) => MethodOutcome::Error {
                        code: "NDN_UNKNOWN",
                        message: err.to_string(),
                    },
                }
            }
            Err(err) => failure(err),
        }
    }

    async fn get_link_quality(&mut self, call: &MethodCall) -> MethodOutcome {
        let Some(device_id) = call.str_arg("deviceId") else {
            return bad_argument("deviceId");
        };
        let name = Name::parse(DEVICE_PREFIX)
            .append_str(device_id)
            .append_str("linkquality")
            .append_timestamp();

        match self
            .engine
            .execute(
                name,
                LinkQualityHandler::new(),
                DEFAULT_INTEREST_LIFETIME,
                true,
            )
            .await
        {
            Ok(handler) => {
                let mut table = Map::new();
                for (key, value) in handler.qualities() {
                    table.insert(key.to_string(), Value::from(*value));
                }
                MethodOutcome::Success(Value::Object(table))
            }
            Err(err) => failure(err),
        }
    }
}

fn failure(err: NdnClientError) -> MethodOutcome {
    MethodOutcome::Error {
        code: err.code(),
        message: err.to_string(),
    }
}

fn bad_argument(name: &str) -> MethodOutcome {
    MethodOutcome::Error {
        code: "NDN_UNKNOWN",
        message: format!("missing or ill-typed argument: {name}"),
    }
}
