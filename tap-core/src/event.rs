//! Wire-level model of a proxy tap event.
//!
//! These types mirror the decoded message handed to us by the upstream tap stream.  Every field is
//! optional on the wire, so every type here has a `Default` that stands in for "not sent".  The
//! HTTP lifecycle payload and the end-of-stream outcome are closed enums.  Tagged unions decode
//! leniently: an empty or unrecognised one becomes `None`, so a message that carries none of the
//! known lifecycle variants decodes to `http: None` and renders as `unknown`.
use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

/// Unordered string labels attached to a peer or a route.
pub type Labels = HashMap<String, String>;

/// A single observed lifecycle moment for one proxied HTTP exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TapEvent {
    pub source: TcpAddress,
    pub source_meta: Metadata,
    pub destination: TcpAddress,
    pub destination_meta: Metadata,
    pub route_meta: Metadata,
    pub proxy_direction: ProxyDirection,
    #[serde(deserialize_with = "lenient")]
    pub http: Option<HttpEvent>,
}

/// Decodes an optional tagged union, treating anything that isn't a known variant as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpAddress {
    #[serde(deserialize_with = "lenient")]
    pub ip: Option<IpAddress>,
    pub port: u32,
}

/// Tagged binary peer address; IPv6 is carried as two big-endian halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IpAddress {
    Ipv4(u32),
    Ipv6(Ipv6Halves),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ipv6Halves {
    pub first: u64,
    pub last: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub labels: Labels,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProxyDirection {
    Inbound,
    Outbound,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ProxyDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyDirection::Unknown => "UNKNOWN",
            ProxyDirection::Inbound => "INBOUND",
            ProxyDirection::Outbound => "OUTBOUND",
        }
    }
}

impl fmt::Display for ProxyDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one HTTP lifecycle sub-event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HttpEvent {
    RequestInit(RequestInit),
    ResponseInit(ResponseInit),
    ResponseEnd(ResponseEnd),
}

/// Correlates the request, response and end events of a single exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamId {
    pub base: u32,
    pub stream: u64,
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.base, self.stream)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestInit {
    pub id: StreamId,
    #[serde(deserialize_with = "lenient")]
    pub method: Option<HttpMethod>,
    #[serde(deserialize_with = "lenient")]
    pub scheme: Option<Scheme>,
    pub authority: String,
    pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseInit {
    pub id: StreamId,
    pub since_request_init: ProtoDuration,
    pub http_status: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseEnd {
    pub id: StreamId,
    pub since_request_init: ProtoDuration,
    pub since_response_init: ProtoDuration,
    pub response_bytes: u64,
    #[serde(deserialize_with = "lenient")]
    pub eos: Option<Eos>,
}

/// How the response body ended, when the proxy knows more than "it finished".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Eos {
    GrpcStatusCode(u32),
    ResetErrorCode(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HttpMethod {
    Registered(RegisteredMethod),
    Unregistered(String),
}

impl HttpMethod {
    /// The method name, if it is one of the well-known ones; anything else yields "".
    pub fn registered_name(&self) -> &'static str {
        match self {
            HttpMethod::Registered(m) => m.as_str(),
            HttpMethod::Unregistered(_) => "",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegisteredMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Connect,
    Head,
    Trace,
    #[serde(other)]
    Unknown,
}

impl RegisteredMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisteredMethod::Get => "GET",
            RegisteredMethod::Post => "POST",
            RegisteredMethod::Put => "PUT",
            RegisteredMethod::Delete => "DELETE",
            RegisteredMethod::Patch => "PATCH",
            RegisteredMethod::Options => "OPTIONS",
            RegisteredMethod::Connect => "CONNECT",
            RegisteredMethod::Head => "HEAD",
            RegisteredMethod::Trace => "TRACE",
            RegisteredMethod::Unknown => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scheme {
    Registered(RegisteredScheme),
    Unregistered(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegisteredScheme {
    Http,
    Https,
    #[serde(other)]
    Unknown,
}

/// Protobuf-style signed duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtoDuration {
    pub seconds: i64,
    pub nanos: i32,
}

impl ProtoDuration {
    /// Whole microseconds, truncated toward zero.
    pub fn as_micros(&self) -> i64 {
        self.seconds
            .saturating_mul(1_000_000)
            .saturating_add(i64::from(self.nanos / 1_000))
    }
}

/// gRPC status code, displayed with its canonical name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrpcCode(pub u32);

const GRPC_CODE_NAMES: [&str; 17] = [
    "OK",
    "Canceled",
    "Unknown",
    "InvalidArgument",
    "DeadlineExceeded",
    "NotFound",
    "AlreadyExists",
    "PermissionDenied",
    "ResourceExhausted",
    "FailedPrecondition",
    "Aborted",
    "OutOfRange",
    "Unimplemented",
    "Internal",
    "Unavailable",
    "DataLoss",
    "Unauthenticated",
];

impl fmt::Display for GrpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match usize::try_from(self.0).ok().and_then(|i| GRPC_CODE_NAMES.get(i)) {
            Some(name) => f.write_str(name),
            None => write!(f, "Code({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests;
