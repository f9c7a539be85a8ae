//! Flattened, serializable view of a tap event.
//!
//! `DisplayEvent` is what every renderer consumes.  It resolves the binary peer addresses to text
//! and reshapes the lifecycle payload so that at most one of `requestInitEvent`,
//! `responseInitEvent` or `responseEndEvent` appears in JSON output; absent ones are skipped
//! rather than written as `null`.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::addr::ip_to_string;
use crate::event::{
    Eos,
    HttpEvent,
    HttpMethod,
    Labels,
    ProtoDuration,
    ProxyDirection,
    RequestInit,
    ResponseEnd,
    ResponseInit,
    Scheme,
    StreamId,
    TapEvent,
    TcpAddress,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEvent {
    pub source: Endpoint,
    pub destination: Endpoint,
    pub route_meta: BTreeMap<String, String>,
    pub proxy_direction: ProxyDirection,
    #[serde(flatten)]
    pub lifecycle: Option<Lifecycle>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub ip: String,
    pub port: u32,
    pub metadata: BTreeMap<String, String>,
}

impl Endpoint {
    fn new(addr: &TcpAddress, labels: &Labels) -> Self {
        Endpoint {
            ip: ip_to_string(addr.ip.as_ref()),
            port: addr.port,
            metadata: sorted(labels),
        }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Lifecycle {
    #[serde(rename = "requestInitEvent")]
    RequestInit(RequestInitEvent),
    #[serde(rename = "responseInitEvent")]
    ResponseInit(ResponseInitEvent),
    #[serde(rename = "responseEndEvent")]
    ResponseEnd(ResponseEndEvent),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestInitEvent {
    pub id: StreamId,
    pub method: Option<HttpMethod>,
    pub scheme: Option<Scheme>,
    pub authority: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInitEvent {
    pub id: StreamId,
    pub since_request_init: ProtoDuration,
    pub http_status: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEndEvent {
    pub id: StreamId,
    pub since_request_init: ProtoDuration,
    pub since_response_init: ProtoDuration,
    pub response_bytes: u64,
    #[serde(flatten)]
    pub outcome: Option<EndOutcome>,
}

/// Serialized as a single `grpcStatusCode` or `resetErrorCode` key, or nothing at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EndOutcome {
    GrpcStatusCode(u32),
    ResetErrorCode(u32),
}

impl From<&RequestInit> for RequestInitEvent {
    fn from(req: &RequestInit) -> Self {
        RequestInitEvent {
            id: req.id,
            method: req.method.clone(),
            scheme: req.scheme.clone(),
            authority: req.authority.clone(),
            path: req.path.clone(),
        }
    }
}

impl From<&ResponseInit> for ResponseInitEvent {
    fn from(rsp: &ResponseInit) -> Self {
        ResponseInitEvent {
            id: rsp.id,
            since_request_init: rsp.since_request_init,
            http_status: rsp.http_status,
        }
    }
}

impl From<&ResponseEnd> for ResponseEndEvent {
    fn from(end: &ResponseEnd) -> Self {
        ResponseEndEvent {
            id: end.id,
            since_request_init: end.since_request_init,
            since_response_init: end.since_response_init,
            response_bytes: end.response_bytes,
            outcome: end.eos.map(|eos| match eos {
                Eos::GrpcStatusCode(code) => EndOutcome::GrpcStatusCode(code),
                Eos::ResetErrorCode(code) => EndOutcome::ResetErrorCode(code),
            }),
        }
    }
}

impl From<&HttpEvent> for Lifecycle {
    fn from(http: &HttpEvent) -> Self {
        match http {
            HttpEvent::RequestInit(req) => Lifecycle::RequestInit(req.into()),
            HttpEvent::ResponseInit(rsp) => Lifecycle::ResponseInit(rsp.into()),
            HttpEvent::ResponseEnd(end) => Lifecycle::ResponseEnd(end.into()),
        }
    }
}

impl From<&TapEvent> for DisplayEvent {
    fn from(event: &TapEvent) -> Self {
        DisplayEvent {
            source: Endpoint::new(&event.source, &event.source_meta.labels),
            destination: Endpoint::new(&event.destination, &event.destination_meta.labels),
            route_meta: sorted(&event.route_meta.labels),
            proxy_direction: event.proxy_direction,
            lifecycle: event.http.as_ref().map(Lifecycle::from),
        }
    }
}

impl DisplayEvent {
    pub fn request_init(&self) -> Option<&RequestInitEvent> {
        match &self.lifecycle {
            Some(Lifecycle::RequestInit(req)) => Some(req),
            _ => None,
        }
    }

    pub fn response_init(&self) -> Option<&ResponseInitEvent> {
        match &self.lifecycle {
            Some(Lifecycle::ResponseInit(rsp)) => Some(rsp),
            _ => None,
        }
    }

    pub fn response_end(&self) -> Option<&ResponseEndEvent> {
        match &self.lifecycle {
            Some(Lifecycle::ResponseEnd(end)) => Some(end),
            _ => None,
        }
    }
}

fn sorted(labels: &Labels) -> BTreeMap<String, String> {
    labels.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}
