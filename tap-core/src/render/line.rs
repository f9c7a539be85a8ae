use crate::addr::join_host_port;
use crate::display::{
    DisplayEvent,
    EndOutcome,
    Endpoint,
    Lifecycle,
};
use crate::event::{
    GrpcCode,
    HttpMethod,
    ProxyDirection,
};
use crate::k8s::{
    self,
    ShortNames,
};

/// Render an event as a single text line.
///
/// When `resource_kind` is a non-empty kind name (wide mode), each peer is annotated with the
/// resource of that kind it belongs to (or its pod), its namespace, and the route labels.
pub fn render_line(event: &DisplayEvent, resource_kind: Option<&str>, short_names: &ShortNames) -> String {
    let src = Peer::source(event);
    let dst = Peer::destination(event);

    let (proxy, tls) = match event.proxy_direction {
        // padded so `in` lines up with `out`
        ProxyDirection::Inbound => ("in ", src.tls_status()),
        ProxyDirection::Outbound => ("out", dst.tls_status()),
        ProxyDirection::Unknown => ("???", ""),
    };
    let flow = format!("proxy={proxy} {} {} tls={tls}", src.format_addr(), dst.format_addr());

    let resources = match resource_kind {
        Some(kind) if !kind.is_empty() => format!(
            "{}{}{}",
            src.format_resource(kind, short_names),
            dst.format_resource(kind, short_names),
            route_labels(event),
        ),
        _ => String::new(),
    };

    match &event.lifecycle {
        Some(Lifecycle::RequestInit(req)) => format!(
            "req id={} {flow} :method={} :authority={} :path={}{resources}",
            req.id,
            req.method.as_ref().map(HttpMethod::registered_name).unwrap_or_default(),
            req.authority,
            req.path,
        ),
        Some(Lifecycle::ResponseInit(rsp)) => format!(
            "rsp id={} {flow} :status={} latency={}µs{resources}",
            rsp.id,
            rsp.http_status,
            rsp.since_request_init.as_micros(),
        ),
        Some(Lifecycle::ResponseEnd(end)) => {
            let status = match end.outcome {
                Some(EndOutcome::GrpcStatusCode(code)) => format!(" grpc-status={}", GrpcCode(code)),
                Some(EndOutcome::ResetErrorCode(code)) => format!(" reset-error={code}"),
                None => String::new(),
            };
            format!(
                "end id={} {flow}{status} duration={}µs response-length={}B{resources}",
                end.id,
                end.since_response_init.as_micros(),
                end.response_bytes,
            )
        },
        None => format!("unknown {flow}"),
    }
}

struct Peer<'a> {
    endpoint: &'a Endpoint,
    direction: &'static str,
}

impl<'a> Peer<'a> {
    fn source(event: &'a DisplayEvent) -> Self {
        Peer { endpoint: &event.source, direction: "src" }
    }

    fn destination(event: &'a DisplayEvent) -> Self {
        Peer { endpoint: &event.destination, direction: "dst" }
    }

    fn format_addr(&self) -> String {
        format!("{}={}", self.direction, join_host_port(&self.endpoint.ip, self.endpoint.port))
    }

    fn tls_status(&self) -> &'a str {
        self.endpoint.label(k8s::TLS_LABEL).unwrap_or_default()
    }

    /// The owning resource of kind `kind` if the peer has one, otherwise its pod; plus its
    /// namespace unless the tapped kind is itself a namespace.
    fn format_resource(&self, kind: &str, short_names: &ShortNames) -> String {
        let mut out = String::new();
        if let Some(name) = self.endpoint.label(kind) {
            out.push_str(&format!(" {}_res={}/{}", self.direction, short_names.shorten(kind), name));
        } else if let Some(pod) = self.endpoint.label(k8s::POD) {
            out.push_str(&format!(" {}_pod={}", self.direction, pod));
        }

        if kind != k8s::NAMESPACE {
            if let Some(ns) = self.endpoint.label(k8s::NAMESPACE) {
                out.push_str(&format!(" {}_ns={}", self.direction, ns));
            }
        }
        out
    }
}

fn route_labels(event: &DisplayEvent) -> String {
    event.route_meta.iter().map(|(k, v)| format!(" rt_{k}={v}")).collect()
}
